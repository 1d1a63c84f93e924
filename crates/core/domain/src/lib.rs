pub mod report;

pub use report::ReportStatus;

/// 管理员上下文：认证后的请求执行身份。
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin_id: String,
    pub username: String,
    pub role: String,
}

impl AdminContext {
    /// 构造显式身份的管理员上下文。
    pub fn new(
        admin_id: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            admin_id: admin_id.into(),
            username: username.into(),
            role: role.into(),
        }
    }
}

impl Default for AdminContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self {
            admin_id: "".to_string(),
            username: "".to_string(),
            role: "".to_string(),
        }
    }
}
