use serde::{Deserialize, Serialize};

/// 报修单生命周期状态。
///
/// 流转：new -> confirmed -> resolved。新建报修单默认为 new。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    New,
    Confirmed,
    Resolved,
}

impl ReportStatus {
    /// 存储层使用的文本表示。
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::New => "new",
            ReportStatus::Confirmed => "confirmed",
            ReportStatus::Resolved => "resolved",
        }
    }

    /// 从存储层文本解析状态，未知值视为非法。
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ReportStatus::New),
            "confirmed" => Some(ReportStatus::Confirmed),
            "resolved" => Some(ReportStatus::Resolved),
            _ => None,
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::New
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
