//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 楼层聚合树：FloorRecord, WingRecord, RoomRecord, RoomDeviceRecord
//! - 管理员模型：AdminRecord, AdminUpdate
//! - 设备台账模型：DeviceRecord, DeviceUpdate, DeviceFilter
//! - 报修单模型：ReportRecord, ReportUpdate
//!
//! 楼层树的各级类型带 serde 派生并使用 camelCase 字段名：
//! 该形状既是 wings JSONB 列的存储格式，也是原始文档模型的线格式。

use domain::ReportStatus;
use serde::{Deserialize, Serialize};

// ============================================================================
// 楼层聚合树（楼层 → 侧翼 → 房间 → 设备）
// ============================================================================

/// 楼层聚合根：一个楼层一份文档，侧翼/房间/设备全部内嵌。
///
/// `floor_name` 在全部楼层中唯一，是对外的主要标识；楼层名是不透明
/// 字符串，不做任何数字解析或排序推断。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRecord {
    pub floor_name: String,
    pub wings: Vec<WingRecord>,
}

/// 侧翼：内嵌于楼层，房间列表保持插入顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WingRecord {
    pub wing_name: String,
    pub rooms: Vec<RoomRecord>,
}

/// 房间：内嵌于侧翼，设备列表保持插入顺序。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub room_name: String,
    pub devices: Vec<RoomDeviceRecord>,
}

/// 房间内设备：与独立设备台账（DeviceRecord）无引用关系。
///
/// 条码意图上是物理资产的唯一标识，但树内不强制唯一：同一条码
/// 合法地可能出现在多个房间，遍历顺序决定命中哪一个。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDeviceRecord {
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
}

// ============================================================================
// 管理员模型
// ============================================================================

/// 管理员记录。
///
/// `password` 存 argon2 哈希；历史明文口令在首次登录成功后被升级。
/// `refresh_jti` 绑定当前有效的 refresh token（轮换时更新）。
#[derive(Debug, Clone)]
pub struct AdminRecord {
    pub admin_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
    pub role: String,
    pub refresh_jti: Option<String>,
}

/// 管理员更新输入。
#[derive(Debug, Clone)]
pub struct AdminUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}

// ============================================================================
// 设备台账模型（与楼层树独立的平面库存表，按条码定位）
// ============================================================================

/// 设备台账记录。
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
    pub device_location: String,
}

/// 设备台账更新输入。
#[derive(Debug, Clone)]
pub struct DeviceUpdate {
    pub device_name: Option<String>,
    pub device_model: Option<String>,
    pub device_price: Option<f64>,
    pub device_status: Option<String>,
    pub device_location: Option<String>,
}

/// 设备台账过滤条件。
///
/// 名称为大小写不敏感的子串匹配，状态为大小写不敏感的全等匹配，
/// 与楼层树过滤保持同一套不对称语义。
#[derive(Debug, Clone, Default)]
pub struct DeviceFilter {
    pub device_name: Option<String>,
    pub device_status: Option<String>,
}

// ============================================================================
// 报修单模型（独立顶层集合，保存设备上报时刻的快照）
// ============================================================================

/// 报修单记录。
///
/// 设备字段是上报时刻的快照，不是楼层树的活引用。
#[derive(Debug, Clone)]
pub struct ReportRecord {
    pub report_id: String,
    pub device_barcode: String,
    pub device_name: String,
    pub device_status: String,
    pub status: ReportStatus,
    pub created_at_ms: i64,
}

/// 报修单更新输入。
#[derive(Debug, Clone)]
pub struct ReportUpdate {
    pub device_barcode: Option<String>,
    pub device_name: Option<String>,
    pub device_status: Option<String>,
    pub status: Option<ReportStatus>,
}
