//! 稳定的 DTO 与 API 响应契约。
//!
//! 字段名与既有前端约定保持 camelCase。

use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 登录请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
    pub username: String,
    pub role: String,
    pub image: Option<String>,
}

/// 刷新 token 请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

/// 刷新 token 响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
}

/// 管理员创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
    pub role: Option<String>,
}

/// 管理员更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}

/// 管理员返回结构。口令不出网。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDto {
    pub admin_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    pub role: String,
}

/// 台账设备创建请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeviceRequest {
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
    pub device_location: String,
}

/// 台账设备更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeviceRequest {
    pub device_name: Option<String>,
    pub device_model: Option<String>,
    pub device_price: Option<f64>,
    pub device_status: Option<String>,
    pub device_location: Option<String>,
}

/// 台账设备返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
    pub device_location: String,
}

/// 台账设备过滤条件（query string）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFilterQuery {
    pub device_name: Option<String>,
    pub device_status: Option<String>,
}

/// 楼层树中的设备节点。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDeviceDto {
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
}

/// 房间节点。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_name: String,
    #[serde(default)]
    pub devices: Vec<RoomDeviceDto>,
}

/// 侧翼节点。
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WingDto {
    pub wing_name: String,
    #[serde(default)]
    pub rooms: Vec<RoomDto>,
}

/// 楼层树返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorDto {
    pub floor_name: String,
    pub wings: Vec<WingDto>,
}

/// 楼层三级追加请求体：缺哪级建哪级，设备追加。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFloorRequest {
    pub floor_name: String,
    pub wing_name: String,
    pub room_name: String,
    #[serde(default)]
    pub devices: Vec<RoomDeviceDto>,
}

/// 动态建层请求体：侧翼 + 房间名骨架，房间以空设备列表创建。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicFloorRequest {
    pub floor_name: String,
    pub wings: Vec<DynamicWingDto>,
}

/// 动态建层的侧翼形状。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicWingDto {
    pub wing_name: String,
    #[serde(default)]
    pub rooms: Vec<String>,
}

/// 楼层整体替换请求体（含改名）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceFloorRequest {
    pub old_floor_name: String,
    pub new_floor_name: String,
    #[serde(default)]
    pub updated_wings: Vec<WingDto>,
}

/// 设备搬移请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelocateDeviceRequest {
    pub device_barcode: String,
    pub new_floor_name: String,
    pub new_wing_name: String,
    pub new_room_name: String,
    pub new_status: String,
}

/// 楼层层级过滤条件（query string）。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorFilterQuery {
    pub floor_name: Option<String>,
    pub wing_name: Option<String>,
    pub room_name: Option<String>,
    pub device_name: Option<String>,
    pub device_status: Option<String>,
}

/// 条码定位返回结构（扫码端消费）。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceLocationDto {
    pub floor_name: String,
    pub wing_name: String,
    pub room_name: String,
    pub device_barcode: String,
    pub device_name: String,
    pub device_model: String,
    pub device_price: f64,
    pub device_status: String,
}

/// 报修单创建请求体（扫码端提交）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub device_barcode: String,
    pub device_name: String,
    pub device_status: String,
}

/// 报修单更新请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    pub device_barcode: Option<String>,
    pub device_name: Option<String>,
    pub device_status: Option<String>,
    pub status: Option<String>,
}

/// 报修单返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub report_id: String,
    pub device_barcode: String,
    pub device_name: String,
    pub device_status: String,
    pub status: String,
    pub created_at: i64,
}

/// 指标快照返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub floors_created: u64,
    pub floors_deleted: u64,
    pub devices_relocated: u64,
    pub relocation_failures: u64,
    pub barcode_lookups: u64,
    pub reports_created: u64,
    pub reports_confirmed: u64,
    pub report_alerts_emitted: u64,
}
