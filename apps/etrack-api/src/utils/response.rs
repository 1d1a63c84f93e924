//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：auth_error, bad_request_error, not_found_error, conflict_error,
//!   internal_auth_error, storage_error, hierarchy_error
//! - DTO 转换：admin_to_dto, device_to_dto, report_to_dto, floor_to_dto,
//!   location_to_dto 以及楼层树的 DTO → Record 方向
//!
//! 设计原则：
//! - 所有错误返回统一的 ApiResponse 格式
//! - 层级操作的三种缺失（楼层/设备/目标房间）映射为不同错误码的 404

use api_contract::{
    AdminDto, ApiResponse, DeviceDto, DeviceLocationDto, FloorDto, ReportDto, RoomDeviceDto,
    RoomDto, WingDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use etrack_auth::AuthError;
use etrack_hierarchy::{DeviceLocation, HierarchyError};
use etrack_storage::{
    AdminRecord, DeviceRecord, FloorRecord, ReportRecord, RoomDeviceRecord, RoomRecord,
    StorageError, WingRecord,
};

/// 认证错误响应
pub fn auth_error(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse::<()>::error(
            "AUTH.UNAUTHORIZED",
            "unauthorized",
        )),
    )
        .into_response()
}

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 资源冲突错误响应
pub fn conflict_error(message: impl Into<String>) -> Response {
    (
        StatusCode::CONFLICT,
        Json(ApiResponse::<()>::error(
            "RESOURCE.CONFLICT",
            message.into(),
        )),
    )
        .into_response()
}

/// 认证内部错误响应
pub fn internal_auth_error(err: AuthError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 存储错误响应
pub fn storage_error(err: StorageError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// 层级操作错误响应。三种缺失各有独立错误码，便于前端区分文案。
pub fn hierarchy_error(err: HierarchyError) -> Response {
    match err {
        HierarchyError::FloorNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("FLOOR.NOT_FOUND", "floor not found")),
        )
            .into_response(),
        HierarchyError::DeviceNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                "DEVICE.NOT_FOUND",
                "device not found",
            )),
        )
            .into_response(),
        HierarchyError::TargetRoomNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(
                "TARGET_ROOM.NOT_FOUND",
                "target room not found",
            )),
        )
            .into_response(),
        HierarchyError::FloorExists => conflict_error("floor already exists"),
        HierarchyError::Storage(err) => storage_error(err),
    }
}

/// AdminRecord 转 AdminDto。口令与 refresh jti 不出网。
pub fn admin_to_dto(record: AdminRecord) -> AdminDto {
    AdminDto {
        admin_id: record.admin_id,
        name: record.name,
        email: record.email,
        image: record.image,
        role: record.role,
    }
}

/// DeviceRecord 转 DeviceDto
pub fn device_to_dto(record: DeviceRecord) -> DeviceDto {
    DeviceDto {
        device_barcode: record.device_barcode,
        device_name: record.device_name,
        device_model: record.device_model,
        device_price: record.device_price,
        device_status: record.device_status,
        device_location: record.device_location,
    }
}

/// ReportRecord 转 ReportDto
pub fn report_to_dto(record: ReportRecord) -> ReportDto {
    ReportDto {
        report_id: record.report_id,
        device_barcode: record.device_barcode,
        device_name: record.device_name,
        device_status: record.device_status,
        status: record.status.as_str().to_string(),
        created_at: record.created_at_ms,
    }
}

/// FloorRecord 转 FloorDto（整棵子树）
pub fn floor_to_dto(record: FloorRecord) -> FloorDto {
    FloorDto {
        floor_name: record.floor_name,
        wings: record.wings.into_iter().map(wing_to_dto).collect(),
    }
}

fn wing_to_dto(record: WingRecord) -> WingDto {
    WingDto {
        wing_name: record.wing_name,
        rooms: record
            .rooms
            .into_iter()
            .map(|room| RoomDto {
                room_name: room.room_name,
                devices: room
                    .devices
                    .into_iter()
                    .map(room_device_to_dto)
                    .collect(),
            })
            .collect(),
    }
}

fn room_device_to_dto(record: RoomDeviceRecord) -> RoomDeviceDto {
    RoomDeviceDto {
        device_barcode: record.device_barcode,
        device_name: record.device_name,
        device_model: record.device_model,
        device_price: record.device_price,
        device_status: record.device_status,
    }
}

/// WingDto 转 WingRecord（整层替换的请求方向）
pub fn wing_from_dto(dto: WingDto) -> WingRecord {
    WingRecord {
        wing_name: dto.wing_name,
        rooms: dto
            .rooms
            .into_iter()
            .map(|room| RoomRecord {
                room_name: room.room_name,
                devices: room
                    .devices
                    .into_iter()
                    .map(room_device_from_dto)
                    .collect(),
            })
            .collect(),
    }
}

/// RoomDeviceDto 转 RoomDeviceRecord
pub fn room_device_from_dto(dto: RoomDeviceDto) -> RoomDeviceRecord {
    RoomDeviceRecord {
        device_barcode: dto.device_barcode,
        device_name: dto.device_name,
        device_model: dto.device_model,
        device_price: dto.device_price,
        device_status: dto.device_status,
    }
}

/// DeviceLocation 转扁平 DeviceLocationDto（扫码端形状）
pub fn location_to_dto(location: DeviceLocation) -> DeviceLocationDto {
    DeviceLocationDto {
        floor_name: location.floor_name,
        wing_name: location.wing_name,
        room_name: location.room_name,
        device_barcode: location.device.device_barcode,
        device_name: location.device.device_name,
        device_model: location.device.device_model,
        device_price: location.device.device_price,
        device_status: location.device.device_status,
    }
}
