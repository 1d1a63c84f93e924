//! 设备台账 handlers
//!
//! 平面库存表接口，独立于楼层树：
//! - GET /devices - 列出台账设备（公开）
//! - POST /devices - 登记设备（需认证）
//! - GET /devices/filter - 按名称/状态过滤（公开）
//! - GET /devices/{barcode} - 按条码查询（公开）
//! - PUT /devices/{barcode} - 更新设备（需认证）
//!
//! 条码在台账内唯一，由存储主键保证；重复登记返回 409。

use crate::AppState;
use crate::middleware::require_admin_context;
use crate::utils::response::{conflict_error, device_to_dto, not_found_error, storage_error};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{
    ApiResponse, CreateDeviceRequest, DeviceDto, DeviceFilterQuery, UpdateDeviceRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

#[derive(serde::Deserialize)]
pub struct DevicePath {
    device_barcode: String,
}

/// 列出台账设备
pub async fn list_devices(State(state): State<AppState>) -> Response {
    match state.device_store.list_devices().await {
        Ok(devices) => {
            let data: Vec<DeviceDto> = devices.into_iter().map(device_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 登记新设备
pub async fn create_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let device_barcode = match normalize_required(req.device_barcode, "deviceBarcode") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let device_name = match normalize_required(req.device_name, "deviceName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state.device_store.find_device(&device_barcode).await {
        Ok(Some(_)) => return conflict_error("device barcode already exists"),
        Ok(None) => {}
        Err(err) => return storage_error(err),
    }
    let record = etrack_storage::DeviceRecord {
        device_barcode,
        device_name,
        device_model: req.device_model,
        device_price: req.device_price,
        device_status: req.device_status,
        device_location: req.device_location,
    };
    match state.device_store.create_device(record).await {
        Ok(device) => (
            StatusCode::OK,
            Json(ApiResponse::success(device_to_dto(device))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 按条码查询设备
pub async fn get_device(
    State(state): State<AppState>,
    Path(path): Path<DevicePath>,
) -> Response {
    match state.device_store.find_device(&path.device_barcode).await {
        Ok(Some(device)) => (
            StatusCode::OK,
            Json(ApiResponse::success(device_to_dto(device))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 更新台账设备
pub async fn update_device(
    State(state): State<AppState>,
    Path(path): Path<DevicePath>,
    headers: HeaderMap,
    Json(req): Json<UpdateDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let device_name = match normalize_optional(req.device_name, "deviceName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let update = etrack_storage::DeviceUpdate {
        device_name,
        device_model: req.device_model,
        device_price: req.device_price,
        device_status: req.device_status,
        device_location: req.device_location,
    };
    match state
        .device_store
        .update_device(&path.device_barcode, update)
        .await
    {
        Ok(Some(device)) => (
            StatusCode::OK,
            Json(ApiResponse::success(device_to_dto(device))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 按名称/状态过滤台账设备。名称为不敏感子串，状态为不敏感全等。
pub async fn filter_devices(
    State(state): State<AppState>,
    Query(query): Query<DeviceFilterQuery>,
) -> Response {
    let filter = etrack_storage::DeviceFilter {
        device_name: query.device_name,
        device_status: query.device_status,
    };
    match state.device_store.filter_devices(&filter).await {
        Ok(devices) => {
            let data: Vec<DeviceDto> = devices.into_iter().map(device_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_headers, test_state};
    use axum::http::HeaderMap;

    fn create_request(barcode: &str) -> CreateDeviceRequest {
        CreateDeviceRequest {
            device_barcode: barcode.to_string(),
            device_name: "Monitor".to_string(),
            device_model: "M1".to_string(),
            device_price: 99.0,
            device_status: "working".to_string(),
            device_location: "Floor 1 / 101".to_string(),
        }
    }

    #[tokio::test]
    async fn create_device_requires_token() {
        let state = test_state();
        let response = create_device(
            State(state),
            HeaderMap::new(),
            Json(create_request("D1")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_barcode_conflicts() {
        let state = test_state();
        let headers = admin_headers(&state).await;
        let response = create_device(
            State(state.clone()),
            headers.clone(),
            Json(create_request("D1")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_device(State(state), headers, Json(create_request("D1"))).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
