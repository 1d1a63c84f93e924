//! 楼层层级 handlers
//!
//! 楼层 → 侧翼 → 房间 → 设备 树的维护与查询接口：
//! - GET /floors - 列出全部楼层树（公开）
//! - POST /floors - 三级追加式 upsert（需认证）
//! - POST /floors/dynamic - 动态建层骨架（需认证）
//! - GET /floors/filter - 级联过滤查询（公开）
//! - GET /floors/device/{barcode} - 条码定位（公开，扫码端）
//! - PUT /floors/replace - 整体替换含改名（需认证）
//! - PUT /floors/relocate-device - 搬移设备并更新状态（需认证）
//! - DELETE /floors/{floorName} - 删除楼层级联子树（需认证）
//!
//! 错误码约定：楼层/设备/目标房间三种缺失分别映射为
//! FLOOR.NOT_FOUND / DEVICE.NOT_FOUND / TARGET_ROOM.NOT_FOUND，
//! 动态建层重名为 RESOURCE.CONFLICT。

use crate::AppState;
use crate::middleware::require_admin_context;
use crate::utils::normalize_required;
use crate::utils::response::{
    floor_to_dto, hierarchy_error, location_to_dto, room_device_from_dto, wing_from_dto,
};
use api_contract::{
    ApiResponse, DynamicFloorRequest, FloorDto, FloorFilterQuery, RelocateDeviceRequest,
    ReplaceFloorRequest, UpsertFloorRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use etrack_hierarchy::{FloorFilter, HierarchyError, WingLayout};

#[derive(serde::Deserialize)]
pub struct FloorPath {
    floor_name: String,
}

#[derive(serde::Deserialize)]
pub struct BarcodePath {
    device_barcode: String,
}

/// 列出全部楼层树
pub async fn list_floors(State(state): State<AppState>) -> Response {
    match state.hierarchy.list_floors().await {
        Ok(floors) => {
            let data: Vec<FloorDto> = floors.into_iter().map(floor_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => hierarchy_error(err),
    }
}

/// 三级追加式 upsert：楼层/侧翼/房间缺哪级建哪级，设备追加
pub async fn upsert_floor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<UpsertFloorRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let floor_name = match normalize_required(req.floor_name, "floorName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let wing_name = match normalize_required(req.wing_name, "wingName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let room_name = match normalize_required(req.room_name, "roomName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let devices = req.devices.into_iter().map(room_device_from_dto).collect();
    match state
        .hierarchy
        .upsert_floor(&floor_name, &wing_name, &room_name, devices)
        .await
    {
        Ok(floor) => (
            StatusCode::OK,
            Json(ApiResponse::success(floor_to_dto(floor))),
        )
            .into_response(),
        Err(err) => hierarchy_error(err),
    }
}

/// 动态建层：侧翼 + 房间名骨架，重名返回 409
pub async fn create_dynamic_floor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<DynamicFloorRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let floor_name = match normalize_required(req.floor_name, "floorName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let wings = req
        .wings
        .into_iter()
        .map(|wing| WingLayout {
            wing_name: wing.wing_name,
            rooms: wing.rooms,
        })
        .collect();
    match state.hierarchy.create_dynamic_floor(&floor_name, wings).await {
        Ok(floor) => {
            etrack_telemetry::record_floor_created();
            (
                StatusCode::OK,
                Json(ApiResponse::success(floor_to_dto(floor))),
            )
                .into_response()
        }
        Err(err) => hierarchy_error(err),
    }
}

/// 级联过滤查询。各级名称为不敏感子串，设备状态为不敏感全等。
pub async fn filter_floors(
    State(state): State<AppState>,
    Query(query): Query<FloorFilterQuery>,
) -> Response {
    let filter = FloorFilter {
        floor_name: query.floor_name,
        wing_name: query.wing_name,
        room_name: query.room_name,
        device_name: query.device_name,
        device_status: query.device_status,
    };
    match state.hierarchy.filter_floors(&filter).await {
        Ok(floors) => {
            let data: Vec<FloorDto> = floors.into_iter().map(floor_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => hierarchy_error(err),
    }
}

/// 条码定位：返回扁平的楼层/侧翼/房间/设备快照（扫码端消费）
pub async fn locate_device(
    State(state): State<AppState>,
    Path(path): Path<BarcodePath>,
) -> Response {
    etrack_telemetry::record_barcode_lookup();
    match state.hierarchy.locate_device(&path.device_barcode).await {
        Ok(location) => (
            StatusCode::OK,
            Json(ApiResponse::success(location_to_dto(location))),
        )
            .into_response(),
        Err(err) => hierarchy_error(err),
    }
}

/// 整体替换：改楼层名并以请求中的 wings 覆盖全部侧翼
pub async fn replace_floor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ReplaceFloorRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let old_floor_name = match normalize_required(req.old_floor_name, "oldFloorName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let new_floor_name = match normalize_required(req.new_floor_name, "newFloorName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let wings = req.updated_wings.into_iter().map(wing_from_dto).collect();
    match state
        .hierarchy
        .replace_floor(&old_floor_name, &new_floor_name, wings)
        .await
    {
        Ok(floor) => (
            StatusCode::OK,
            Json(ApiResponse::success(floor_to_dto(floor))),
        )
            .into_response(),
        Err(err) => hierarchy_error(err),
    }
}

/// 搬移设备并更新状态。目标房间按精确名定位，不会自动创建。
pub async fn relocate_device(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RelocateDeviceRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let device_barcode = match normalize_required(req.device_barcode, "deviceBarcode") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match state
        .hierarchy
        .relocate_device(
            &device_barcode,
            &req.new_floor_name,
            &req.new_wing_name,
            &req.new_room_name,
            &req.new_status,
        )
        .await
    {
        Ok(()) => {
            etrack_telemetry::record_device_relocated();
            (StatusCode::OK, Json(ApiResponse::success(()))).into_response()
        }
        Err(err @ (HierarchyError::DeviceNotFound | HierarchyError::TargetRoomNotFound)) => {
            etrack_telemetry::record_relocation_failure();
            hierarchy_error(err)
        }
        Err(err) => hierarchy_error(err),
    }
}

/// 删除楼层，级联内嵌侧翼/房间/设备
pub async fn delete_floor(
    State(state): State<AppState>,
    Path(path): Path<FloorPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.hierarchy.delete_floor(&path.floor_name).await {
        Ok(()) => {
            etrack_telemetry::record_floor_deleted();
            (StatusCode::OK, Json(ApiResponse::success(()))).into_response()
        }
        Err(err) => hierarchy_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_headers, test_state};
    use api_contract::{DynamicWingDto, RoomDeviceDto};
    use axum::http::HeaderMap;

    fn upsert_request(floor: &str, wing: &str, room: &str, barcode: &str) -> UpsertFloorRequest {
        UpsertFloorRequest {
            floor_name: floor.to_string(),
            wing_name: wing.to_string(),
            room_name: room.to_string(),
            devices: vec![RoomDeviceDto {
                device_barcode: barcode.to_string(),
                device_name: "Monitor".to_string(),
                device_model: "M1".to_string(),
                device_price: 99.0,
                device_status: "working".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn upsert_requires_token() {
        let state = test_state();
        let response = upsert_floor(
            State(state),
            HeaderMap::new(),
            Json(upsert_request("Floor 1", "East Wing", "101", "D1")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dynamic_duplicate_returns_conflict() {
        let state = test_state();
        let headers = admin_headers(&state).await;
        let request = || DynamicFloorRequest {
            floor_name: "Floor 1".to_string(),
            wings: vec![DynamicWingDto {
                wing_name: "East Wing".to_string(),
                rooms: vec!["101".to_string()],
            }],
        };
        let response =
            create_dynamic_floor(State(state.clone()), headers.clone(), Json(request())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = create_dynamic_floor(State(state), headers, Json(request())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn relocate_distinguishes_missing_device_and_room() {
        let state = test_state();
        let headers = admin_headers(&state).await;
        let response = upsert_floor(
            State(state.clone()),
            headers.clone(),
            Json(upsert_request("Floor 9", "Left Wing", "101", "D1")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        // 条码不存在
        let response = relocate_device(
            State(state.clone()),
            headers.clone(),
            Json(RelocateDeviceRequest {
                device_barcode: "D9".to_string(),
                new_floor_name: "Floor 9".to_string(),
                new_wing_name: "Left Wing".to_string(),
                new_room_name: "101".to_string(),
                new_status: "working".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // 目标房间不存在
        let response = relocate_device(
            State(state),
            headers,
            Json(RelocateDeviceRequest {
                device_barcode: "D1".to_string(),
                new_floor_name: "Floor 9".to_string(),
                new_wing_name: "Left Wing".to_string(),
                new_room_name: "102".to_string(),
                new_status: "not working".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn locate_is_public_and_misses_with_404() {
        let state = test_state();
        let response = locate_device(
            State(state),
            Path(BarcodePath {
                device_barcode: "D404".to_string(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
