//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers。
//! 路由包括：
//! - 健康检查：/health, /livez, /readyz
//! - 认证接口：/login, /refresh-token
//! - 管理员管理：/admins/*
//! - 设备台账：/devices/*
//! - 楼层层级：/floors/*
//! - 报修单：/reports/*
//! - 指标快照：/metrics

use super::AppState;
use super::handlers::*;
use axum::{
    Router,
    routing::{get, post, put},
};

/// 创建 API 路由
///
/// 返回包含所有 API 端点的 Router，由 main 挂到 / 和 /api/ 两种前缀
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/metrics", get(get_metrics))
        .route("/admins", get(list_admins).post(create_admin))
        .route(
            "/admins/:admin_id",
            get(get_admin).put(update_admin).delete(delete_admin),
        )
        .route("/devices", get(list_devices).post(create_device))
        .route("/devices/filter", get(filter_devices))
        .route(
            "/devices/:device_barcode",
            get(get_device).put(update_device),
        )
        .route("/floors", get(list_floors).post(upsert_floor))
        .route("/floors/dynamic", post(create_dynamic_floor))
        .route("/floors/filter", get(filter_floors))
        .route("/floors/device/:device_barcode", get(locate_device))
        .route("/floors/replace", put(replace_floor))
        .route("/floors/relocate-device", put(relocate_device))
        .route("/floors/:floor_name", axum::routing::delete(delete_floor))
        .route("/reports", get(list_reports).post(create_report))
        .route(
            "/reports/:report_id",
            put(update_report).delete(delete_report),
        )
        .route("/reports/:report_id/confirm", put(confirm_report))
}
