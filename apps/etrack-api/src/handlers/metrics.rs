//! Telemetry 指标快照。
//!
//! - GET /metrics（需认证）

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use etrack_telemetry::metrics;

use crate::{AppState, middleware::require_admin_context};

pub async fn get_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }

    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            floors_created: snapshot.floors_created,
            floors_deleted: snapshot.floors_deleted,
            devices_relocated: snapshot.devices_relocated,
            relocation_failures: snapshot.relocation_failures,
            barcode_lookups: snapshot.barcode_lookups,
            reports_created: snapshot.reports_created,
            reports_confirmed: snapshot.reports_confirmed,
            report_alerts_emitted: snapshot.report_alerts_emitted,
        })),
    )
        .into_response()
}
