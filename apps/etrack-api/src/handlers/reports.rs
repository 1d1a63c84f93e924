//! 报修单 handlers
//!
//! 报修单生命周期接口：
//! - GET /reports - 列出报修单（需认证）
//! - POST /reports - 提交报修（公开，扫码端学生提交）
//! - PUT /reports/{id} - 更新报修单（需认证）
//! - PUT /reports/{id}/confirm - 确认报修单（需认证）
//! - DELETE /reports/{id} - 删除报修单（需认证）
//!
//! 新建与确认分别产出通知事件，由订阅方异步消费；发布失败不影响
//! 主流程。

use crate::AppState;
use crate::middleware::require_admin_context;
use crate::utils::normalize_required;
use crate::utils::response::{bad_request_error, not_found_error, report_to_dto, storage_error};
use api_contract::{ApiResponse, CreateReportRequest, ReportDto, UpdateReportRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::ReportStatus;
use etrack_notify::{ReportEvent, ReportNotice};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct ReportPath {
    report_id: String,
}

/// 列出报修单
pub async fn list_reports(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.report_store.list_reports().await {
        Ok(reports) => {
            let data: Vec<ReportDto> = reports.into_iter().map(report_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 提交报修单（扫码端，无需认证）
pub async fn create_report(
    State(state): State<AppState>,
    Json(req): Json<CreateReportRequest>,
) -> Response {
    let device_barcode = match normalize_required(req.device_barcode, "deviceBarcode") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let device_name = match normalize_required(req.device_name, "deviceName") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let record = etrack_storage::ReportRecord {
        report_id: Uuid::new_v4().to_string(),
        device_barcode,
        device_name,
        device_status: req.device_status,
        status: ReportStatus::New,
        created_at_ms: now_epoch_ms(),
    };
    match state.report_store.create_report(record).await {
        Ok(report) => {
            etrack_telemetry::record_report_created();
            etrack_telemetry::record_report_alert_emitted();
            state.notifier.emit_report_alert(ReportNotice {
                event: ReportEvent::Alert,
                report_id: report.report_id.clone(),
                device_barcode: report.device_barcode.clone(),
                device_name: report.device_name.clone(),
                device_status: report.device_status.clone(),
            });
            (
                StatusCode::OK,
                Json(ApiResponse::success(report_to_dto(report))),
            )
                .into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 更新报修单
pub async fn update_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateReportRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let status = match req.status {
        Some(value) => match ReportStatus::parse(&value) {
            Some(status) => Some(status),
            None => return bad_request_error(format!("unknown report status: {value}")),
        },
        None => None,
    };
    let update = etrack_storage::ReportUpdate {
        device_barcode: req.device_barcode,
        device_name: req.device_name,
        device_status: req.device_status,
        status,
    };
    match state.report_store.update_report(&path.report_id, update).await {
        Ok(Some(report)) => (
            StatusCode::OK,
            Json(ApiResponse::success(report_to_dto(report))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 确认报修单并广播确认事件
pub async fn confirm_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state
        .report_store
        .set_report_status(&path.report_id, ReportStatus::Confirmed)
        .await
    {
        Ok(Some(report)) => {
            etrack_telemetry::record_report_confirmed();
            state.notifier.emit_report_confirmed(ReportNotice {
                event: ReportEvent::Confirmed,
                report_id: report.report_id.clone(),
                device_barcode: report.device_barcode.clone(),
                device_name: report.device_name.clone(),
                device_status: report.device_status.clone(),
            });
            (
                StatusCode::OK,
                Json(ApiResponse::success(report_to_dto(report))),
            )
                .into_response()
        }
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除报修单
pub async fn delete_report(
    State(state): State<AppState>,
    Path(path): Path<ReportPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.report_store.delete_report(&path.report_id).await {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 当前时间戳（毫秒）。
fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{admin_headers, test_state};
    use axum::http::HeaderMap;
    use etrack_storage::ReportStore;

    fn create_request() -> CreateReportRequest {
        CreateReportRequest {
            device_barcode: "D1".to_string(),
            device_name: "Projector".to_string(),
            device_status: "not working".to_string(),
        }
    }

    #[tokio::test]
    async fn create_report_is_public_and_emits_alert() {
        let state = test_state();
        let mut rx = state.notifier.subscribe();

        let response = create_report(State(state), Json(create_request())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let notice = rx.recv().await.expect("alert");
        assert_eq!(notice.event, ReportEvent::Alert);
        assert_eq!(notice.device_barcode, "D1");
    }

    #[tokio::test]
    async fn confirm_emits_confirmed_notice() {
        let state = test_state();
        let headers = admin_headers(&state).await;

        let record = etrack_storage::ReportRecord {
            report_id: "r1".to_string(),
            device_barcode: "D1".to_string(),
            device_name: "Projector".to_string(),
            device_status: "not working".to_string(),
            status: ReportStatus::New,
            created_at_ms: now_epoch_ms(),
        };
        state.report_store.create_report(record).await.expect("seed");

        let mut rx = state.notifier.subscribe();
        let response = confirm_report(
            State(state),
            Path(ReportPath {
                report_id: "r1".to_string(),
            }),
            headers,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let notice = rx.recv().await.expect("confirmed");
        assert_eq!(notice.event, ReportEvent::Confirmed);
    }

    #[tokio::test]
    async fn update_rejects_unknown_status() {
        let state = test_state();
        let headers = admin_headers(&state).await;
        let response = update_report(
            State(state),
            Path(ReportPath {
                report_id: "r1".to_string(),
            }),
            headers,
            Json(UpdateReportRequest {
                device_barcode: None,
                device_name: None,
                device_status: None,
                status: Some("broken".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_reports_requires_token() {
        let state = test_state();
        let response = list_reports(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
