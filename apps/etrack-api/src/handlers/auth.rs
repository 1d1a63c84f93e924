//! 认证相关 handlers：登录、刷新 token、健康探针
//!
//! ## 提供的端点
//!
//! ### 公开端点（无需认证）
//! - `GET /health` - 健康检查，返回 `{"ok": true}`
//! - `GET /livez` - Liveness 探针
//! - `GET /readyz` - Readiness 探针（Postgres 后端时检查连接）
//! - `POST /login` - 管理员登录，验证用户名密码后返回 access/refresh token
//! - `POST /refresh-token` - 使用 refresh token 刷新 access token
//!
//! ## 认证流程
//!
//! ### 登录流程
//! 1. 客户端发送用户名密码
//! 2. 服务端调用 `AuthService::login()` 验证凭据（存量明文口令首次
//!    登录成功后升级为 argon2 哈希）
//! 3. 验证成功后返回 access/refresh token 对与管理员基本信息
//!
//! ### Token 刷新流程
//! 1. 客户端使用 refresh token 请求新 token
//! 2. 服务端校验 refresh token 与库内绑定的 jti 一致
//! 3. 校验通过后签发新 token 对并轮换 jti，旧 refresh token 作废

use crate::AppState;
use crate::utils::response::{auth_error, internal_auth_error};
use api_contract::{
    ApiResponse, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use etrack_auth::AuthError;

/// 健康检查端点
///
/// 无需认证，可用于负载均衡器健康探针或服务监控。
pub async fn health() -> impl IntoResponse {
    livez().await
}

/// Liveness 探针：只反映进程存活，不做外部依赖检查。
pub async fn livez() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// Readiness 探针：Postgres 后端时检查数据库连接，内存后端恒为就绪。
pub async fn readyz(State(state): State<AppState>) -> Response {
    let Some(pool) = state.db_pool.as_ref() else {
        return (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response();
    };

    match sqlx::query_scalar::<_, i32>("select 1").fetch_one(pool).await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "ok": true }))).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "readyz check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "ok": false })),
            )
                .into_response()
        }
    }
}

/// 登录接口
///
/// # Errors
///
/// - `401 UNAUTHORIZED`: 用户名或密码错误（`InvalidCredentials`）
/// - `500 INTERNAL SERVER ERROR`: 认证服务内部错误
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.username, &req.password).await {
        Ok((admin, tokens)) => {
            let response = LoginResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires: tokens.expires_at.saturating_mul(1000),
                username: admin.name,
                role: admin.role,
                image: admin.image,
            };
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Err(AuthError::InvalidCredentials) => auth_error(StatusCode::UNAUTHORIZED),
        Err(err) => internal_auth_error(err),
    }
}

/// 刷新 token 接口
///
/// refresh token 为一次性：刷新成功后库内 jti 轮换，旧 token 作废。
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    match state.auth.refresh(&req.refresh_token).await {
        Ok(tokens) => {
            let response = RefreshTokenResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                expires: tokens.expires_at.saturating_mul(1000),
            };
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Err(AuthError::TokenInvalid | AuthError::TokenExpired) => {
            auth_error(StatusCode::UNAUTHORIZED)
        }
        Err(err) => internal_auth_error(err),
    }
}
