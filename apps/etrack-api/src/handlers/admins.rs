//! 管理员 CRUD handlers
//!
//! 提供管理员账号的增删改查接口：
//! - GET /admins - 列出管理员
//! - POST /admins - 创建管理员
//! - GET /admins/{id} - 获取管理员详情
//! - PUT /admins/{id} - 更新管理员
//! - DELETE /admins/{id} - 删除管理员
//!
//! 权限要求：
//! - 所有接口需要 Bearer token 认证
//! - 口令入库前统一做 argon2 哈希，响应中不回传口令

use crate::AppState;
use crate::middleware::require_admin_context;
use crate::utils::response::{
    admin_to_dto, bad_request_error, conflict_error, internal_auth_error, not_found_error,
    storage_error,
};
use crate::utils::{normalize_optional, normalize_required};
use api_contract::{AdminDto, ApiResponse, CreateAdminRequest, UpdateAdminRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct AdminPath {
    admin_id: String,
}

/// 列出管理员
pub async fn list_admins(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.admin_store.list_admins().await {
        Ok(admins) => {
            let data: Vec<AdminDto> = admins.into_iter().map(admin_to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
        }
        Err(err) => storage_error(err),
    }
}

/// 创建管理员
pub async fn create_admin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateAdminRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let name = match normalize_required(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let email = match normalize_required(req.email, "email") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let password = match normalize_required(req.password, "password") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let password_hash = match etrack_auth::hash_password(&password) {
        Ok(hash) => hash,
        Err(err) => return internal_auth_error(err),
    };
    // 用户名（登录名）不允许重复
    match state.admin_store.find_by_username(&name).await {
        Ok(Some(_)) => return conflict_error("admin name already exists"),
        Ok(None) => {}
        Err(err) => return storage_error(err),
    }
    let record = etrack_storage::AdminRecord {
        admin_id: Uuid::new_v4().to_string(),
        name,
        email,
        password: password_hash,
        image: req.image,
        role: req.role.unwrap_or_else(|| "admin".to_string()),
        refresh_jti: None,
    };
    match state.admin_store.create_admin(record).await {
        Ok(admin) => (
            StatusCode::OK,
            Json(ApiResponse::success(admin_to_dto(admin))),
        )
            .into_response(),
        Err(err) => storage_error(err),
    }
}

/// 获取管理员详情
pub async fn get_admin(
    State(state): State<AppState>,
    Path(path): Path<AdminPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.admin_store.list_admins().await {
        Ok(admins) => match admins
            .into_iter()
            .find(|admin| admin.admin_id == path.admin_id)
        {
            Some(admin) => (
                StatusCode::OK,
                Json(ApiResponse::success(admin_to_dto(admin))),
            )
                .into_response(),
            None => not_found_error(),
        },
        Err(err) => storage_error(err),
    }
}

/// 更新管理员
pub async fn update_admin(
    State(state): State<AppState>,
    Path(path): Path<AdminPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateAdminRequest>,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    let name = match normalize_optional(req.name, "name") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let email = match normalize_optional(req.email, "email") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let password = match normalize_optional(req.password, "password") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let role = match normalize_optional(req.role, "role") {
        Ok(value) => value,
        Err(response) => return response,
    };
    if name.is_none()
        && email.is_none()
        && password.is_none()
        && req.image.is_none()
        && role.is_none()
    {
        return bad_request_error("empty update");
    }
    let password_hash = match password {
        Some(password) => match etrack_auth::hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(err) => return internal_auth_error(err),
        },
        None => None,
    };
    let update = etrack_storage::AdminUpdate {
        name,
        email,
        password_hash,
        image: req.image,
        role,
    };
    match state.admin_store.update_admin(&path.admin_id, update).await {
        Ok(Some(admin)) => (
            StatusCode::OK,
            Json(ApiResponse::success(admin_to_dto(admin))),
        )
            .into_response(),
        Ok(None) => not_found_error(),
        Err(err) => storage_error(err),
    }
}

/// 删除管理员
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(path): Path<AdminPath>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_admin_context(&state, &headers) {
        return response;
    }
    match state.admin_store.delete_admin(&path.admin_id).await {
        Ok(true) => (StatusCode::OK, Json(ApiResponse::success(()))).into_response(),
        Ok(false) => not_found_error(),
        Err(err) => storage_error(err),
    }
}
