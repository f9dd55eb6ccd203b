//! 有效权限 handlers
//!
//! - GET /users/{user_id}/permissions - 解析用户的有效权限集
//! - GET /users/{user_id}/devices/{device}/permissions/{permission} - 鉴权检查
//!
//! 用户不存在返回 404，与"存在但没有权限"（200 + 空集合）区分。
//! 账户锁定、会话校验属于前置关卡，不在这里处理。

use crate::AppState;
use crate::utils::require_segment;
use crate::utils::response::{
    forbidden_error, not_found_error, resolve_error, resolved_to_dto, signatures_to_dto,
};
use api_contract::{ApiResponse, AuthorizationDto};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::ResolvedPermissions;
use secadmin_permissions::authorize;

#[derive(Debug, serde::Deserialize)]
pub struct UserPath {
    pub user_id: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct DevicePermissionPath {
    pub user_id: String,
    pub device: String,
    pub permission: String,
}

async fn resolve_user(state: &AppState, user_id: &str) -> Result<ResolvedPermissions, Response> {
    match state.resolver.resolve_permissions(user_id).await {
        Ok(Some(resolved)) => Ok(resolved),
        Ok(None) => Err(not_found_error(format!("user {user_id} not found"))),
        Err(err) => Err(resolve_error(err)),
    }
}

/// 解析用户有效权限
pub async fn get_user_permissions(
    State(state): State<AppState>,
    Path(path): Path<UserPath>,
) -> Response {
    let user_id = match require_segment(&path.user_id, "user_id") {
        Ok(value) => value,
        Err(response) => return response,
    };
    match resolve_user(&state, &user_id).await {
        Ok(resolved) => {
            (StatusCode::OK, Json(ApiResponse::success(resolved_to_dto(resolved)))).into_response()
        }
        Err(response) => response,
    }
}

/// 鉴权检查
///
/// 允许时返回该权限的签名要求；未授予返回 403。
pub async fn check_device_permission(
    State(state): State<AppState>,
    Path(path): Path<DevicePermissionPath>,
) -> Response {
    let user_id = match require_segment(&path.user_id, "user_id") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let device = match require_segment(&path.device, "device") {
        Ok(value) => value,
        Err(response) => return response,
    };
    let permission = match require_segment(&path.permission, "permission") {
        Ok(value) => value,
        Err(response) => return response,
    };

    let resolved = match resolve_user(&state, &user_id).await {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };
    match authorize(&resolved.permissions, &device, &permission) {
        Ok(signatures) => {
            let dto = AuthorizationDto {
                user_id,
                device,
                permission,
                signatures: signatures_to_dto(signatures),
            };
            (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
        }
        Err(denied) => forbidden_error(denied),
    }
}
