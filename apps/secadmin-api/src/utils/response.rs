//! HTTP 响应辅助函数和 DTO 转换
//!
//! 提供统一的错误响应构造函数和 DTO 转换函数：
//! - 错误响应：forbidden_error, bad_request_error, not_found_error, resolve_error
//! - DTO 转换：signatures_to_dto, resolved_to_dto
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码对应。

use api_contract::{ApiResponse, PermissionDto, SignaturesDto, UserPermissionsDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{ResolvedPermissions, SignatureRequirements};
use secadmin_permissions::{AccessDenied, ResolveError};

/// 禁止访问错误响应
pub fn forbidden_error(denied: AccessDenied) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ApiResponse::<()>::error("AUTH.FORBIDDEN", denied.to_string())),
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
pub fn not_found_error(message: impl Into<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", message.into())),
    )
        .into_response()
}

/// 解析错误响应（存储故障）
pub fn resolve_error(err: ResolveError) -> Response {
    let message = err.to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
    )
        .into_response()
}

/// SignatureRequirements 转 SignaturesDto
pub fn signatures_to_dto(signatures: SignatureRequirements) -> SignaturesDto {
    SignaturesDto {
        signature: signatures.signature,
        authorization: signatures.authorization,
        note: signatures.note,
    }
}

/// ResolvedPermissions 转 UserPermissionsDto
pub fn resolved_to_dto(resolved: ResolvedPermissions) -> UserPermissionsDto {
    let permissions = resolved
        .permissions
        .into_iter()
        .map(|(device, permissions)| {
            let permissions = permissions
                .into_iter()
                .map(|permission| PermissionDto {
                    name: permission.name,
                    signatures: signatures_to_dto(permission.signatures),
                })
                .collect();
            (device, permissions)
        })
        .collect();
    UserPermissionsDto {
        user_id: resolved.user_id,
        display_name: resolved.display_name,
        permissions,
    }
}
