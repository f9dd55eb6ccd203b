//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 标准 API 响应封装。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 电子签名要求。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturesDto {
    pub signature: bool,
    pub authorization: bool,
    pub note: bool,
}

/// 设备上的单个权限。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDto {
    pub name: String,
    pub signatures: SignaturesDto,
}

/// 用户有效权限（登录响应与前端权限控制使用）。
///
/// `permissions` 以设备名为键，列表保持授予顺序。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissionsDto {
    pub user_id: String,
    pub display_name: String,
    pub permissions: BTreeMap<String, Vec<PermissionDto>>,
}

/// 鉴权检查结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationDto {
    pub user_id: String,
    pub device: String,
    pub permission: String,
    pub signatures: SignaturesDto,
}

/// 解析计数快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub resolutions: u64,
    pub resolutions_not_found: u64,
    pub resolution_failures: u64,
    pub device_name_conflicts: u64,
    pub authorization_denied: u64,
    pub resolve_latency_ms_total: u64,
    pub resolve_latency_ms_count: u64,
}
