//! 路由定义
//!
//! - 健康检查：/health
//! - 有效权限：/users/{user_id}/permissions
//! - 鉴权检查：/users/{user_id}/devices/{device}/permissions/{permission}
//! - 解析计数：/metrics

use super::AppState;
use super::handlers::*;
use axum::{Router, routing::get};

/// 创建 API 路由（挂载在 /api 下）
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/permissions", get(get_user_permissions))
        .route(
            "/users/:user_id/devices/:device/permissions/:permission",
            get(check_device_permission),
        )
        .route("/metrics", get(get_metrics))
}
