//! 解析计数快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use secadmin_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            resolutions: snapshot.resolutions,
            resolutions_not_found: snapshot.resolutions_not_found,
            resolution_failures: snapshot.resolution_failures,
            device_name_conflicts: snapshot.device_name_conflicts,
            authorization_denied: snapshot.authorization_denied,
            resolve_latency_ms_total: snapshot.resolve_latency_ms_total,
            resolve_latency_ms_count: snapshot.resolve_latency_ms_count,
        })),
    )
        .into_response()
}
