//! 追踪、请求 ID 与权限解析计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 解析计数快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub resolutions: u64,
    pub resolutions_not_found: u64,
    pub resolution_failures: u64,
    pub device_name_conflicts: u64,
    pub authorization_denied: u64,
    pub resolve_latency_ms_total: u64,
    pub resolve_latency_ms_count: u64,
}

/// 进程级解析计数。
pub struct TelemetryMetrics {
    resolutions: AtomicU64,
    resolutions_not_found: AtomicU64,
    resolution_failures: AtomicU64,
    device_name_conflicts: AtomicU64,
    authorization_denied: AtomicU64,
    resolve_latency_ms_total: AtomicU64,
    resolve_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            resolutions: AtomicU64::new(0),
            resolutions_not_found: AtomicU64::new(0),
            resolution_failures: AtomicU64::new(0),
            device_name_conflicts: AtomicU64::new(0),
            authorization_denied: AtomicU64::new(0),
            resolve_latency_ms_total: AtomicU64::new(0),
            resolve_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolutions: self.resolutions.load(Ordering::Relaxed),
            resolutions_not_found: self.resolutions_not_found.load(Ordering::Relaxed),
            resolution_failures: self.resolution_failures.load(Ordering::Relaxed),
            device_name_conflicts: self.device_name_conflicts.load(Ordering::Relaxed),
            authorization_denied: self.authorization_denied.load(Ordering::Relaxed),
            resolve_latency_ms_total: self.resolve_latency_ms_total.load(Ordering::Relaxed),
            resolve_latency_ms_count: self.resolve_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info，可用 RUST_LOG 覆盖）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录一次成功解析（用户存在）。
pub fn record_resolution() {
    metrics().resolutions.fetch_add(1, Ordering::Relaxed);
}

/// 记录用户不存在。
pub fn record_resolution_not_found() {
    metrics()
        .resolutions_not_found
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录存储故障导致的解析失败。
pub fn record_resolution_failure() {
    metrics()
        .resolution_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录设备名冲突（同名设备对应多个设备实例）。
pub fn record_device_name_conflicts(count: u64) {
    metrics()
        .device_name_conflicts
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录鉴权拒绝。
pub fn record_authorization_denied() {
    metrics()
        .authorization_denied
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录解析耗时（毫秒，含图加载）。
pub fn record_resolve_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .resolve_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .resolve_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
