//! 有效权限解析。
//!
//! 遍历顺序固定为 角色 → 区域 → 设备 → 授予。
//! 同一设备名下同名权限首写优先：第一次遇到的授予决定记录的签名要求，
//! 之后的重复直接丢弃，不做合并。

use crate::ResolveError;
use crate::graph::PermissionGraph;
use crate::loader::PermissionGraphLoader;
use async_trait::async_trait;
use domain::{Permission, PermissionSet, ResolvedPermissions};
use secadmin_storage::DirectoryStore;
use secadmin_telemetry::{
    record_device_name_conflicts, record_resolution, record_resolution_failure,
    record_resolution_not_found, record_resolve_latency_ms,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// 在已加载的子图上计算权限集（纯计算）。
pub fn resolve_graph(graph: &PermissionGraph) -> PermissionSet {
    let mut permissions = PermissionSet::new();
    for role in graph.roles() {
        for zone in graph.zones_for(&role.role_id) {
            for device in graph.devices_in(&zone.zone_id) {
                let grants =
                    graph.grants_for(&zone.zone_id, &device.device_type_id, &role.role_id);
                for grant in grants.iter().filter(|grant| grant.granted) {
                    let signatures = graph.signature_requirements(
                        &zone.zone_id,
                        &device.device_type_id,
                        &grant.permission_id,
                    );
                    permissions.insert_first(
                        &device.name,
                        Permission::new(grant.permission_name.clone(), signatures),
                    );
                }
            }
        }
    }
    permissions
}

/// 权限解析器：图加载 + 解析，每次调用相互独立、不保留状态。
pub struct PermissionResolver {
    loader: PermissionGraphLoader,
    warn_device_name_conflicts: bool,
}

impl PermissionResolver {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            loader: PermissionGraphLoader::new(store),
            warn_device_name_conflicts: true,
        }
    }

    /// 是否对设备名冲突输出告警日志（计数不受影响）。
    pub fn with_conflict_warnings(mut self, enabled: bool) -> Self {
        self.warn_device_name_conflicts = enabled;
        self
    }

    /// 解析用户的有效权限。
    ///
    /// - `Ok(None)`：用户不存在
    /// - `Ok(Some(_))`：用户存在，权限集可能为空
    /// - `Err(_)`：存储故障
    pub async fn resolve(&self, user_id: &str) -> Result<Option<ResolvedPermissions>, ResolveError> {
        let started = Instant::now();
        let graph = match self.loader.load(user_id).await {
            Ok(Some(graph)) => graph,
            Ok(None) => {
                record_resolution_not_found();
                debug!(user_id = %user_id, "user not found");
                return Ok(None);
            }
            Err(err) => {
                record_resolution_failure();
                warn!(user_id = %user_id, error = %err, "permission graph load failed");
                return Err(err.into());
            }
        };

        self.report_conflicts(&graph);
        let permissions = resolve_graph(&graph);

        record_resolution();
        record_resolve_latency_ms(started.elapsed().as_millis() as u64);
        debug!(
            user_id = %user_id,
            devices = permissions.len(),
            permissions = permissions.permission_count(),
            "permissions resolved"
        );

        let user = graph.user();
        let display_name = if user.display_name.is_empty() {
            user.username.clone()
        } else {
            user.display_name.clone()
        };
        Ok(Some(ResolvedPermissions::new(
            user.user_id.clone(),
            display_name,
            permissions,
        )))
    }

    fn report_conflicts(&self, graph: &PermissionGraph) {
        let conflicts = graph.device_name_conflicts();
        if conflicts.is_empty() {
            return;
        }
        record_device_name_conflicts(conflicts.len() as u64);
        if !self.warn_device_name_conflicts {
            return;
        }
        for conflict in &conflicts {
            warn!(
                user_id = %graph.user().user_id,
                device_name = %conflict.device_name,
                device_ids = ?conflict.device_ids,
                "device name shared by multiple devices, permissions merged by name"
            );
        }
    }
}

/// 权限解析能力 trait，便于替换实现与测试。
#[async_trait]
pub trait ResolvePermissions: Send + Sync {
    async fn resolve_permissions(
        &self,
        user_id: &str,
    ) -> Result<Option<ResolvedPermissions>, ResolveError>;
}

#[async_trait]
impl ResolvePermissions for PermissionResolver {
    async fn resolve_permissions(
        &self,
        user_id: &str,
    ) -> Result<Option<ResolvedPermissions>, ResolveError> {
        self.resolve(user_id).await
    }
}
