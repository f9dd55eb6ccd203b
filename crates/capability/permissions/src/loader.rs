//! 权限图加载器。
//!
//! 给定用户 ID，从目录存储读取解析所需的最小连通子图：
//! 用户 → 角色 → 区域 → 应用设备 → (区域, 设备类型, 角色) 授予 → 签名策略。
//!
//! 同一区域的设备、同一键的授予与签名策略只查询一次。
//! 纯读取；存储故障原样返回，不重试。

use crate::graph::{GrantKey, PermissionGraph, PolicyKey};
use secadmin_storage::{DirectoryStore, StorageError};
use std::sync::Arc;

pub struct PermissionGraphLoader {
    store: Arc<dyn DirectoryStore>,
}

impl PermissionGraphLoader {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// 加载用户的权限子图；用户不存在时返回 `None`。
    pub async fn load(&self, user_id: &str) -> Result<Option<PermissionGraph>, StorageError> {
        let Some(user) = self.store.find_user(user_id).await? else {
            return Ok(None);
        };
        let mut graph = PermissionGraph::new(user);

        for role in self.store.list_user_roles(user_id).await? {
            if graph.has_role(&role.role_id) {
                continue;
            }
            let zones = self.store.list_role_zones(&role.role_id).await?;
            for zone in &zones {
                if !graph.has_zone(&zone.zone_id) {
                    let devices = self.store.list_application_devices(&zone.zone_id).await?;
                    graph.set_zone_devices(&zone.zone_id, devices);
                }
                let device_types: Vec<String> = graph
                    .device_types_in(&zone.zone_id)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                for device_type_id in device_types {
                    self.load_grants(&mut graph, &zone.zone_id, &device_type_id, &role.role_id)
                        .await?;
                }
            }
            graph.push_role(role, zones);
        }

        Ok(Some(graph))
    }

    async fn load_grants(
        &self,
        graph: &mut PermissionGraph,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
    ) -> Result<(), StorageError> {
        let key = GrantKey::new(zone_id, device_type_id, role_id);
        if graph.has_grants(&key) {
            return Ok(());
        }
        let grants = self
            .store
            .list_permission_grants(zone_id, device_type_id, role_id)
            .await?;
        for grant in &grants {
            let policy_key = PolicyKey::new(zone_id, device_type_id, &grant.permission_id);
            if graph.has_signature_policy(&policy_key) {
                continue;
            }
            let policy = self
                .store
                .find_signature_policy(zone_id, device_type_id, &grant.permission_id)
                .await?;
            graph.set_signature_policy(policy_key, policy.map(|record| record.requirements()));
        }
        graph.set_grants(key, grants);
        Ok(())
    }
}
