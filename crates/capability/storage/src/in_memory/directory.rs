//! 目录内存存储实现
//!
//! 用于本地演示和测试。
//!
//! 功能：
//! - 以插入顺序保存关系行，查询结果顺序稳定
//! - 授予与签名策略按键覆盖写入（同一键只有一行）
//! - 悬空引用（缺失的角色、区域、设备类型、权限定义）在查询时静默跳过

use crate::error::StorageError;
use crate::models::{
    DeviceRecord, DeviceTypeRecord, PermissionDefinitionRecord, PermissionGrantRecord, RoleRecord,
    SignaturePolicyRecord, UserRecord, ZoneRecord,
};
use crate::traits::DirectoryStore;
use std::sync::RwLock;

/// 授予原始行（未连接权限定义）。
#[derive(Debug, Clone)]
struct GrantRow {
    zone_id: String,
    device_type_id: String,
    role_id: String,
    permission_id: String,
    granted: bool,
}

#[derive(Debug, Clone, Default)]
struct DirectoryData {
    users: Vec<UserRecord>,
    roles: Vec<RoleRecord>,
    user_roles: Vec<(String, String)>,
    zones: Vec<ZoneRecord>,
    role_zones: Vec<(String, String)>,
    device_types: Vec<DeviceTypeRecord>,
    devices: Vec<DeviceRecord>,
    definitions: Vec<PermissionDefinitionRecord>,
    grants: Vec<GrantRow>,
    policies: Vec<SignaturePolicyRecord>,
}

/// 目录内存存储
///
/// 使用 RwLock 提供线程安全的只读快照；通过 [`DirectoryBuilder`] 构造。
pub struct InMemoryDirectoryStore {
    data: RwLock<DirectoryData>,
}

impl InMemoryDirectoryStore {
    pub fn builder() -> DirectoryBuilder {
        DirectoryBuilder::default()
    }

    /// 空目录
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// 内置演示目录
    ///
    /// - 用户 alice 持有角色 Operator
    /// - Operator 关联区域 Line1
    /// - Line1 内有 Oven1（OvenController，应用设备）与 Panel1（DisplayPanel，非应用设备）
    /// - StartProcess 需要签名与备注
    pub fn with_demo_directory() -> Self {
        let mut builder = Self::builder();
        builder
            .user("alice", "alice", "Alice Operator")
            .role("operator", "Operator")
            .assign_role("alice", "operator")
            .zone("line1", "Line1")
            .link_zone("operator", "line1")
            .device_type("oven-controller", "OvenController", true)
            .device_type("display-panel", "DisplayPanel", false)
            .device("oven-1", "line1", "oven-controller", "Oven1")
            .device("panel-1", "line1", "display-panel", "Panel1")
            .permission_definition("start-process", "oven-controller", "StartProcess")
            .permission_definition("dim-screen", "display-panel", "DimScreen")
            .grant("line1", "oven-controller", "operator", "start-process", true)
            .grant("line1", "display-panel", "operator", "dim-screen", true)
            .signature_policy("line1", "oven-controller", "start-process", true, false, true);
        builder.build()
    }
}

impl Default for InMemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 内存目录构造器（仅负责写入，读取全部经由 DirectoryStore）。
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    data: DirectoryData,
}

impl DirectoryBuilder {
    pub fn user(&mut self, user_id: &str, username: &str, display_name: &str) -> &mut Self {
        self.data.users.push(UserRecord {
            user_id: user_id.to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
        });
        self
    }

    pub fn role(&mut self, role_id: &str, name: &str) -> &mut Self {
        self.data.roles.push(RoleRecord {
            role_id: role_id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn assign_role(&mut self, user_id: &str, role_id: &str) -> &mut Self {
        push_link(&mut self.data.user_roles, user_id, role_id);
        self
    }

    pub fn zone(&mut self, zone_id: &str, name: &str) -> &mut Self {
        self.data.zones.push(ZoneRecord {
            zone_id: zone_id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn link_zone(&mut self, role_id: &str, zone_id: &str) -> &mut Self {
        push_link(&mut self.data.role_zones, role_id, zone_id);
        self
    }

    pub fn device_type(
        &mut self,
        device_type_id: &str,
        name: &str,
        is_application: bool,
    ) -> &mut Self {
        self.data.device_types.push(DeviceTypeRecord {
            device_type_id: device_type_id.to_string(),
            name: name.to_string(),
            is_application,
        });
        self
    }

    pub fn device(
        &mut self,
        device_id: &str,
        zone_id: &str,
        device_type_id: &str,
        name: &str,
    ) -> &mut Self {
        self.data.devices.push(DeviceRecord {
            device_id: device_id.to_string(),
            zone_id: zone_id.to_string(),
            device_type_id: device_type_id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn permission_definition(
        &mut self,
        permission_id: &str,
        device_type_id: &str,
        name: &str,
    ) -> &mut Self {
        self.data.definitions.push(PermissionDefinitionRecord {
            permission_id: permission_id.to_string(),
            device_type_id: device_type_id.to_string(),
            name: name.to_string(),
        });
        self
    }

    /// 写入授予事实；同一 (区域, 设备类型, 角色, 权限) 覆盖原值并保留原位置。
    pub fn grant(
        &mut self,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
        permission_id: &str,
        granted: bool,
    ) -> &mut Self {
        let existing = self.data.grants.iter_mut().find(|row| {
            row.zone_id == zone_id
                && row.device_type_id == device_type_id
                && row.role_id == role_id
                && row.permission_id == permission_id
        });
        match existing {
            Some(row) => row.granted = granted,
            None => self.data.grants.push(GrantRow {
                zone_id: zone_id.to_string(),
                device_type_id: device_type_id.to_string(),
                role_id: role_id.to_string(),
                permission_id: permission_id.to_string(),
                granted,
            }),
        }
        self
    }

    /// 写入签名策略；同一 (区域, 设备类型, 权限) 覆盖原值。
    pub fn signature_policy(
        &mut self,
        zone_id: &str,
        device_type_id: &str,
        permission_id: &str,
        requires_signature: bool,
        requires_authorization: bool,
        requires_note: bool,
    ) -> &mut Self {
        let record = SignaturePolicyRecord {
            zone_id: zone_id.to_string(),
            device_type_id: device_type_id.to_string(),
            permission_id: permission_id.to_string(),
            requires_signature,
            requires_authorization,
            requires_note,
        };
        let existing = self.data.policies.iter_mut().find(|row| {
            row.zone_id == zone_id
                && row.device_type_id == device_type_id
                && row.permission_id == permission_id
        });
        match existing {
            Some(row) => *row = record,
            None => self.data.policies.push(record),
        }
        self
    }

    pub fn build(&mut self) -> InMemoryDirectoryStore {
        InMemoryDirectoryStore {
            data: RwLock::new(std::mem::take(&mut self.data)),
        }
    }
}

fn push_link(links: &mut Vec<(String, String)>, from: &str, to: &str) {
    if links.iter().any(|(left, right)| left == from && right == to) {
        return;
    }
    links.push((from.to_string(), to.to_string()));
}

#[async_trait::async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError> {
        let data = self.data.read()?;
        Ok(data
            .users
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned())
    }

    async fn list_user_roles(&self, user_id: &str) -> Result<Vec<RoleRecord>, StorageError> {
        let data = self.data.read()?;
        let roles = data
            .user_roles
            .iter()
            .filter(|(user, _)| user == user_id)
            .filter_map(|(_, role_id)| data.roles.iter().find(|role| &role.role_id == role_id))
            .cloned()
            .collect();
        Ok(roles)
    }

    async fn list_role_zones(&self, role_id: &str) -> Result<Vec<ZoneRecord>, StorageError> {
        let data = self.data.read()?;
        let zones = data
            .role_zones
            .iter()
            .filter(|(role, _)| role == role_id)
            .filter_map(|(_, zone_id)| data.zones.iter().find(|zone| &zone.zone_id == zone_id))
            .cloned()
            .collect();
        Ok(zones)
    }

    async fn list_application_devices(
        &self,
        zone_id: &str,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let data = self.data.read()?;
        let devices = data
            .devices
            .iter()
            .filter(|device| device.zone_id == zone_id)
            .filter(|device| {
                data.device_types.iter().any(|device_type| {
                    device_type.device_type_id == device.device_type_id
                        && device_type.is_application
                })
            })
            .cloned()
            .collect();
        Ok(devices)
    }

    async fn list_permission_grants(
        &self,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
    ) -> Result<Vec<PermissionGrantRecord>, StorageError> {
        let data = self.data.read()?;
        let grants = data
            .grants
            .iter()
            .filter(|row| {
                row.granted
                    && row.zone_id == zone_id
                    && row.device_type_id == device_type_id
                    && row.role_id == role_id
            })
            .filter_map(|row| {
                let definition = data.definitions.iter().find(|definition| {
                    definition.permission_id == row.permission_id
                        && definition.device_type_id == row.device_type_id
                })?;
                Some(PermissionGrantRecord {
                    zone_id: row.zone_id.clone(),
                    device_type_id: row.device_type_id.clone(),
                    role_id: row.role_id.clone(),
                    permission_id: row.permission_id.clone(),
                    permission_name: definition.name.clone(),
                    granted: row.granted,
                })
            })
            .collect();
        Ok(grants)
    }

    async fn find_signature_policy(
        &self,
        zone_id: &str,
        device_type_id: &str,
        permission_id: &str,
    ) -> Result<Option<SignaturePolicyRecord>, StorageError> {
        let data = self.data.read()?;
        Ok(data
            .policies
            .iter()
            .find(|policy| {
                policy.zone_id == zone_id
                    && policy.device_type_id == device_type_id
                    && policy.permission_id == permission_id
            })
            .cloned())
    }
}
