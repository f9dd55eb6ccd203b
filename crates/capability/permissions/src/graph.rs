//! 权限子图快照。
//!
//! 一次解析加载一次，之后只读。所有嵌套查询在这里变成按键元组的显式查表：
//! - 角色 → 区域
//! - 区域 → 应用设备
//! - (区域, 设备类型, 角色) → 授予
//! - (区域, 设备类型, 权限定义) → 签名要求

use domain::SignatureRequirements;
use secadmin_storage::{DeviceRecord, PermissionGrantRecord, RoleRecord, UserRecord, ZoneRecord};
use std::collections::{BTreeMap, HashMap};

/// 授予查表键。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantKey {
    pub zone_id: String,
    pub device_type_id: String,
    pub role_id: String,
}

impl GrantKey {
    pub fn new(zone_id: &str, device_type_id: &str, role_id: &str) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            device_type_id: device_type_id.to_string(),
            role_id: role_id.to_string(),
        }
    }
}

/// 签名策略查表键（与角色无关）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyKey {
    pub zone_id: String,
    pub device_type_id: String,
    pub permission_id: String,
}

impl PolicyKey {
    pub fn new(zone_id: &str, device_type_id: &str, permission_id: &str) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            device_type_id: device_type_id.to_string(),
            permission_id: permission_id.to_string(),
        }
    }
}

/// 同一设备名对应多个设备实例（数据质量问题）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNameConflict {
    pub device_name: String,
    pub device_ids: Vec<String>,
}

/// 用户的权限子图。
#[derive(Debug, Clone)]
pub struct PermissionGraph {
    user: UserRecord,
    roles: Vec<RoleRecord>,
    role_zones: HashMap<String, Vec<ZoneRecord>>,
    zone_devices: HashMap<String, Vec<DeviceRecord>>,
    grants: HashMap<GrantKey, Vec<PermissionGrantRecord>>,
    // None 表示已查询但没有策略行
    policies: HashMap<PolicyKey, Option<SignatureRequirements>>,
}

impl PermissionGraph {
    pub fn new(user: UserRecord) -> Self {
        Self {
            user,
            roles: Vec::new(),
            role_zones: HashMap::new(),
            zone_devices: HashMap::new(),
            grants: HashMap::new(),
            policies: HashMap::new(),
        }
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// 按遍历顺序的角色。
    pub fn roles(&self) -> &[RoleRecord] {
        &self.roles
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|role| role.role_id == role_id)
    }

    /// 追加角色及其关联区域；重复的角色忽略。
    pub fn push_role(&mut self, role: RoleRecord, zones: Vec<ZoneRecord>) {
        if self.has_role(&role.role_id) {
            return;
        }
        self.role_zones.insert(role.role_id.clone(), zones);
        self.roles.push(role);
    }

    pub fn zones_for(&self, role_id: &str) -> &[ZoneRecord] {
        self.role_zones
            .get(role_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_zone(&self, zone_id: &str) -> bool {
        self.zone_devices.contains_key(zone_id)
    }

    pub fn set_zone_devices(&mut self, zone_id: &str, devices: Vec<DeviceRecord>) {
        self.zone_devices.insert(zone_id.to_string(), devices);
    }

    /// 区域内的应用设备。
    pub fn devices_in(&self, zone_id: &str) -> &[DeviceRecord] {
        self.zone_devices
            .get(zone_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 区域内出现的设备类型（去重，保持首次出现顺序）。
    pub fn device_types_in(&self, zone_id: &str) -> Vec<&str> {
        let mut device_types: Vec<&str> = Vec::new();
        for device in self.devices_in(zone_id) {
            if !device_types.contains(&device.device_type_id.as_str()) {
                device_types.push(&device.device_type_id);
            }
        }
        device_types
    }

    pub fn has_grants(&self, key: &GrantKey) -> bool {
        self.grants.contains_key(key)
    }

    pub fn set_grants(&mut self, key: GrantKey, grants: Vec<PermissionGrantRecord>) {
        self.grants.insert(key, grants);
    }

    pub fn grants_for(
        &self,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
    ) -> &[PermissionGrantRecord] {
        self.grants
            .get(&GrantKey::new(zone_id, device_type_id, role_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_signature_policy(&self, key: &PolicyKey) -> bool {
        self.policies.contains_key(key)
    }

    /// 记录签名策略查询结果（`None` 表示没有策略行）。
    pub fn set_signature_policy(&mut self, key: PolicyKey, policy: Option<SignatureRequirements>) {
        self.policies.insert(key, policy);
    }

    /// 签名要求；没有策略行时为全 false。
    pub fn signature_requirements(
        &self,
        zone_id: &str,
        device_type_id: &str,
        permission_id: &str,
    ) -> SignatureRequirements {
        self.policies
            .get(&PolicyKey::new(zone_id, device_type_id, permission_id))
            .copied()
            .flatten()
            .unwrap_or_default()
    }

    /// 已加载区域中同名但不同实例的设备，按设备名排序。
    pub fn device_name_conflicts(&self) -> Vec<DeviceNameConflict> {
        let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for devices in self.zone_devices.values() {
            for device in devices {
                let ids = by_name.entry(device.name.as_str()).or_default();
                if !ids.contains(&device.device_id.as_str()) {
                    ids.push(&device.device_id);
                }
            }
        }
        by_name
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, mut ids)| {
                ids.sort_unstable();
                DeviceNameConflict {
                    device_name: name.to_string(),
                    device_ids: ids.into_iter().map(str::to_string).collect(),
                }
            })
            .collect()
    }
}
