//! 有效权限集（解析引擎的输出模型）。
//!
//! 按设备名分组，每个设备下是有序、按权限名去重的权限列表：
//! - 设备层比较与顺序无关（BTreeMap）
//! - 设备内列表保持首次写入顺序，同名权限只保留第一次

use std::collections::BTreeMap;

/// 电子签名要求（签名 / 复核授权 / 备注）。
///
/// 与角色无关，由 (区域, 设备类型, 权限定义) 决定；缺省全部为 false。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignatureRequirements {
    pub signature: bool,
    pub authorization: bool,
    pub note: bool,
}

impl SignatureRequirements {
    pub fn new(signature: bool, authorization: bool, note: bool) -> Self {
        Self {
            signature,
            authorization,
            note,
        }
    }

    /// 是否需要任何签名控制。
    pub fn any(&self) -> bool {
        self.signature || self.authorization || self.note
    }
}

/// 单个已授予的权限。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub name: String,
    pub signatures: SignatureRequirements,
}

impl Permission {
    pub fn new(name: impl Into<String>, signatures: SignatureRequirements) -> Self {
        Self {
            name: name.into(),
            signatures,
        }
    }
}

/// 用户的有效权限集。
///
/// 空集合是合法结果（用户存在但没有任何有效权限），
/// 与"用户不存在"由调用方区分（见 `Option<PermissionSet>`）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    devices: BTreeMap<String, Vec<Permission>>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 首写优先插入。
    ///
    /// 设备下已有同名权限时跳过并返回 false，已记录的签名要求不会被覆盖。
    pub fn insert_first(&mut self, device_name: &str, permission: Permission) -> bool {
        let bucket = self.devices.entry(device_name.to_string()).or_default();
        if bucket.iter().any(|existing| existing.name == permission.name) {
            return false;
        }
        bucket.push(permission);
        true
    }

    /// 指定设备的权限列表（按授予顺序）。
    pub fn permissions_for(&self, device_name: &str) -> Option<&[Permission]> {
        self.devices.get(device_name).map(Vec::as_slice)
    }

    /// 查找设备上的指定权限。
    pub fn get(&self, device_name: &str, permission_name: &str) -> Option<&Permission> {
        self.devices
            .get(device_name)?
            .iter()
            .find(|permission| permission.name == permission_name)
    }

    pub fn contains(&self, device_name: &str, permission_name: &str) -> bool {
        self.get(device_name, permission_name).is_some()
    }

    pub fn device_names(&self) -> impl Iterator<Item = &str> {
        self.devices.keys().map(String::as_str)
    }

    /// 设备数量。
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// 所有设备上的权限总数。
    pub fn permission_count(&self) -> usize {
        self.devices.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Permission])> {
        self.devices
            .iter()
            .map(|(device, permissions)| (device.as_str(), permissions.as_slice()))
    }
}

impl IntoIterator for PermissionSet {
    type Item = (String, Vec<Permission>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<Permission>>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.into_iter()
    }
}
