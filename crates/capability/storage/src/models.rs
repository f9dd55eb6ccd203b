//! 数据模型
//!
//! 目录存储中与权限解析相关的记录（引擎只读）：
//! - 身份：UserRecord, RoleRecord
//! - 作用域：ZoneRecord
//! - 设备：DeviceTypeRecord, DeviceRecord
//! - 权限事实：PermissionDefinitionRecord, PermissionGrantRecord, SignaturePolicyRecord

use domain::SignatureRequirements;

/// 用户记录。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
}

/// 角色记录。
#[derive(Debug, Clone)]
pub struct RoleRecord {
    pub role_id: String,
    pub name: String,
}

/// 区域记录（产线/车间等作用域边界）。
#[derive(Debug, Clone)]
pub struct ZoneRecord {
    pub zone_id: String,
    pub name: String,
}

/// 设备类型（设备定义）。
///
/// 仅 `is_application = true` 的类型参与应用级权限。
#[derive(Debug, Clone)]
pub struct DeviceTypeRecord {
    pub device_type_id: String,
    pub name: String,
    pub is_application: bool,
}

/// 设备实例，位于且仅位于一个区域。
#[derive(Debug, Clone)]
pub struct DeviceRecord {
    pub device_id: String,
    pub zone_id: String,
    pub device_type_id: String,
    /// 输出分组键（跨区域唯一性由数据保证，引擎不强制）
    pub name: String,
}

/// 权限定义，归属于某个设备类型。
#[derive(Debug, Clone)]
pub struct PermissionDefinitionRecord {
    pub permission_id: String,
    pub device_type_id: String,
    pub name: String,
}

/// 权限授予：(区域, 设备类型, 角色, 权限定义) → bool。
///
/// 查询结果已连接权限定义，附带权限名。
#[derive(Debug, Clone)]
pub struct PermissionGrantRecord {
    pub zone_id: String,
    pub device_type_id: String,
    pub role_id: String,
    pub permission_id: String,
    pub permission_name: String,
    pub granted: bool,
}

/// 签名策略：(区域, 设备类型, 权限定义) → 三个布尔标志，与角色无关。
#[derive(Debug, Clone)]
pub struct SignaturePolicyRecord {
    pub zone_id: String,
    pub device_type_id: String,
    pub permission_id: String,
    pub requires_signature: bool,
    pub requires_authorization: bool,
    pub requires_note: bool,
}

impl SignaturePolicyRecord {
    pub fn requirements(&self) -> SignatureRequirements {
        SignatureRequirements::new(
            self.requires_signature,
            self.requires_authorization,
            self.requires_note,
        )
    }
}
