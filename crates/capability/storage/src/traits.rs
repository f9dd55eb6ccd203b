//! 存储接口 Trait 定义
//!
//! 目录存储是外部协作方，负责写入与一致性；
//! 权限引擎只通过 DirectoryStore 读取所需的连通子图。
//!
//! 设计原则：
//! - 只读，无副作用
//! - 所有接口返回 StorageError，故障不重试
//! - 列表按稳定顺序返回（解析的首写优先规则依赖该顺序）
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    DeviceRecord, PermissionGrantRecord, RoleRecord, SignaturePolicyRecord, UserRecord,
    ZoneRecord,
};
use async_trait::async_trait;

/// 目录存储接口（权限图加载所需的查询）。
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// 按 ID 查找用户（零个或一个）
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError>;

    /// 用户持有的角色
    async fn list_user_roles(&self, user_id: &str) -> Result<Vec<RoleRecord>, StorageError>;

    /// 角色关联的区域
    async fn list_role_zones(&self, role_id: &str) -> Result<Vec<ZoneRecord>, StorageError>;

    /// 区域内设备类型标记为应用的设备
    async fn list_application_devices(
        &self,
        zone_id: &str,
    ) -> Result<Vec<DeviceRecord>, StorageError>;

    /// 匹配 (区域, 设备类型, 角色) 且值为 true 的权限授予
    ///
    /// 权限定义缺失或不属于该设备类型的授予不返回。
    async fn list_permission_grants(
        &self,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
    ) -> Result<Vec<PermissionGrantRecord>, StorageError>;

    /// 匹配 (区域, 设备类型, 权限定义) 的签名策略
    async fn find_signature_policy(
        &self,
        zone_id: &str,
        device_type_id: &str,
        permission_id: &str,
    ) -> Result<Option<SignaturePolicyRecord>, StorageError>;
}
