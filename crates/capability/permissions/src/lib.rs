//! 有效权限解析引擎。
//!
//! 给定用户 ID，计算该用户当前在各设备上持有的权限，以及每个权限附带的
//! 电子签名要求（签名 / 复核授权 / 备注）。
//!
//! 控制流：调用方 → [`PermissionGraphLoader`]（只读）→ [`resolve_graph`]（纯计算）
//! → [`domain::PermissionSet`]。引擎不写入、不跨调用保留状态，可并发调用。
//!
//! 有效授予需同时满足：
//! - 用户持有该角色，且角色关联该区域
//! - 区域内存在该设备类型的设备，且设备类型标记为应用
//! - 授予值为 true
//!
//! 没有签名策略行的授予使用全 false 缺省值。悬空引用不报错，只是不匹配。

mod gate;
mod graph;
mod loader;
mod resolver;

use secadmin_storage::StorageError;

pub use gate::{AccessDenied, authorize};
pub use graph::{DeviceNameConflict, GrantKey, PermissionGraph, PolicyKey};
pub use loader::PermissionGraphLoader;
pub use resolver::{PermissionResolver, ResolvePermissions, resolve_graph};

/// 权限解析错误。
///
/// 用户不存在不是错误（见 `Ok(None)`）。
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
