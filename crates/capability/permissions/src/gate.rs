//! 鉴权检查（路由守卫、界面权限控制的共同入口）。

use domain::{PermissionSet, SignatureRequirements};
use secadmin_telemetry::record_authorization_denied;

/// 设备上未授予指定权限。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("permission {permission} not granted on device {device}")]
pub struct AccessDenied {
    pub device: String,
    pub permission: String,
}

/// 检查权限集是否允许在设备上执行指定权限。
///
/// 允许时返回该权限的签名要求，调用方据此收集签名、复核人或备注。
pub fn authorize(
    permissions: &PermissionSet,
    device: &str,
    permission: &str,
) -> Result<SignatureRequirements, AccessDenied> {
    match permissions.get(device, permission) {
        Some(granted) => Ok(granted.signatures),
        None => {
            record_authorization_denied();
            Err(AccessDenied {
                device: device.to_string(),
                permission: permission.to_string(),
            })
        }
    }
}
