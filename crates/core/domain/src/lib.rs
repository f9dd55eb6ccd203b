pub mod permission_set;

pub use permission_set::{Permission, PermissionSet, SignatureRequirements};

/// 已解析用户的有效权限（登录响应组装、请求级鉴权的输入）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPermissions {
    pub user_id: String,
    pub display_name: String,
    pub permissions: PermissionSet,
}

impl ResolvedPermissions {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            permissions,
        }
    }
}
