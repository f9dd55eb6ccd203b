//! Postgres 目录存储实现
//!
//! 通过参数化 SQL 实现权限图查询。
//!
//! 设计要点：
//! - 关系行按 `position` 排序，保证遍历顺序稳定
//! - 设备类型的 `is_application` 过滤与权限定义连接在 SQL 中完成
//! - 不开启事务；需要时间点一致视图的调用方自行提供

use crate::error::StorageError;
use crate::models::{
    DeviceRecord, PermissionGrantRecord, RoleRecord, SignaturePolicyRecord, UserRecord,
    ZoneRecord,
};
use crate::traits::DirectoryStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgDirectoryStore {
    pub pool: PgPool,
}

impl PgDirectoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 通过数据库 URL 建立连接池
    ///
    /// # 参数
    /// - `database_url`：Postgres 连接字符串
    /// - `max_connections`：连接池上限
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = crate::connection::connect_pool(database_url, max_connections).await?;
        Ok(Self { pool })
    }
}

fn device_from_row(row: &PgRow) -> Result<DeviceRecord, StorageError> {
    Ok(DeviceRecord {
        device_id: row.try_get("device_id")?,
        zone_id: row.try_get("zone_id")?,
        device_type_id: row.try_get("device_type_id")?,
        name: row.try_get("name")?,
    })
}

fn grant_from_row(row: &PgRow) -> Result<PermissionGrantRecord, StorageError> {
    Ok(PermissionGrantRecord {
        zone_id: row.try_get("zone_id")?,
        device_type_id: row.try_get("device_type_id")?,
        role_id: row.try_get("role_id")?,
        permission_id: row.try_get("permission_id")?,
        permission_name: row.try_get("permission_name")?,
        granted: row.try_get("granted")?,
    })
}

#[async_trait::async_trait]
impl DirectoryStore for PgDirectoryStore {
    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>, StorageError> {
        let row = sqlx::query(
            "select user_id, username, display_name from users where user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(UserRecord {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            display_name: row.try_get("display_name")?,
        }))
    }

    async fn list_user_roles(&self, user_id: &str) -> Result<Vec<RoleRecord>, StorageError> {
        let rows = sqlx::query(
            "select r.role_id, r.name \
             from user_roles ur \
             join roles r on r.role_id = ur.role_id \
             where ur.user_id = $1 \
             order by ur.position asc",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut roles = Vec::with_capacity(rows.len());
        for row in rows {
            roles.push(RoleRecord {
                role_id: row.try_get("role_id")?,
                name: row.try_get("name")?,
            });
        }
        Ok(roles)
    }

    async fn list_role_zones(&self, role_id: &str) -> Result<Vec<ZoneRecord>, StorageError> {
        let rows = sqlx::query(
            "select z.zone_id, z.name \
             from role_zones rz \
             join zones z on z.zone_id = rz.zone_id \
             where rz.role_id = $1 \
             order by rz.position asc",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        let mut zones = Vec::with_capacity(rows.len());
        for row in rows {
            zones.push(ZoneRecord {
                zone_id: row.try_get("zone_id")?,
                name: row.try_get("name")?,
            });
        }
        Ok(zones)
    }

    async fn list_application_devices(
        &self,
        zone_id: &str,
    ) -> Result<Vec<DeviceRecord>, StorageError> {
        let rows = sqlx::query(
            "select d.device_id, d.zone_id, d.device_type_id, d.name \
             from devices d \
             join device_types t on t.device_type_id = d.device_type_id \
             where d.zone_id = $1 and t.is_application \
             order by d.position asc",
        )
        .bind(zone_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(device_from_row).collect()
    }

    async fn list_permission_grants(
        &self,
        zone_id: &str,
        device_type_id: &str,
        role_id: &str,
    ) -> Result<Vec<PermissionGrantRecord>, StorageError> {
        let rows = sqlx::query(
            "select g.zone_id, g.device_type_id, g.role_id, g.permission_id, \
                    p.name as permission_name, g.granted \
             from permission_grants g \
             join permission_definitions p \
               on p.permission_id = g.permission_id and p.device_type_id = g.device_type_id \
             where g.zone_id = $1 and g.device_type_id = $2 and g.role_id = $3 and g.granted \
             order by g.position asc",
        )
        .bind(zone_id)
        .bind(device_type_id)
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(grant_from_row).collect()
    }

    async fn find_signature_policy(
        &self,
        zone_id: &str,
        device_type_id: &str,
        permission_id: &str,
    ) -> Result<Option<SignaturePolicyRecord>, StorageError> {
        let row = sqlx::query(
            "select zone_id, device_type_id, permission_id, \
                    requires_signature, requires_authorization, requires_note \
             from signature_policies \
             where zone_id = $1 and device_type_id = $2 and permission_id = $3",
        )
        .bind(zone_id)
        .bind(device_type_id)
        .bind(permission_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(SignaturePolicyRecord {
            zone_id: row.try_get("zone_id")?,
            device_type_id: row.try_get("device_type_id")?,
            permission_id: row.try_get("permission_id")?,
            requires_signature: row.try_get("requires_signature")?,
            requires_authorization: row.try_get("requires_authorization")?,
            requires_note: row.try_get("requires_note")?,
        }))
    }
}
