//! # SecAdmin Storage 模块
//!
//! 目录存储（Directory Store）抽象层：权限解析引擎通过它读取用户、角色、
//! 区域、设备、权限授予和签名策略，写入与一致性由外围 CRUD 层负责。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`DirectoryStore` 异步 Trait，对应图加载的每个查询
//! 2. **数据模型层** (`models.rs`)：目录记录
//! 3. **错误处理层** (`error.rs`)：统一的存储故障类型
//! 4. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 5. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 查询契约
//!
//! - `find_user`：零个或一个用户
//! - `list_user_roles` / `list_role_zones`：关系遍历，按稳定顺序返回
//! - `list_application_devices`：仅返回设备类型 `is_application = true` 的设备
//! - `list_permission_grants`：仅返回值为 true 且能连接到权限定义的授予
//! - `find_signature_policy`：可能不存在（调用方使用全 false 缺省值）
//!
//! 悬空引用（孤立授予、缺失的设备类型等）不是错误，只是查询不到。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use secadmin_storage::{DirectoryStore, InMemoryDirectoryStore};
//!
//! let store = InMemoryDirectoryStore::with_demo_directory();
//! let roles = store.list_user_roles("alice").await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;

pub use in_memory::{DirectoryBuilder, InMemoryDirectoryStore};
pub use postgres::PgDirectoryStore;
