//! 安全管理后台的权限解析宿主：有效权限查询、鉴权检查与请求追踪 ID。

mod handlers;
mod middleware;
mod routes;
mod utils;

use axum::{Router, middleware::from_fn, routing::get};
use secadmin_config::AppConfig;
use secadmin_permissions::{PermissionResolver, ResolvePermissions};
use secadmin_storage::{DirectoryStore, InMemoryDirectoryStore, PgDirectoryStore};
use secadmin_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn ResolvePermissions>,
}

/// 组装路由：/health + /api/*，外层注入 request_id/trace_id
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", routes::create_api_router())
        .with_state(state)
        .layer(from_fn(middleware::request_context))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 目录存储：配置了数据库则使用 Postgres（需先执行 migrations），否则使用内置演示目录
    let store: Arc<dyn DirectoryStore> = match config.database_url.as_deref() {
        Some(database_url) => {
            Arc::new(PgDirectoryStore::connect(database_url, config.db_max_connections).await?)
        }
        None => {
            warn!("SECADMIN_DATABASE_URL not set, serving in-memory demo directory");
            Arc::new(InMemoryDirectoryStore::with_demo_directory())
        }
    };
    let resolver =
        PermissionResolver::new(store).with_conflict_warnings(config.warn_device_name_conflicts);
    let state = AppState {
        resolver: Arc::new(resolver),
    };

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!("listening on {}", config.http_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
