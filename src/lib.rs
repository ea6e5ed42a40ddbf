pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod handlers;
pub mod render;
pub mod state;
pub mod storage;
pub mod validation;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use error::Result;
use state::AppState;
use storage::{MemoryStore, PgStore, Store};

/// 启动应用
///
/// 初始化日志、读取配置、建立存储并写入分类，然后启动 HTTP 服务。
/// 配置了 `database_url` 时使用 PostgreSQL，否则使用内存存储。
pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("WEBBLOG_LOG"))
        .init();

    let config = Config::from_env()?;

    match config.database_url.as_deref() {
        Some(url) => {
            let pool = storage::init_db(url, &config.pool).await?;
            storage::migrate(&pool, storage::SCHEMA).await?;
            serve(PgStore::new(pool), &config).await
        }
        None => {
            tracing::warn!("database_url not set, using in-memory storage");
            serve(MemoryStore::new(), &config).await
        }
    }
}

async fn serve<S: Store>(store: S, config: &Config) -> Result<()> {
    storage::seed_categories(store.categories(), &config.categories).await?;
    api::run_server(AppState::new(store), &config.listen).await
}
