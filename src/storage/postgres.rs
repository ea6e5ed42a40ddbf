use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

use super::{PgArticles, PgCategories, PgComments, Store};
use crate::config::PoolConfig;

/// 数据库连接池类型
pub type DBPool = sqlx::PgPool;

/// 建表语句，启动时执行
pub const SCHEMA: &str = include_str!("../../sql/01-CREATE_TABLE.sql");

/// 根据连接 URL 和 [`PoolConfig`] 创建数据库连接池
///
/// 默认配置：
///
/// - 最大空闲时间 60 秒
/// - 最大生存时间 1500 秒（约 25 分钟）
/// - 最大连接数 10
/// - 获取连接超时 2 秒
/// - 获取前测试连接
/// - 最小连接数 2
pub async fn init_db(conn_url: &str, pool: &PoolConfig) -> Result<DBPool, sqlx::Error> {
    PgPoolOptions::new()
        .idle_timeout(Duration::from_secs(pool.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(pool.max_lifetime_secs))
        .max_connections(pool.max_connections)
        .acquire_timeout(Duration::from_secs(pool.acquire_timeout_secs))
        .test_before_acquire(true)
        .min_connections(pool.min_connections)
        .connect(conn_url)
        .await
}

/// 执行 SQL 脚本
///
/// 将内容按 `;` 分割，每条 SQL 单独执行
pub async fn migrate(db: &DBPool, script: &str) -> Result<(), sqlx::Error> {
    for sql in script.split(';') {
        if sql.trim().is_empty() {
            continue;
        }
        sqlx::query(sql).execute(db).await?;
    }
    Ok(())
}

/// 基于 PostgreSQL 的 [`Store`] 实现
///
/// 三个仓储共用同一个连接池。
#[derive(Clone)]
pub struct PgStore {
    categories: PgCategories,
    articles: PgArticles,
    comments: PgComments,
}

impl PgStore {
    pub fn new(pool: DBPool) -> Self {
        Self {
            categories: PgCategories::new(pool.clone()),
            articles: PgArticles::new(pool.clone()),
            comments: PgComments::new(pool),
        }
    }
}

impl Store for PgStore {
    type Categories = PgCategories;
    type Articles = PgArticles;
    type Comments = PgComments;

    fn categories(&self) -> &PgCategories {
        &self.categories
    }

    fn articles(&self) -> &PgArticles {
        &self.articles
    }

    fn comments(&self) -> &PgComments {
        &self.comments
    }
}
