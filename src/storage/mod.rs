mod article_storage;
mod category_storage;
mod comment_storage;
mod memory;
mod postgres;
mod repository;

pub use self::{
    article_storage::PgArticles,
    category_storage::PgCategories,
    comment_storage::PgComments,
    memory::MemoryStore,
    postgres::{DBPool, PgStore, SCHEMA, init_db, migrate},
    repository::{ArticleRepository, CategoryRepository, CommentRepository, Store},
};

use crate::error::Result;

/// 确保配置中的分类全部存在
///
/// 按名称逐个写入，已存在的分类保持不变。
pub async fn seed_categories(
    categories: &impl CategoryRepository,
    names: &[String],
) -> Result<()> {
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        let category = categories.ensure(name).await?;
        tracing::debug!(id = category.id, name = %category.name, "category ready");
    }
    Ok(())
}
