use super::{CategoryRepository, DBPool};
use crate::{
    content::{Category, CategoryId},
    error::Result,
};

/// 分类表的 sqlx 实现
#[derive(Clone)]
pub struct PgCategories {
    pool: DBPool,
}

impl PgCategories {
    pub fn new(pool: DBPool) -> Self {
        Self { pool }
    }
}

impl CategoryRepository for PgCategories {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        Ok(
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name, id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn ensure(&self, name: &str) -> Result<Category> {
        Ok(sqlx::query_as::<_, Category>(
            r#"
            WITH inserted AS (
                INSERT INTO categories (name)
                VALUES ($1)
                ON CONFLICT (name) DO NOTHING
                RETURNING id, name
            )
            SELECT id, name FROM inserted
            UNION ALL
            SELECT id, name FROM categories WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?)
    }
}
