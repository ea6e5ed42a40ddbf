use super::{ArticleRepository, DBPool};
use crate::{
    content::{Article, ArticleDraft, ArticleId},
    error::Result,
};

/// 文章表的 sqlx 实现
///
/// 查询结果与 `categories` 关联，分类名以平铺字段返回。
#[derive(Clone)]
pub struct PgArticles {
    pool: DBPool,
}

impl PgArticles {
    pub fn new(pool: DBPool) -> Self {
        Self { pool }
    }
}

impl ArticleRepository for PgArticles {
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(sqlx::query_as::<_, Article>(
            r#"
            SELECT a.id, a.title, a.author, a.text, a.category_id,
                   c.name AS category_name, a.created_at
            FROM articles a
            INNER JOIN categories c ON a.category_id = c.id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self) -> Result<Vec<Article>> {
        Ok(sqlx::query_as::<_, Article>(
            r#"
            SELECT a.id, a.title, a.author, a.text, a.category_id,
                   c.name AS category_name, a.created_at
            FROM articles a
            INNER JOIN categories c ON a.category_id = c.id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, draft: &ArticleDraft) -> Result<Article> {
        Ok(sqlx::query_as::<_, Article>(
            r#"
            WITH a AS (
                INSERT INTO articles (title, author, text, category_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, title, author, text, category_id, created_at
            )
            SELECT a.id, a.title, a.author, a.text, a.category_id,
                   c.name AS category_name, a.created_at
            FROM a
            INNER JOIN categories c ON a.category_id = c.id
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.text)
        .bind(draft.category.id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Option<Article>> {
        Ok(sqlx::query_as::<_, Article>(
            r#"
            WITH a AS (
                UPDATE articles
                SET
                    title = $2,
                    author = $3,
                    text = $4,
                    category_id = $5
                WHERE id = $1
                RETURNING id, title, author, text, category_id, created_at
            )
            SELECT a.id, a.title, a.author, a.text, a.category_id,
                   c.name AS category_name, a.created_at
            FROM a
            INNER JOIN categories c ON a.category_id = c.id
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(&draft.text)
        .bind(draft.category.id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// 评论通过外键 `ON DELETE CASCADE` 一并删除
    async fn delete(&self, id: ArticleId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
