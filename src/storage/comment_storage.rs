use super::{CommentRepository, DBPool};
use crate::{
    content::{ArticleId, Comment, CommentDraft, CommentId},
    error::{Error, Result},
};

/// 外键约束失败说明所属文章已被删除
fn missing_article(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => Error::NotFound,
        _ => err.into(),
    }
}

/// 评论表的 sqlx 实现
#[derive(Clone)]
pub struct PgComments {
    pool: DBPool,
}

impl PgComments {
    pub fn new(pool: DBPool) -> Self {
        Self { pool }
    }
}

impl CommentRepository for PgComments {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.author, cm.text, cm.article_id,
                   a.title AS article_title, cm.created_at
            FROM comments cm
            INNER JOIN articles a ON cm.article_id = a.id
            WHERE cm.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self) -> Result<Vec<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.author, cm.text, cm.article_id,
                   a.title AS article_title, cm.created_at
            FROM comments cm
            INNER JOIN articles a ON cm.article_id = a.id
            ORDER BY cm.created_at DESC, cm.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_by_article(&self, article_id: ArticleId) -> Result<Vec<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.author, cm.text, cm.article_id,
                   a.title AS article_title, cm.created_at
            FROM comments cm
            INNER JOIN articles a ON cm.article_id = a.id
            WHERE cm.article_id = $1
            ORDER BY cm.created_at DESC, cm.id DESC
            "#,
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, draft: &CommentDraft) -> Result<Comment> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            WITH cm AS (
                INSERT INTO comments (author, text, article_id)
                VALUES ($1, $2, $3)
                RETURNING id, author, text, article_id, created_at
            )
            SELECT cm.id, cm.author, cm.text, cm.article_id,
                   a.title AS article_title, cm.created_at
            FROM cm
            INNER JOIN articles a ON cm.article_id = a.id
            "#,
        )
        .bind(&draft.author)
        .bind(&draft.text)
        .bind(draft.article.id)
        .fetch_one(&self.pool)
        .await
        .map_err(missing_article)?)
    }

    async fn update(&self, id: CommentId, draft: &CommentDraft) -> Result<Option<Comment>> {
        Ok(sqlx::query_as::<_, Comment>(
            r#"
            WITH cm AS (
                UPDATE comments
                SET
                    author = $2,
                    text = $3,
                    article_id = $4
                WHERE id = $1
                RETURNING id, author, text, article_id, created_at
            )
            SELECT cm.id, cm.author, cm.text, cm.article_id,
                   a.title AS article_title, cm.created_at
            FROM cm
            INNER JOIN articles a ON cm.article_id = a.id
            "#,
        )
        .bind(id)
        .bind(&draft.author)
        .bind(&draft.text)
        .bind(draft.article.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(missing_article)?)
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
