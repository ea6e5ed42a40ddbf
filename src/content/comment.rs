use chrono::{DateTime, Local};

use super::{Article, ArticleId};

/// 评论 ID
pub type CommentId = i64;

/// 评论
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub text: String,

    // 平铺字段
    pub article_id: ArticleId,
    pub article_title: String,

    /// 创建时间
    pub created_at: DateTime<Local>,
}

/// 通过校验的评论字段
///
/// `article` 是校验时解析出的已存在文章。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub author: String,
    pub text: String,
    pub article: Article,
}
