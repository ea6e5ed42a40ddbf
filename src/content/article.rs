use chrono::{DateTime, Local};

use super::{Category, CategoryId};

/// 文章 ID
pub type ArticleId = i64;

/// 文章
///
/// 分类信息以平铺字段的形式随文章一起查出，参见 [`Article::category`]。
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub author: String,
    pub text: String,

    // 平铺字段
    pub category_id: CategoryId,
    pub category_name: String,

    /// 创建时间，插入时由存储层写入，之后不再变化
    pub created_at: DateTime<Local>,
}

impl Article {
    /// 文章所属的 [`Category`]
    pub fn category(&self) -> Category {
        Category {
            id: self.category_id,
            name: self.category_name.clone(),
        }
    }
}

/// 通过校验的文章字段
///
/// 由 [`crate::validation::ArticleForm::validate`] 产生，创建和更新都整体使用这些字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub author: String,
    pub text: String,
    pub category: Category,
}
