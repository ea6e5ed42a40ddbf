use serde::Deserialize;

use super::{FieldErrors, INVALID_CHOICE, Validated};
use crate::{
    content::{Article, ArticleDraft},
    error::Result,
    storage::CategoryRepository,
};

/// 文章表单的原始字段
///
/// 校验失败时原样回填到表单中。`category` 为分类 ID 的文本形式。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArticleForm {
    pub title: String,
    pub author: String,
    pub text: String,
    pub category: String,
}

impl ArticleForm {
    /// 以文章当前的值填充表单
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            author: article.author.clone(),
            text: article.text.clone(),
            category: article.category_id.to_string(),
        }
    }

    /// 校验文章表单
    ///
    /// `title`、`author`、`text` 必须非空，`category` 必须指向已存在的分类。
    /// 外层 [`Result`] 只承载存储层错误。
    pub async fn validate(
        &self,
        categories: &impl CategoryRepository,
    ) -> Result<Validated<ArticleDraft>> {
        let mut errors = FieldErrors::new();

        let title = errors.required("title", &self.title);
        let author = errors.required("author", &self.author);
        let text = errors.required("text", &self.text);

        let category = match errors.reference("category", &self.category) {
            Some(id) => {
                let found = categories.find_by_id(id).await?;
                if found.is_none() {
                    errors.add("category", INVALID_CHOICE);
                }
                found
            }
            None => None,
        };

        Ok(match (title, author, text, category) {
            (Some(title), Some(author), Some(text), Some(category)) => Ok(ArticleDraft {
                title,
                author,
                text,
                category,
            }),
            _ => Err(errors),
        })
    }
}
