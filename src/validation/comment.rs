use serde::Deserialize;

use super::{FieldErrors, INVALID_CHOICE, Validated};
use crate::{
    content::{Comment, CommentDraft},
    error::Result,
    storage::ArticleRepository,
};

/// 评论表单的原始字段
///
/// `article` 为文章 ID 的文本形式。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub article: String,
    pub author: String,
    pub text: String,
}

impl CommentForm {
    /// 以评论当前的值填充表单
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            article: comment.article_id.to_string(),
            author: comment.author.clone(),
            text: comment.text.clone(),
        }
    }

    /// 校验评论表单
    ///
    /// `author`、`text` 必须非空，`article` 必须指向已存在的文章。
    pub async fn validate(
        &self,
        articles: &impl ArticleRepository,
    ) -> Result<Validated<CommentDraft>> {
        let mut errors = FieldErrors::new();

        let article = match errors.reference("article", &self.article) {
            Some(id) => {
                let found = articles.find_by_id(id).await?;
                if found.is_none() {
                    errors.add("article", INVALID_CHOICE);
                }
                found
            }
            None => None,
        };
        let author = errors.required("author", &self.author);
        let text = errors.required("text", &self.text);

        Ok(match (article, author, text) {
            (Some(article), Some(author), Some(text)) => Ok(CommentDraft {
                author,
                text,
                article,
            }),
            _ => Err(errors),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        content::{Article, ArticleDraft},
        storage::{CategoryRepository, MemoryStore, Store},
        validation::REQUIRED,
    };

    async fn store_with_article() -> (MemoryStore, Article) {
        let store = MemoryStore::new();
        let category = store.categories().ensure("Rust").await.unwrap();
        let article = store
            .articles()
            .create(&ArticleDraft {
                title: "Hello".to_string(),
                author: "Alice".to_string(),
                text: "body".to_string(),
                category,
            })
            .await
            .unwrap();
        (store, article)
    }

    #[tokio::test]
    async fn test_valid_comment() {
        let (store, article) = store_with_article().await;
        let draft = CommentForm {
            article: article.id.to_string(),
            author: " Bob ".to_string(),
            text: "Nice".to_string(),
        }
        .validate(store.articles())
        .await
        .unwrap()
        .expect("表单应通过校验");

        assert_eq!(draft.article, article);
        assert_eq!(draft.author, "Bob");
    }

    #[tokio::test]
    async fn test_unknown_article_is_keyed() {
        let (store, article) = store_with_article().await;
        let errors = CommentForm {
            article: (article.id + 1).to_string(),
            author: "Bob".to_string(),
            text: "Nice".to_string(),
        }
        .validate(store.articles())
        .await
        .unwrap()
        .expect_err("文章不存在");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("article"), Some(INVALID_CHOICE));
    }

    #[tokio::test]
    async fn test_empty_comment() {
        let (store, _) = store_with_article().await;
        let errors = CommentForm::default()
            .validate(store.articles())
            .await
            .unwrap()
            .expect_err("空表单应校验失败");

        assert_eq!(errors.get("article"), Some(REQUIRED));
        assert_eq!(errors.get("author"), Some(REQUIRED));
        assert_eq!(errors.get("text"), Some(REQUIRED));
    }
}
