//! 请求级别的处理逻辑
//!
//! 每个操作拆成两个函数：展示（返回视图模型）和提交（返回 [`Submission`]）。
//! 它们只依赖仓储接口，与 HTTP 无关，由 [`crate::api`] 负责适配。

pub mod articles;
pub mod comments;
mod view;

pub use self::view::{
    ArticleDeleteView, ArticleDetailView, ArticleFormView, ArticleListView, CommentDeleteView,
    CommentFormView, CommentListView, Redirect, Submission,
};

use crate::error::{Error, Result};

/// 将 `Option` 转为结果，`None` 视为 [`Error::NotFound`]
fn found<T>(value: Option<T>) -> Result<T> {
    value.ok_or(Error::NotFound)
}
