mod article;
mod category;
mod comment;

pub use self::{
    article::{Article, ArticleDraft, ArticleId},
    category::{Category, CategoryId},
    comment::{Comment, CommentDraft, CommentId},
};
