//! 页面渲染
//!
//! 将 [`crate::handlers`] 返回的视图模型交给 askama 模板，模板位于 `templates/`。

use askama::Template;
use axum::response::Html;

use crate::{
    content::{Article, Comment},
    error::Result,
    handlers::{
        ArticleDeleteView, ArticleDetailView, ArticleFormView, ArticleListView, CommentDeleteView,
        CommentFormView, CommentListView,
    },
};

/// 下拉框选项
struct SelectOption {
    value: String,
    label: String,
    selected: bool,
}

impl SelectOption {
    fn new(id: i64, label: &str, current: &str) -> Self {
        let value = id.to_string();
        Self {
            selected: value == current.trim(),
            value,
            label: label.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    articles: &'a [Article],
}

#[derive(Template)]
#[template(path = "article.html")]
struct ArticleTemplate<'a> {
    article: &'a Article,
    comments: &'a [Comment],
}

#[derive(Template)]
#[template(path = "article_form.html")]
struct ArticleFormTemplate<'a> {
    heading: &'a str,
    action: String,
    view: &'a ArticleFormView,
    options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "delete.html")]
struct ArticleDeleteTemplate<'a> {
    article: &'a Article,
}

#[derive(Template)]
#[template(path = "comment/index.html")]
struct CommentIndexTemplate<'a> {
    comments: &'a [Comment],
}

#[derive(Template)]
#[template(path = "comment/form.html")]
struct CommentFormTemplate<'a> {
    heading: &'a str,
    action: String,
    view: &'a CommentFormView,
    options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "comment/delete.html")]
struct CommentDeleteTemplate<'a> {
    comment: &'a Comment,
}

fn page(template: impl Template) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}

pub fn article_list(view: &ArticleListView) -> Result<Html<String>> {
    page(IndexTemplate {
        articles: &view.articles,
    })
}

pub fn article_detail(view: &ArticleDetailView) -> Result<Html<String>> {
    page(ArticleTemplate {
        article: &view.article,
        comments: &view.comments,
    })
}

/// 新建和编辑共用一个模板，提交地址随 [`ArticleFormView::article`] 变化
pub fn article_form(view: &ArticleFormView) -> Result<Html<String>> {
    let (heading, action) = match &view.article {
        Some(article) => ("Edit article", format!("/articles/{}/edit", article.id)),
        None => ("New article", "/articles/new".to_string()),
    };
    let options = view
        .categories
        .iter()
        .map(|c| SelectOption::new(c.id, &c.name, &view.form.category))
        .collect();

    page(ArticleFormTemplate {
        heading,
        action,
        view,
        options,
    })
}

pub fn article_delete(view: &ArticleDeleteView) -> Result<Html<String>> {
    page(ArticleDeleteTemplate {
        article: &view.article,
    })
}

pub fn comment_list(view: &CommentListView) -> Result<Html<String>> {
    page(CommentIndexTemplate {
        comments: &view.comments,
    })
}

pub fn comment_form(view: &CommentFormView) -> Result<Html<String>> {
    let (heading, action) = match &view.comment {
        Some(comment) => ("Edit comment", format!("/comments/{}/edit", comment.id)),
        None => ("New comment", "/comments/new".to_string()),
    };
    let options = view
        .articles
        .iter()
        .map(|a| SelectOption::new(a.id, &a.title, &view.form.article))
        .collect();

    page(CommentFormTemplate {
        heading,
        action,
        view,
        options,
    })
}

pub fn comment_delete(view: &CommentDeleteView) -> Result<Html<String>> {
    page(CommentDeleteTemplate {
        comment: &view.comment,
    })
}
