use crate::{
    content::{Article, ArticleId, Category, Comment},
    validation::{ArticleForm, CommentForm, FieldErrors},
};

/// 提交成功后的跳转目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// 文章列表 `/`
    Index,
    /// 文章详情 `/articles/{id}`
    Article(ArticleId),
    /// 评论列表 `/comments`
    Comments,
}

impl Redirect {
    pub fn location(&self) -> String {
        match self {
            Redirect::Index => "/".to_string(),
            Redirect::Article(id) => format!("/articles/{id}"),
            Redirect::Comments => "/comments".to_string(),
        }
    }
}

/// 表单提交的结果
///
/// 成功时跳转，校验失败时返回带错误信息的表单视图。
pub type Submission<V> = core::result::Result<Redirect, V>;

#[derive(Debug, Clone)]
pub struct ArticleListView {
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone)]
pub struct ArticleDetailView {
    pub article: Article,
    /// 创建时间倒序
    pub comments: Vec<Comment>,
}

/// 文章表单
///
/// `article` 为 `Some` 时表示编辑该文章，否则为新建。
#[derive(Debug, Clone)]
pub struct ArticleFormView {
    pub form: ArticleForm,
    pub errors: FieldErrors,
    pub categories: Vec<Category>,
    pub article: Option<Article>,
}

#[derive(Debug, Clone)]
pub struct ArticleDeleteView {
    pub article: Article,
}

#[derive(Debug, Clone)]
pub struct CommentListView {
    pub comments: Vec<Comment>,
}

/// 评论表单
///
/// `comment` 为 `Some` 时表示编辑该评论。
#[derive(Debug, Clone)]
pub struct CommentFormView {
    pub form: CommentForm,
    pub errors: FieldErrors,
    pub articles: Vec<Article>,
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone)]
pub struct CommentDeleteView {
    pub comment: Comment,
}
