use std::future::Future;

use crate::{
    content::{
        Article, ArticleDraft, ArticleId, Category, CategoryId, Comment, CommentDraft, CommentId,
    },
    error::Result,
};

/// 分类仓储
pub trait CategoryRepository: Send + Sync {
    /// 按 ID 查询分类，不存在时返回 `None`
    fn find_by_id(&self, id: CategoryId) -> impl Future<Output = Result<Option<Category>>> + Send;

    /// 查询所有分类，按名称排序
    fn find_all(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    /// 按名称获取分类，不存在则创建
    fn ensure(&self, name: &str) -> impl Future<Output = Result<Category>> + Send;
}

/// 文章仓储
///
/// 创建时间由实现方在插入时写入，[`ArticleRepository::update`] 不会改动它。
pub trait ArticleRepository: Send + Sync {
    fn find_by_id(&self, id: ArticleId) -> impl Future<Output = Result<Option<Article>>> + Send;

    /// 查询所有文章，创建时间倒序
    fn find_all(&self) -> impl Future<Output = Result<Vec<Article>>> + Send;

    fn create(&self, draft: &ArticleDraft) -> impl Future<Output = Result<Article>> + Send;

    /// 整体替换文章字段
    ///
    /// 文章不存在时返回 `None`。
    fn update(
        &self,
        id: ArticleId,
        draft: &ArticleDraft,
    ) -> impl Future<Output = Result<Option<Article>>> + Send;

    /// 删除文章及其全部评论
    ///
    /// 返回是否确实删除了记录。
    fn delete(&self, id: ArticleId) -> impl Future<Output = Result<bool>> + Send;
}

/// 评论仓储
pub trait CommentRepository: Send + Sync {
    fn find_by_id(&self, id: CommentId) -> impl Future<Output = Result<Option<Comment>>> + Send;

    /// 查询所有评论，创建时间倒序
    fn find_all(&self) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// 查询某篇文章下的评论，创建时间倒序
    fn find_by_article(
        &self,
        article_id: ArticleId,
    ) -> impl Future<Output = Result<Vec<Comment>>> + Send;

    /// 所属文章在校验之后被删除时返回 [`crate::error::Error::NotFound`]
    fn create(&self, draft: &CommentDraft) -> impl Future<Output = Result<Comment>> + Send;

    /// 评论不存在返回 `None`，所属文章不存在返回 [`crate::error::Error::NotFound`]
    fn update(
        &self,
        id: CommentId,
        draft: &CommentDraft,
    ) -> impl Future<Output = Result<Option<Comment>>> + Send;

    fn delete(&self, id: CommentId) -> impl Future<Output = Result<bool>> + Send;
}

/// 各实体仓储的集合
///
/// 请求处理器只依赖这里暴露的仓储，不直接接触连接池。
pub trait Store: Clone + Send + Sync + 'static {
    type Categories: CategoryRepository;
    type Articles: ArticleRepository;
    type Comments: CommentRepository;

    fn categories(&self) -> &Self::Categories;
    fn articles(&self) -> &Self::Articles;
    fn comments(&self) -> &Self::Comments;
}
