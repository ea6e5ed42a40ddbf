//! 文章的列表、详情、新建、编辑、删除

use super::{
    ArticleDeleteView, ArticleDetailView, ArticleFormView, ArticleListView, Redirect, Submission,
    found,
};
use crate::{
    content::ArticleId,
    error::{Error, Result},
    storage::{ArticleRepository, CategoryRepository, CommentRepository},
    validation::{ArticleForm, FieldErrors},
};

/// 所有文章
pub async fn list(articles: &impl ArticleRepository) -> Result<ArticleListView> {
    Ok(ArticleListView {
        articles: articles.find_all().await?,
    })
}

/// 文章及其评论，评论按创建时间倒序
pub async fn detail(
    articles: &impl ArticleRepository,
    comments: &impl CommentRepository,
    id: ArticleId,
) -> Result<ArticleDetailView> {
    let article = found(articles.find_by_id(id).await?)?;
    let comments = comments.find_by_article(article.id).await?;
    Ok(ArticleDetailView { article, comments })
}

/// 空白的新建表单
pub async fn create_form(categories: &impl CategoryRepository) -> Result<ArticleFormView> {
    Ok(ArticleFormView {
        form: ArticleForm::default(),
        errors: FieldErrors::new(),
        categories: categories.find_all().await?,
        article: None,
    })
}

/// 提交新建表单
///
/// 成功后跳转到新文章的详情页；校验失败则保留原始输入重新展示表单，不写入任何数据。
pub async fn create_submit(
    articles: &impl ArticleRepository,
    categories: &impl CategoryRepository,
    form: ArticleForm,
) -> Result<Submission<ArticleFormView>> {
    match form.validate(categories).await? {
        Ok(draft) => {
            let article = articles.create(&draft).await?;
            tracing::info!(id = article.id, "article created");
            Ok(Ok(Redirect::Article(article.id)))
        }
        Err(errors) => Ok(Err(ArticleFormView {
            form,
            errors,
            categories: categories.find_all().await?,
            article: None,
        })),
    }
}

/// 以文章当前的值填充编辑表单
pub async fn update_form(
    articles: &impl ArticleRepository,
    categories: &impl CategoryRepository,
    id: ArticleId,
) -> Result<ArticleFormView> {
    let article = found(articles.find_by_id(id).await?)?;
    Ok(ArticleFormView {
        form: ArticleForm::from_article(&article),
        errors: FieldErrors::new(),
        categories: categories.find_all().await?,
        article: Some(article),
    })
}

/// 提交编辑表单
///
/// 表单整体替换文章的标题、作者、正文和分类，ID 与创建时间不变。
pub async fn update_submit(
    articles: &impl ArticleRepository,
    categories: &impl CategoryRepository,
    id: ArticleId,
    form: ArticleForm,
) -> Result<Submission<ArticleFormView>> {
    let article = found(articles.find_by_id(id).await?)?;

    match form.validate(categories).await? {
        Ok(draft) => {
            let updated = found(articles.update(article.id, &draft).await?)?;
            tracing::info!(id = updated.id, "article updated");
            Ok(Ok(Redirect::Article(updated.id)))
        }
        Err(errors) => Ok(Err(ArticleFormView {
            form,
            errors,
            categories: categories.find_all().await?,
            article: Some(article),
        })),
    }
}

/// 删除确认页
pub async fn delete_confirm(
    articles: &impl ArticleRepository,
    id: ArticleId,
) -> Result<ArticleDeleteView> {
    Ok(ArticleDeleteView {
        article: found(articles.find_by_id(id).await?)?,
    })
}

/// 删除文章，其评论一并删除，随后回到文章列表
pub async fn delete_submit(articles: &impl ArticleRepository, id: ArticleId) -> Result<Redirect> {
    if !articles.delete(id).await? {
        return Err(Error::NotFound);
    }
    tracing::info!(id, "article deleted");
    Ok(Redirect::Index)
}
