//! 评论的列表、新建、编辑、删除
//!
//! 所有写操作成功后都回到评论列表。

use super::{
    CommentDeleteView, CommentFormView, CommentListView, Redirect, Submission, found,
};
use crate::{
    content::CommentId,
    error::{Error, Result},
    storage::{ArticleRepository, CommentRepository},
    validation::{CommentForm, FieldErrors},
};

/// 全部评论，创建时间倒序
pub async fn list(comments: &impl CommentRepository) -> Result<CommentListView> {
    Ok(CommentListView {
        comments: comments.find_all().await?,
    })
}

pub async fn create_form(articles: &impl ArticleRepository) -> Result<CommentFormView> {
    Ok(CommentFormView {
        form: CommentForm::default(),
        errors: FieldErrors::new(),
        articles: articles.find_all().await?,
        comment: None,
    })
}

/// 提交新建表单
///
/// 所属文章来自表单的 `article` 字段，在校验时解析。
pub async fn create_submit(
    comments: &impl CommentRepository,
    articles: &impl ArticleRepository,
    form: CommentForm,
) -> Result<Submission<CommentFormView>> {
    match form.validate(articles).await? {
        Ok(draft) => {
            let comment = comments.create(&draft).await?;
            tracing::info!(id = comment.id, article = comment.article_id, "comment created");
            Ok(Ok(Redirect::Comments))
        }
        Err(errors) => Ok(Err(CommentFormView {
            form,
            errors,
            articles: articles.find_all().await?,
            comment: None,
        })),
    }
}

pub async fn update_form(
    comments: &impl CommentRepository,
    articles: &impl ArticleRepository,
    id: CommentId,
) -> Result<CommentFormView> {
    let comment = found(comments.find_by_id(id).await?)?;
    Ok(CommentFormView {
        form: CommentForm::from_comment(&comment),
        errors: FieldErrors::new(),
        articles: articles.find_all().await?,
        comment: Some(comment),
    })
}

pub async fn update_submit(
    comments: &impl CommentRepository,
    articles: &impl ArticleRepository,
    id: CommentId,
    form: CommentForm,
) -> Result<Submission<CommentFormView>> {
    let comment = found(comments.find_by_id(id).await?)?;

    match form.validate(articles).await? {
        Ok(draft) => {
            let updated = found(comments.update(comment.id, &draft).await?)?;
            tracing::info!(id = updated.id, "comment updated");
            Ok(Ok(Redirect::Comments))
        }
        Err(errors) => Ok(Err(CommentFormView {
            form,
            errors,
            articles: articles.find_all().await?,
            comment: Some(comment),
        })),
    }
}

pub async fn delete_confirm(
    comments: &impl CommentRepository,
    id: CommentId,
) -> Result<CommentDeleteView> {
    Ok(CommentDeleteView {
        comment: found(comments.find_by_id(id).await?)?,
    })
}

pub async fn delete_submit(comments: &impl CommentRepository, id: CommentId) -> Result<Redirect> {
    if !comments.delete(id).await? {
        return Err(Error::NotFound);
    }
    tracing::info!(id, "comment deleted");
    Ok(Redirect::Comments)
}
