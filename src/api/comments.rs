use axum::{
    Router,
    extract::{Path, State},
    response::{Html, Response},
    routing::get,
};
use axum_extra::extract::Form;

use super::{parse_id, redirect, submission};
use crate::{
    error::Result,
    handlers::comments,
    render,
    state::AppState,
    storage::Store,
    validation::CommentForm,
};

/// 配置评论相关路由。
///
/// 路由包括：
/// - `GET /comments`：全部评论
/// - `GET|POST /comments/new`：新建评论
/// - `GET|POST /comments/{id}/edit`：编辑评论
/// - `GET|POST /comments/{id}/delete`：删除评论
pub fn setup_route<S: Store>() -> Router<AppState<S>> {
    Router::new()
        .route("/comments", get(index::<S>))
        .route("/comments/new", get(create_form::<S>).post(create::<S>))
        .route("/comments/{id}/edit", get(update_form::<S>).post(update::<S>))
        .route(
            "/comments/{id}/delete",
            get(delete_confirm::<S>).post(delete::<S>),
        )
}

async fn index<S: Store>(State(app): State<AppState<S>>) -> Result<Html<String>> {
    render::comment_list(&comments::list(app.store().comments()).await?)
}

async fn create_form<S: Store>(State(app): State<AppState<S>>) -> Result<Html<String>> {
    render::comment_form(&comments::create_form(app.store().articles()).await?)
}

async fn create<S: Store>(
    State(app): State<AppState<S>>,
    Form(form): Form<CommentForm>,
) -> Result<Response> {
    let store = app.store();
    let result = comments::create_submit(store.comments(), store.articles(), form).await?;
    submission(result, render::comment_form)
}

async fn update_form<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Html<String>> {
    let store = app.store();
    let view = comments::update_form(store.comments(), store.articles(), parse_id(&id)?).await?;
    render::comment_form(&view)
}

async fn update<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
    Form(form): Form<CommentForm>,
) -> Result<Response> {
    let store = app.store();
    let result =
        comments::update_submit(store.comments(), store.articles(), parse_id(&id)?, form).await?;
    submission(result, render::comment_form)
}

async fn delete_confirm<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Html<String>> {
    render::comment_delete(&comments::delete_confirm(app.store().comments(), parse_id(&id)?).await?)
}

async fn delete<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Response> {
    let target = comments::delete_submit(app.store().comments(), parse_id(&id)?).await?;
    Ok(redirect(target))
}
