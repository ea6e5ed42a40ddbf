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
    handlers::articles,
    render,
    state::AppState,
    storage::Store,
    validation::ArticleForm,
};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /`：文章列表
/// - `GET /articles/{id}`：文章详情及评论
/// - `GET|POST /articles/new`：新建文章
/// - `GET|POST /articles/{id}/edit`：编辑文章
/// - `GET|POST /articles/{id}/delete`：删除文章
pub fn setup_route<S: Store>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(index::<S>))
        .route("/articles/new", get(create_form::<S>).post(create::<S>))
        .route("/articles/{id}", get(detail::<S>))
        .route("/articles/{id}/edit", get(update_form::<S>).post(update::<S>))
        .route(
            "/articles/{id}/delete",
            get(delete_confirm::<S>).post(delete::<S>),
        )
}

async fn index<S: Store>(State(app): State<AppState<S>>) -> Result<Html<String>> {
    render::article_list(&articles::list(app.store().articles()).await?)
}

async fn detail<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Html<String>> {
    let store = app.store();
    let view = articles::detail(store.articles(), store.comments(), parse_id(&id)?).await?;
    render::article_detail(&view)
}

async fn create_form<S: Store>(State(app): State<AppState<S>>) -> Result<Html<String>> {
    render::article_form(&articles::create_form(app.store().categories()).await?)
}

async fn create<S: Store>(
    State(app): State<AppState<S>>,
    Form(form): Form<ArticleForm>,
) -> Result<Response> {
    let store = app.store();
    let result = articles::create_submit(store.articles(), store.categories(), form).await?;
    submission(result, render::article_form)
}

async fn update_form<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Html<String>> {
    let store = app.store();
    let view = articles::update_form(store.articles(), store.categories(), parse_id(&id)?).await?;
    render::article_form(&view)
}

async fn update<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
    Form(form): Form<ArticleForm>,
) -> Result<Response> {
    let store = app.store();
    let result =
        articles::update_submit(store.articles(), store.categories(), parse_id(&id)?, form)
            .await?;
    submission(result, render::article_form)
}

async fn delete_confirm<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Html<String>> {
    render::article_delete(&articles::delete_confirm(app.store().articles(), parse_id(&id)?).await?)
}

async fn delete<S: Store>(
    Path(id): Path<String>,
    State(app): State<AppState<S>>,
) -> Result<Response> {
    let target = articles::delete_submit(app.store().articles(), parse_id(&id)?).await?;
    Ok(redirect(target))
}
