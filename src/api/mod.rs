mod articles;
mod comments;

use axum::{
    Router,
    response::{IntoResponse, Redirect as SeeOther, Response},
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, instrument};

use crate::{
    error::{Error, Result},
    handlers::{Redirect, Submission},
    state::AppState,
    storage::Store,
};

/// 设置应用的路由。
///
/// 将文章和评论的页面路由组合在一起，并绑定应用状态。
pub fn setup_route<S: Store>(app: AppState<S>) -> Router {
    Router::new()
        .merge(articles::setup_route())
        .merge(comments::setup_route())
        .with_state(app)
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
#[instrument(name = "http server", skip_all, fields(%addr))]
pub async fn run_server_with_router(router: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server<S: Store>(app: AppState<S>, addr: &str) -> Result<()> {
    let router = setup_route(app);
    let router = add_middlewares(router);
    run_server_with_router(router, addr).await
}

/// 为路由添加请求追踪中间件
///
/// 每个请求一个 span，响应状态和耗时记为 DEBUG，5xx 记为 ERROR。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, ?latency, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(())
            .on_response(DefaultOnResponse::new().level(Level::DEBUG))
            .on_failure(log_failure),
    )
}

/// 解析路径中的 ID
///
/// 无法解析为整数时按不存在处理，返回 404。
fn parse_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| Error::NotFound)
}

/// 跳转统一使用 303 See Other
fn redirect(target: Redirect) -> Response {
    SeeOther::to(&target.location()).into_response()
}

/// 提交成功时跳转，校验失败时以 200 重新渲染表单
fn submission<V>(
    result: Submission<V>,
    render: impl FnOnce(&V) -> Result<axum::response::Html<String>>,
) -> Result<Response> {
    match result {
        Ok(target) => Ok(redirect(target)),
        Err(view) => Ok(render(&view)?.into_response()),
    }
}
