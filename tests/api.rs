use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{Response, StatusCode, header},
};

use tower::util::ServiceExt;
use webblog::{
    api,
    content::{Article, Category},
    state::AppState,
    storage::{ArticleRepository, CategoryRepository, CommentRepository, MemoryStore, Store},
    validation::{INVALID_CHOICE, REQUIRED},
};

struct TestApp {
    router: Router,
    store: MemoryStore,
    category: Category,
}

impl TestApp {
    async fn new() -> Self {
        let store = MemoryStore::new();
        let category = store
            .categories()
            .ensure("Rust")
            .await
            .expect("初始化分类失败");

        let router = api::setup_route(AppState::new(store.clone()));

        Self {
            router,
            store,
            category,
        }
    }

    async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("oneshot fail")
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::get(uri).body(Body::empty()).expect("请求失败");
        let resp = self.request(req).await;
        let status = resp.status();
        (status, body_text(resp).await)
    }

    async fn post(&self, uri: &str, form: &str) -> Response<Body> {
        let req = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("请求失败");
        self.request(req).await
    }

    /// 通过表单新建文章，返回跳转到的详情页地址
    async fn create_article(&self, title: &str) -> String {
        let form = format!(
            "title={title}&author=Alice&text=Hello+world&category={}",
            self.category.id
        );
        let resp = self.post("/articles/new", &form).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "新建文章应跳转");
        location(&resp)
    }

    async fn articles(&self) -> Vec<Article> {
        self.store.articles().find_all().await.expect("查询失败")
    }
}

fn location(resp: &Response<Body>) -> String {
    resp.headers()[header::LOCATION]
        .to_str()
        .expect("Location 不是合法字符串")
        .to_string()
}

async fn body_text(resp: Response<Body>) -> String {
    let data = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("读取数据失败");
    String::from_utf8(data.to_vec()).expect("读取数据失败")
}

#[tokio::test]
async fn test_article_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No articles yet."));

    let (status, body) = app.get("/articles/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="1">Rust</option>"#));

    let detail = app.create_article("First").await;
    let id = app.articles().await[0].id;
    assert_eq!(detail, format!("/articles/{id}"));

    let (status, body) = app.get(&detail).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("First"));
    assert!(body.contains("Hello world"));

    let (status, body) = app.get(&format!("/articles/{id}/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="First""#));
    assert!(body.contains(r#"<option value="1" selected>Rust</option>"#));

    let resp = app
        .post(
            &format!("/articles/{id}/edit"),
            "title=Renamed&author=Bob&text=Changed&category=1",
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), detail);
    assert_eq!(app.articles().await[0].title, "Renamed");

    let (status, body) = app.get(&format!("/articles/{id}/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Renamed"));

    let resp = app.post(&format!("/articles/{id}/delete"), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let (status, _) = app.get(&detail).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_article_rerenders_form() {
    let app = TestApp::new().await;

    let resp = app
        .post("/articles/new", "title=&author=Alice&text=kept+text&category=1")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(REQUIRED));
    assert!(body.contains("kept text"), "原始输入应回填");
    assert!(app.articles().await.is_empty(), "校验失败不应写入数据");

    let resp = app
        .post("/articles/new", "title=T&author=A&text=B&category=42")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(INVALID_CHOICE));
    assert!(app.articles().await.is_empty());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/articles/999999",
        "/articles/999999/edit",
        "/articles/999999/delete",
        "/articles/not-a-number",
        "/comments/999999/edit",
        "/comments/999999/delete",
    ] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {uri}");
    }

    let resp = app
        .post("/articles/999999/edit", "title=T&author=A&text=B&category=1")
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.post("/articles/999999/delete", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.post("/comments/999999/delete", "").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let app = TestApp::new().await;
    let detail = app.create_article("Commented").await;
    let article_id = app.articles().await[0].id;

    let (status, body) = app.get("/comments/new").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Commented"));

    for text in ["t1", "t2", "t3"] {
        let resp = app
            .post(
                "/comments/new",
                &format!("article={article_id}&author=Bob&text={text}"),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&resp), "/comments");
    }

    let (status, body) = app.get(&detail).await;
    assert_eq!(status, StatusCode::OK);
    let positions = ["t3", "t2", "t1"].map(|t| body.find(&format!("<p>{t}</p>")).expect(t));
    assert!(positions[0] < positions[1] && positions[1] < positions[2], "评论应按时间倒序");

    let (status, body) = app.get("/comments").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Commented"));

    let comment = app
        .store
        .comments()
        .find_by_article(article_id)
        .await
        .expect("查询失败")
        .remove(0);

    let resp = app
        .post(
            &format!("/comments/{}/edit", comment.id),
            &format!("article={article_id}&author=Bob&text=edited"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/comments");

    let resp = app.post(&format!("/comments/{}/delete", comment.id), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        app.store.comments().find_all().await.expect("查询失败").len(),
        2
    );
}

#[tokio::test]
async fn test_comment_on_unknown_article() {
    let app = TestApp::new().await;

    let resp = app
        .post("/comments/new", "article=999999&author=Bob&text=hello")
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains(INVALID_CHOICE));
    assert!(
        app.store
            .comments()
            .find_all()
            .await
            .expect("查询失败")
            .is_empty()
    );
}

#[tokio::test]
async fn test_deleting_article_removes_its_comments() {
    let app = TestApp::new().await;
    app.create_article("Doomed").await;
    let article_id = app.articles().await[0].id;

    let resp = app
        .post(
            "/comments/new",
            &format!("article={article_id}&author=Bob&text=bye"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app.post(&format!("/articles/{article_id}/delete"), "").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (status, body) = app.get("/comments").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No comments yet."));
}
