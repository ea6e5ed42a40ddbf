#![cfg(feature = "db_tests")]

use webblog::{
    config::PoolConfig,
    content::{ArticleDraft, CommentDraft},
    error::Error,
    storage::{
        ArticleRepository, CategoryRepository, CommentRepository, PgStore, SCHEMA, Store, init_db,
        migrate,
    },
};

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let pool = init_db(&url, &PoolConfig::default())
        .await
        .expect("连接数据库失败");
    migrate(&pool, SCHEMA).await.expect("初始化sql失败");
    PgStore::new(pool)
}

#[tokio::test]
#[ignore = "依赖真实数据库"]
async fn test_postgres_store() {
    let store = store().await;

    let category = store
        .categories()
        .ensure("db-test")
        .await
        .expect("创建分类失败");
    let again = store.categories().ensure("db-test").await.expect("查询分类失败");
    assert_eq!(category, again, "分类写入应幂等");

    let article = store
        .articles()
        .create(&ArticleDraft {
            title: "Hello".to_string(),
            author: "Alice".to_string(),
            text: "body".to_string(),
            category: category.clone(),
        })
        .await
        .expect("创建文章失败");
    assert_eq!(article.category_name, "db-test");

    for text in ["t1", "t2", "t3"] {
        store
            .comments()
            .create(&CommentDraft {
                author: "Bob".to_string(),
                text: text.to_string(),
                article: article.clone(),
            })
            .await
            .expect("创建评论失败");
    }

    let comments = store
        .comments()
        .find_by_article(article.id)
        .await
        .expect("查询评论失败");
    let texts = comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, ["t3", "t2", "t1"]);

    let updated = store
        .articles()
        .update(
            article.id,
            &ArticleDraft {
                title: "Renamed".to_string(),
                author: "Alice".to_string(),
                text: "body".to_string(),
                category,
            },
        )
        .await
        .expect("更新文章失败")
        .expect("文章应存在");
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.created_at, article.created_at);

    assert!(store.articles().delete(article.id).await.expect("删除失败"));
    assert!(
        store
            .articles()
            .find_by_id(article.id)
            .await
            .expect("查询失败")
            .is_none()
    );
    assert!(
        store
            .comments()
            .find_by_article(article.id)
            .await
            .expect("查询失败")
            .is_empty(),
        "评论应随文章删除"
    );

    let orphan = store
        .comments()
        .create(&CommentDraft {
            author: "Bob".to_string(),
            text: "late".to_string(),
            article,
        })
        .await;
    assert!(matches!(orphan, Err(Error::NotFound)), "文章已删除时不应写入评论");
}
