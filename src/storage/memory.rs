use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chrono::{DateTime, Local};

use super::{ArticleRepository, CategoryRepository, CommentRepository, Store};
use crate::{
    content::{
        Article, ArticleDraft, ArticleId, Category, CategoryId, Comment, CommentDraft, CommentId,
    },
    error::{Error, Result},
};

struct ArticleRow {
    title: String,
    author: String,
    text: String,
    category_id: CategoryId,
    created_at: DateTime<Local>,
}

struct CommentRow {
    author: String,
    text: String,
    article_id: ArticleId,
    created_at: DateTime<Local>,
}

/// 内存中的三张表
///
/// ID 各自自增，与 `BIGSERIAL` 行为一致。
#[derive(Default)]
struct Tables {
    categories: BTreeMap<CategoryId, String>,
    articles: BTreeMap<ArticleId, ArticleRow>,
    comments: BTreeMap<CommentId, CommentRow>,
    category_seq: i64,
    article_seq: i64,
    comment_seq: i64,
}

impl Tables {
    fn article(&self, id: ArticleId) -> Option<Article> {
        let row = self.articles.get(&id)?;
        Some(Article {
            id,
            title: row.title.clone(),
            author: row.author.clone(),
            text: row.text.clone(),
            category_id: row.category_id,
            category_name: self
                .categories
                .get(&row.category_id)
                .cloned()
                .unwrap_or_default(),
            created_at: row.created_at,
        })
    }

    fn comment(&self, id: CommentId) -> Option<Comment> {
        let row = self.comments.get(&id)?;
        Some(Comment {
            id,
            author: row.author.clone(),
            text: row.text.clone(),
            article_id: row.article_id,
            article_title: self
                .articles
                .get(&row.article_id)
                .map(|a| a.title.clone())
                .unwrap_or_default(),
            created_at: row.created_at,
        })
    }

    fn comments_where(&self, filter: impl Fn(&CommentRow) -> bool) -> Vec<Comment> {
        let mut comments = self
            .comments
            .iter()
            .filter(|(_, row)| filter(*row))
            .filter_map(|(id, _)| self.comment(*id))
            .collect::<Vec<_>>();
        newest_first(&mut comments, |c| (c.created_at, c.id));
        comments
    }
}

/// 按 (创建时间, ID) 倒序排列
fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Local>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[derive(Clone, Default)]
struct Shared(Arc<Mutex<Tables>>);

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 内存实现的 [`Store`]
///
/// 未配置数据库时使用，测试也依赖它。进程退出后数据丢失。
#[derive(Clone)]
pub struct MemoryStore {
    categories: MemoryCategories,
    articles: MemoryArticles,
    comments: MemoryComments,
}

impl MemoryStore {
    pub fn new() -> Self {
        let shared = Shared::default();
        Self {
            categories: MemoryCategories(shared.clone()),
            articles: MemoryArticles(shared.clone()),
            comments: MemoryComments(shared),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    type Categories = MemoryCategories;
    type Articles = MemoryArticles;
    type Comments = MemoryComments;

    fn categories(&self) -> &MemoryCategories {
        &self.categories
    }

    fn articles(&self) -> &MemoryArticles {
        &self.articles
    }

    fn comments(&self) -> &MemoryComments {
        &self.comments
    }
}

#[derive(Clone)]
pub struct MemoryCategories(Shared);

impl CategoryRepository for MemoryCategories {
    async fn find_by_id(&self, id: CategoryId) -> Result<Option<Category>> {
        let tables = self.0.lock();
        Ok(tables.categories.get(&id).map(|name| Category {
            id,
            name: name.clone(),
        }))
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let tables = self.0.lock();
        let mut categories = tables
            .categories
            .iter()
            .map(|(id, name)| Category {
                id: *id,
                name: name.clone(),
            })
            .collect::<Vec<_>>();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn ensure(&self, name: &str) -> Result<Category> {
        let mut tables = self.0.lock();
        if let Some((id, _)) = tables.categories.iter().find(|(_, n)| n.as_str() == name) {
            return Ok(Category {
                id: *id,
                name: name.to_string(),
            });
        }

        tables.category_seq += 1;
        let id = tables.category_seq;
        tables.categories.insert(id, name.to_string());
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct MemoryArticles(Shared);

impl ArticleRepository for MemoryArticles {
    async fn find_by_id(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(self.0.lock().article(id))
    }

    async fn find_all(&self) -> Result<Vec<Article>> {
        let tables = self.0.lock();
        let mut articles = tables
            .articles
            .keys()
            .filter_map(|id| tables.article(*id))
            .collect::<Vec<_>>();
        newest_first(&mut articles, |a| (a.created_at, a.id));
        Ok(articles)
    }

    async fn create(&self, draft: &ArticleDraft) -> Result<Article> {
        let mut tables = self.0.lock();
        tables.article_seq += 1;
        let id = tables.article_seq;
        let created_at = Local::now();
        tables.articles.insert(
            id,
            ArticleRow {
                title: draft.title.clone(),
                author: draft.author.clone(),
                text: draft.text.clone(),
                category_id: draft.category.id,
                created_at,
            },
        );
        Ok(Article {
            id,
            title: draft.title.clone(),
            author: draft.author.clone(),
            text: draft.text.clone(),
            category_id: draft.category.id,
            category_name: draft.category.name.clone(),
            created_at,
        })
    }

    async fn update(&self, id: ArticleId, draft: &ArticleDraft) -> Result<Option<Article>> {
        let mut tables = self.0.lock();
        let Some(row) = tables.articles.get_mut(&id) else {
            return Ok(None);
        };
        row.title = draft.title.clone();
        row.author = draft.author.clone();
        row.text = draft.text.clone();
        row.category_id = draft.category.id;
        Ok(tables.article(id))
    }

    async fn delete(&self, id: ArticleId) -> Result<bool> {
        let mut tables = self.0.lock();
        if tables.articles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, c| c.article_id != id);
        Ok(true)
    }
}

#[derive(Clone)]
pub struct MemoryComments(Shared);

impl CommentRepository for MemoryComments {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.0.lock().comment(id))
    }

    async fn find_all(&self) -> Result<Vec<Comment>> {
        Ok(self.0.lock().comments_where(|_| true))
    }

    async fn find_by_article(&self, article_id: ArticleId) -> Result<Vec<Comment>> {
        Ok(self.0.lock().comments_where(|c| c.article_id == article_id))
    }

    /// 所属文章已被删除时返回 [`Error::NotFound`]，与外键约束一致
    async fn create(&self, draft: &CommentDraft) -> Result<Comment> {
        let mut tables = self.0.lock();
        if !tables.articles.contains_key(&draft.article.id) {
            return Err(Error::NotFound);
        }
        tables.comment_seq += 1;
        let id = tables.comment_seq;
        let created_at = Local::now();
        tables.comments.insert(
            id,
            CommentRow {
                author: draft.author.clone(),
                text: draft.text.clone(),
                article_id: draft.article.id,
                created_at,
            },
        );
        Ok(Comment {
            id,
            author: draft.author.clone(),
            text: draft.text.clone(),
            article_id: draft.article.id,
            article_title: draft.article.title.clone(),
            created_at,
        })
    }

    async fn update(&self, id: CommentId, draft: &CommentDraft) -> Result<Option<Comment>> {
        let mut tables = self.0.lock();
        let article_exists = tables.articles.contains_key(&draft.article.id);
        let Some(row) = tables.comments.get_mut(&id) else {
            return Ok(None);
        };
        if !article_exists {
            return Err(Error::NotFound);
        }
        row.author = draft.author.clone();
        row.text = draft.text.clone();
        row.article_id = draft.article.id;
        Ok(tables.comment(id))
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        Ok(self.0.lock().comments.remove(&id).is_some())
    }
}
