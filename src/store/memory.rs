//! In-process article store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::ArticleStore;
use super::article::Article;
use super::filter::ArticleQuery;

#[derive(Debug, Clone)]
struct StoredArticle {
    article: Article,
    published: bool,
}

/// Vector-backed [`ArticleStore`] applying the same filter and ordering
/// semantics as the hosted store. Ties keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryArticleStore {
    entries: RwLock<Vec<StoredArticle>>,
    unavailable: AtomicBool,
}

impl InMemoryArticleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with published articles.
    #[must_use]
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let store = Self::new();
        for article in articles {
            store.insert(article);
        }
        store
    }

    pub fn insert(&self, article: Article) {
        self.push(article, true);
    }

    /// Unpublished article, never returned by `fetch_published`.
    pub fn insert_draft(&self, article: Article) {
        self.push(article, false);
    }

    /// Make every subsequent fetch fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, article: Article, published: bool) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredArticle { article, published });
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    async fn fetch_published(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("article store unavailable");
        }

        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut matched: Vec<Article> = entries
            .iter()
            .filter(|entry| entry.published && query.filter.matches(&entry.article))
            .map(|entry| entry.article.clone())
            .collect();
        drop(entries);

        matched.sort_by(|a, b| query.order.compare(a, b));

        Ok(matched
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}
