//! Boundary to the external article store.
//!
//! The selection engine never owns articles; it asks an [`ArticleStore`] for
//! published candidates matching a [`RegionFilter`] and works on the copies.

pub mod article;
pub mod filter;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

pub use article::Article;
pub use filter::{ArticleOrder, ArticleQuery, RegionFilter};
pub use memory::InMemoryArticleStore;

/// Filtered fetch of published articles.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Return published articles matching `query.filter`, ordered by
    /// `query.order`, windowed by `query.offset` / `query.limit`.
    ///
    /// # Errors
    /// Implementations report transport or query failures; the selection
    /// engine degrades them to an empty candidate set.
    async fn fetch_published(&self, query: &ArticleQuery) -> Result<Vec<Article>>;
}
