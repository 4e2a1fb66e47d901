//! Article selection for regional sites.
//!
//! Each operation fetches a candidate pool from the [`ArticleStore`], scores it
//! against a [`SiteConfig`] and assembles a display list:
//!
//! - **weighted**: ranked by region × freshness score
//! - **most viewed**: score plus a view-count boost over an over-fetched pool
//! - **latest**: store recency order, scores attached for display
//! - **hero**: fixed-size carousel with a minimum of primary-region articles
//!
//! A failed fetch is logged and treated as an empty pool, so every operation
//! returns a (possibly empty) list and never an error.

pub mod hero;
pub mod ranking;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::observability::metrics::SelectionMetrics;
use crate::scoring::{WeightedArticle, score_all};
use crate::site::{RegionType, SiteConfig};
use crate::store::{Article, ArticleOrder, ArticleQuery, ArticleStore, RegionFilter};

use self::hero::assemble_hero;
use self::ranking::{apply_view_boost, rank_by_score, window};

/// Source of the current time used for freshness scoring.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Over-fetch and boost parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionTuning {
    /// Most-viewed fetches `limit × factor` candidates before boosting.
    pub view_overfetch_factor: usize,
    /// Boost added to the most viewed candidate.
    pub view_boost_weight: f64,
    /// Extra primary candidates fetched beyond the hero's reserved slots.
    pub hero_primary_buffer: usize,
}

impl Default for SelectionTuning {
    fn default() -> Self {
        Self {
            view_overfetch_factor: 2,
            view_boost_weight: 0.5,
            hero_primary_buffer: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Weighted,
    MostViewed,
    Latest,
    Hero,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Operation::Weighted => "weighted",
            Operation::MostViewed => "most_viewed",
            Operation::Latest => "latest",
            Operation::Hero => "hero",
        }
    }
}

pub struct SelectionEngine {
    store: Arc<dyn ArticleStore>,
    tuning: SelectionTuning,
    metrics: Option<Arc<SelectionMetrics>>,
    clock: Clock,
}

impl SelectionEngine {
    #[must_use]
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            store,
            tuning: SelectionTuning::default(),
            metrics: None,
            clock: Arc::new(Utc::now),
        }
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: SelectionTuning) -> Self {
        self.tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<SelectionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[must_use]
    pub fn tuning(&self) -> SelectionTuning {
        self.tuning
    }

    /// Site articles ranked by score, `limit` items from `offset`.
    pub async fn weighted_articles(
        &self,
        site: &SiteConfig,
        limit: usize,
        offset: usize,
    ) -> Vec<WeightedArticle> {
        let operation = Operation::Weighted;
        self.record_request(operation);
        if limit == 0 {
            return Vec::new();
        }

        let query = ArticleQuery::new(
            RegionFilter::for_site(site),
            ArticleOrder::PublishedAt,
            offset.saturating_add(limit),
        );
        let candidates = self.fetch(operation, &site.id, &query).await;
        let mut scored = score_all(&candidates, site, self.now());
        rank_by_score(&mut scored);
        let selected = window(scored, offset, limit);

        self.record_selection(operation, &site.id, candidates.len(), selected.len());
        selected
    }

    /// Site articles ranked by score plus a view-count boost.
    pub async fn most_viewed_articles(&self, site: &SiteConfig, limit: usize) -> Vec<WeightedArticle> {
        let operation = Operation::MostViewed;
        self.record_request(operation);
        if limit == 0 {
            return Vec::new();
        }

        let query = ArticleQuery::new(
            RegionFilter::for_site(site),
            ArticleOrder::ViewCount,
            limit.saturating_mul(self.tuning.view_overfetch_factor.max(1)),
        );
        let candidates = self.fetch(operation, &site.id, &query).await;
        let mut scored = score_all(&candidates, site, self.now());
        apply_view_boost(&mut scored, self.tuning.view_boost_weight);
        rank_by_score(&mut scored);
        scored.truncate(limit);

        self.record_selection(operation, &site.id, candidates.len(), scored.len());
        scored
    }

    /// Newest site articles in store order, annotated with scores.
    pub async fn latest_articles(&self, site: &SiteConfig, limit: usize) -> Vec<WeightedArticle> {
        let operation = Operation::Latest;
        self.record_request(operation);
        if limit == 0 {
            return Vec::new();
        }

        let query = ArticleQuery::new(RegionFilter::for_site(site), ArticleOrder::PublishedAt, limit);
        let candidates = self.fetch(operation, &site.id, &query).await;
        let mut scored = score_all(&candidates, site, self.now());
        scored.truncate(limit);

        self.record_selection(operation, &site.id, candidates.len(), scored.len());
        scored
    }

    /// Hero carousel mixing primary and adjacent-region articles.
    pub async fn hero_articles(&self, site: &SiteConfig) -> Vec<WeightedArticle> {
        let operation = Operation::Hero;
        self.record_request(operation);
        let hero = &site.hero;

        let primary_query = ArticleQuery::new(
            RegionFilter::for_groups(site, &[RegionType::Primary]),
            ArticleOrder::PublishedAt,
            hero.primary_min_count
                .saturating_add(self.tuning.hero_primary_buffer),
        );
        let adjacent_query = ArticleQuery::new(
            RegionFilter::for_groups(site, &[RegionType::Adjacent1, RegionType::Adjacent2]),
            ArticleOrder::PublishedAt,
            hero.article_count,
        );

        let (primary, adjacent) = tokio::join!(
            self.fetch(operation, &site.id, &primary_query),
            self.fetch(operation, &site.id, &adjacent_query),
        );

        let now = self.now();
        let candidates = primary.len() + adjacent.len();
        let selected = assemble_hero(
            score_all(&primary, site, now),
            score_all(&adjacent, site, now),
            hero,
        );

        self.record_selection(operation, &site.id, candidates, selected.len());
        selected
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    async fn fetch(&self, operation: Operation, site_id: &str, query: &ArticleQuery) -> Vec<Article> {
        if query.limit == 0 {
            return Vec::new();
        }
        match self.store.fetch_published(query).await {
            Ok(articles) => articles,
            Err(error) => {
                warn!(
                    site_id,
                    operation = operation.as_str(),
                    order = query.order.column(),
                    limit = query.limit,
                    error = %error,
                    "article fetch failed, using empty candidate pool"
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_fetch_failure(operation.as_str());
                }
                Vec::new()
            }
        }
    }

    fn record_request(&self, operation: Operation) {
        if let Some(metrics) = &self.metrics {
            metrics.record_request(operation.as_str());
        }
    }

    fn record_selection(&self, operation: Operation, site_id: &str, candidates: usize, selected: usize) {
        debug!(
            site_id,
            operation = operation.as_str(),
            candidates,
            selected,
            "selection completed"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_selection_size(operation.as_str(), selected);
        }
    }
}
