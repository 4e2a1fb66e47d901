//! Region filter and query shape passed to the article store.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::article::Article;
use crate::site::{RegionType, SiteConfig};

/// Matches an article whose category contains (case-insensitively) one of
/// `names`, or whose region equals (lower-cased) one of `slugs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFilter {
    pub names: Vec<String>,
    pub slugs: Vec<String>,
}

impl RegionFilter {
    /// Union of the names and slugs of `groups` under `site`, in group order
    /// without duplicates.
    #[must_use]
    pub fn for_groups(site: &SiteConfig, groups: &[RegionType]) -> Self {
        let mut filter = Self::default();
        for &region_type in groups {
            let group = site.group(region_type);
            for name in &group.names {
                if !name.is_empty() && !filter.names.contains(name) {
                    filter.names.push(name.clone());
                }
            }
            for slug in &group.slugs {
                let slug = slug.to_lowercase();
                if !slug.is_empty() && !filter.slugs.contains(&slug) {
                    filter.slugs.push(slug);
                }
            }
        }
        filter
    }

    /// Every group of the site.
    #[must_use]
    pub fn for_site(site: &SiteConfig) -> Self {
        Self::for_groups(site, &RegionType::PRECEDENCE)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.slugs.is_empty()
    }

    #[must_use]
    pub fn matches(&self, article: &Article) -> bool {
        let category = article
            .category
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default();
        let by_name = self
            .names
            .iter()
            .any(|name| category.contains(&name.to_lowercase()));
        if by_name {
            return true;
        }
        article.region.as_deref().is_some_and(|region| {
            let region = region.to_lowercase();
            self.slugs.iter().any(|slug| *slug == region)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrder {
    /// Newest first, unpublished timestamps last.
    PublishedAt,
    /// Most viewed first, missing counts as zero. Equal counts fall back to
    /// the `PublishedAt` order.
    ViewCount,
}

impl ArticleOrder {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            ArticleOrder::PublishedAt => "published_at",
            ArticleOrder::ViewCount => "view_count",
        }
    }

    /// Ordering of two articles under this sort key. Fully tied articles
    /// compare equal so that stable sorts keep the incoming order.
    #[must_use]
    pub fn compare(self, a: &Article, b: &Article) -> Ordering {
        match self {
            ArticleOrder::PublishedAt => match (a.published_at, b.published_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            ArticleOrder::ViewCount => b
                .views()
                .cmp(&a.views())
                .then_with(|| ArticleOrder::PublishedAt.compare(a, b)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub filter: RegionFilter,
    pub order: ArticleOrder,
    pub limit: usize,
    pub offset: usize,
}

impl ArticleQuery {
    #[must_use]
    pub fn new(filter: RegionFilter, order: ArticleOrder, limit: usize) -> Self {
        Self {
            filter,
            order,
            limit,
            offset: 0,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}
