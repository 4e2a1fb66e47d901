use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article fields consumed by scoring and selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: Option<u64>,
}

impl Article {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            region: None,
            published_at: None,
            created_at: None,
            view_count: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_view_count(mut self, view_count: u64) -> Self {
        self.view_count = Some(view_count);
        self
    }

    /// Timestamp the article's age is measured from: publication time when
    /// known, creation time otherwise.
    #[must_use]
    pub fn reference_time(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }

    #[must_use]
    pub fn views(&self) -> u64 {
        self.view_count.unwrap_or(0)
    }
}
