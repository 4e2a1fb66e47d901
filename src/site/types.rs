//! Site configuration records.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One of the four concentric relevance tiers of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionType {
    Primary,
    Adjacent1,
    Adjacent2,
    Province,
}

impl RegionType {
    /// Classification order. Earlier tiers win when several match.
    pub const PRECEDENCE: [RegionType; 4] = [
        RegionType::Primary,
        RegionType::Adjacent1,
        RegionType::Adjacent2,
        RegionType::Province,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegionType::Primary => "primary",
            RegionType::Adjacent1 => "adjacent1",
            RegionType::Adjacent2 => "adjacent2",
            RegionType::Province => "province",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Place names (substring match on free text) and slugs (exact match on the
/// structured region field) belonging to one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroup {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub slugs: Vec<String>,
}

impl RegionGroup {
    #[must_use]
    pub fn new<N, S>(names: N, slugs: S) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            slugs: slugs.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionGroups {
    pub primary: RegionGroup,
    #[serde(default)]
    pub adjacent1: RegionGroup,
    #[serde(default)]
    pub adjacent2: RegionGroup,
    #[serde(default)]
    pub province: RegionGroup,
}

impl RegionGroups {
    #[must_use]
    pub fn group(&self, region_type: RegionType) -> &RegionGroup {
        match region_type {
            RegionType::Primary => &self.primary,
            RegionType::Adjacent1 => &self.adjacent1,
            RegionType::Adjacent2 => &self.adjacent2,
            RegionType::Province => &self.province,
        }
    }
}

/// Relevance multiplier per tier. Must be non-increasing along
/// [`RegionType::PRECEDENCE`] and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionWeights {
    pub primary: f64,
    pub adjacent1: f64,
    pub adjacent2: f64,
    pub province: f64,
}

impl RegionWeights {
    #[must_use]
    pub fn weight(&self, region_type: RegionType) -> f64 {
        match region_type {
            RegionType::Primary => self.primary,
            RegionType::Adjacent1 => self.adjacent1,
            RegionType::Adjacent2 => self.adjacent2,
            RegionType::Province => self.province,
        }
    }

    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.primary >= self.adjacent1
            && self.adjacent1 >= self.adjacent2
            && self.adjacent2 >= self.province
            && self.province > 0.0
    }
}

impl Default for RegionWeights {
    fn default() -> Self {
        Self {
            primary: 1.0,
            adjacent1: 0.7,
            adjacent2: 0.4,
            province: 0.3,
        }
    }
}

/// Carousel rotation interval per tier, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroIntervals {
    pub primary: u64,
    pub adjacent1: u64,
    pub adjacent2: u64,
    pub province: u64,
}

impl HeroIntervals {
    #[must_use]
    pub fn interval(&self, region_type: RegionType) -> Duration {
        let ms = match region_type {
            RegionType::Primary => self.primary,
            RegionType::Adjacent1 => self.adjacent1,
            RegionType::Adjacent2 => self.adjacent2,
            RegionType::Province => self.province,
        };
        Duration::from_millis(ms)
    }
}

impl Default for HeroIntervals {
    fn default() -> Self {
        Self {
            primary: 5000,
            adjacent1: 4000,
            adjacent2: 3000,
            province: 3000,
        }
    }
}

/// Hero carousel composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroConfig {
    pub article_count: usize,
    /// Minimum number of primary-region articles in the carousel.
    pub primary_min_count: usize,
    #[serde(default)]
    pub intervals: HeroIntervals,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            article_count: 5,
            primary_min_count: 3,
            intervals: HeroIntervals::default(),
        }
    }
}

fn default_fallback_label() -> String {
    "전남".to_string()
}

/// Configuration of a single regional site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub domain: String,
    pub regions: RegionGroups,
    #[serde(default)]
    pub weights: RegionWeights,
    #[serde(default)]
    pub hero: HeroConfig,
    /// Label shown when an article matches no configured place name.
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
}

impl SiteConfig {
    #[must_use]
    pub fn group(&self, region_type: RegionType) -> &RegionGroup {
        self.regions.group(region_type)
    }

    #[must_use]
    pub fn weight(&self, region_type: RegionType) -> f64 {
        self.weights.weight(region_type)
    }
}
