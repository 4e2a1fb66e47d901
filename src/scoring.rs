//! Region weight × freshness scoring.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classification::classify;
use crate::site::{RegionType, SiteConfig};
use crate::store::Article;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Step decay: (upper bound of age in hours, inclusive; weight).
const DECAY_STEPS: [(f64, f64); 4] = [(6.0, 1.0), (24.0, 0.9), (72.0, 0.7), (168.0, 0.5)];
const STALE_WEIGHT: f64 = 0.3;

/// An article annotated with its relevance for one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub region_type: RegionType,
    pub region_weight: f64,
    pub time_weight: f64,
    pub score: f64,
}

impl WeightedArticle {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.article.id
    }
}

/// Freshness multiplier for an article whose reference time is `reference`.
///
/// Missing timestamps fall into the stalest bucket; timestamps in the future
/// count as brand new.
#[must_use]
pub fn time_weight(reference: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(reference) = reference else {
        return STALE_WEIGHT;
    };
    #[allow(clippy::cast_precision_loss)]
    let age_hours = (now - reference).num_milliseconds() as f64 / MILLIS_PER_HOUR;
    DECAY_STEPS
        .iter()
        .find(|(max_hours, _)| age_hours <= *max_hours)
        .map_or(STALE_WEIGHT, |(_, weight)| *weight)
}

/// Score `article` for `site` as of `now`.
#[must_use]
pub fn score(article: &Article, site: &SiteConfig, now: DateTime<Utc>) -> WeightedArticle {
    let region_type = classify(article.category.as_deref(), article.region.as_deref(), site);
    let region_weight = site.weight(region_type);
    let time_weight = time_weight(article.reference_time(), now);
    WeightedArticle {
        article: article.clone(),
        region_type,
        region_weight,
        time_weight,
        score: region_weight * time_weight,
    }
}

/// Score every article, keeping input order.
#[must_use]
pub fn score_all(articles: &[Article], site: &SiteConfig, now: DateTime<Utc>) -> Vec<WeightedArticle> {
    articles.iter().map(|article| score(article, site, now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteRegistry;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[rstest]
    #[case(Duration::zero(), 1.0)]
    #[case(Duration::hours(6), 1.0)]
    #[case(Duration::hours(6) + Duration::milliseconds(1), 0.9)]
    #[case(Duration::hours(24), 0.9)]
    #[case(Duration::hours(24) + Duration::milliseconds(1), 0.7)]
    #[case(Duration::hours(72), 0.7)]
    #[case(Duration::hours(168), 0.5)]
    #[case(Duration::hours(168) + Duration::milliseconds(1), 0.3)]
    #[case(Duration::days(400), 0.3)]
    #[case(-Duration::hours(2), 1.0)]
    fn decay_buckets_are_upper_inclusive(#[case] age: Duration, #[case] expected: f64) {
        let weight = time_weight(Some(now() - age), now());
        assert!((weight - expected).abs() < f64::EPSILON, "age {age}: {weight}");
    }

    #[test]
    fn missing_timestamp_is_stale() {
        assert!((time_weight(None, now()) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn score_multiplies_region_and_time_weight() {
        let naju = SiteRegistry::builtin().lookup("naju");
        let fresh = Article::new("a", "배 수확")
            .with_category("나주")
            .with_published_at(now() - Duration::hours(1));
        let scored = score(&fresh, &naju, now());
        assert_eq!(scored.region_type, RegionType::Primary);
        assert!((scored.score - 1.0).abs() < f64::EPSILON);

        let older = Article::new("b", "지하철")
            .with_category("광주")
            .with_published_at(now() - Duration::hours(30));
        let scored = score(&older, &naju, now());
        assert_eq!(scored.region_type, RegionType::Adjacent1);
        assert!((scored.time_weight - 0.7).abs() < f64::EPSILON);
        assert!((scored.score - 0.49).abs() < 1e-9);
    }

    #[test]
    fn created_at_is_used_when_unpublished() {
        let naju = SiteRegistry::builtin().lookup("naju");
        let article = Article::new("c", "t")
            .with_category("나주")
            .with_created_at(now() - Duration::hours(100));
        assert!((score(&article, &naju, now()).time_weight - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn score_is_monotonic_in_age_and_tier() {
        let naju = SiteRegistry::builtin().lookup("naju");
        let ages = [0, 5, 6, 7, 23, 24, 25, 71, 72, 73, 167, 168, 169, 1000];
        let mut previous = f64::INFINITY;
        for hours in ages {
            let article = Article::new("m", "t")
                .with_category("화순")
                .with_published_at(now() - Duration::hours(hours));
            let current = score(&article, &naju, now()).score;
            assert!(current <= previous, "score increased at {hours}h");
            previous = current;
        }

        let published = now() - Duration::hours(10);
        let provincial = Article::new("p", "t")
            .with_category("전남")
            .with_published_at(published);
        let local = Article::new("p", "t")
            .with_category("나주")
            .with_published_at(published);
        assert!(score(&local, &naju, now()).score >= score(&provincial, &naju, now()).score);
    }
}
