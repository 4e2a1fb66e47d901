//! Pure ordering helpers shared by the selection operations.

use crate::scoring::WeightedArticle;

/// Sort descending by score. The sort is stable: equal scores keep the
/// candidate pool's order.
pub fn rank_by_score(articles: &mut [WeightedArticle]) {
    articles.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Add `views / max_views × weight` to every score, where `max_views` is taken
/// over this candidate set and floored at 1.
pub fn apply_view_boost(articles: &mut [WeightedArticle], weight: f64) {
    let max_views = articles
        .iter()
        .map(|candidate| candidate.article.views())
        .max()
        .unwrap_or(0)
        .max(1);
    #[allow(clippy::cast_precision_loss)]
    let max_views = max_views as f64;
    for candidate in articles.iter_mut() {
        #[allow(clippy::cast_precision_loss)]
        let views = candidate.article.views() as f64;
        candidate.score += views / max_views * weight;
    }
}

/// `articles[offset..offset + limit]`, clamped to the available range.
#[must_use]
pub fn window(articles: Vec<WeightedArticle>, offset: usize, limit: usize) -> Vec<WeightedArticle> {
    articles.into_iter().skip(offset).take(limit).collect()
}
