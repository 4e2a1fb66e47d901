//! Hero carousel assembly.
//!
//! The carousel reserves `primary_min_count` slots for the best primary-region
//! candidates, fills the rest from everything else by score, and finally
//! orders the whole set by score. The reservation is about composition, so a
//! reserved article may end up anywhere in the output.

use std::collections::HashSet;

use super::ranking::rank_by_score;
use crate::scoring::WeightedArticle;
use crate::site::HeroConfig;

/// Combine scored primary and adjacent candidates into the carousel.
#[must_use]
pub fn assemble_hero(
    mut primary: Vec<WeightedArticle>,
    adjacent: Vec<WeightedArticle>,
    hero: &HeroConfig,
) -> Vec<WeightedArticle> {
    rank_by_score(&mut primary);
    let reserved = hero.primary_min_count.min(primary.len());
    let leftover_primary = primary.split_off(reserved);
    let mut selected = primary;

    let mut seen: HashSet<String> = selected.iter().map(|c| c.article.id.clone()).collect();
    let mut remainder: Vec<WeightedArticle> = leftover_primary
        .into_iter()
        .chain(adjacent)
        .filter(|candidate| seen.insert(candidate.article.id.clone()))
        .collect();
    rank_by_score(&mut remainder);
    remainder.truncate(hero.article_count.saturating_sub(hero.primary_min_count));

    selected.extend(remainder);
    rank_by_score(&mut selected);
    selected
}
