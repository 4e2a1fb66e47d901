//! Ordered substring classifier over the four region tiers.
//!
//! Tiers are tested in [`RegionType::PRECEDENCE`] order and the first tier with
//! a name contained in either the category or the region text wins. An article
//! that mentions nothing configured is treated as broadly provincial.

use crate::site::{RegionType, SiteConfig};

/// Lower-cased category and region text of one article.
struct Haystack {
    category: String,
    region: String,
}

impl Haystack {
    fn new(category: Option<&str>, region: Option<&str>) -> Self {
        Self {
            category: category.unwrap_or_default().to_lowercase(),
            region: region.unwrap_or_default().to_lowercase(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let needle = name.to_lowercase();
        self.category.contains(&needle) || self.region.contains(&needle)
    }
}

/// First `(tier, name)` hit scanning tiers in precedence order and names in
/// configured order.
fn first_match<'a>(haystack: &Haystack, site: &'a SiteConfig) -> Option<(RegionType, &'a str)> {
    RegionType::PRECEDENCE.into_iter().find_map(|region_type| {
        site.group(region_type)
            .names
            .iter()
            .find(|name| haystack.contains(name))
            .map(|name| (region_type, name.as_str()))
    })
}

/// Tier an article belongs to for `site`. Total: unmatched input is
/// [`RegionType::Province`].
#[must_use]
pub fn classify(category: Option<&str>, region: Option<&str>, site: &SiteConfig) -> RegionType {
    let haystack = Haystack::new(category, region);
    first_match(&haystack, site).map_or(RegionType::Province, |(region_type, _)| region_type)
}

/// Place name to show next to an article: the configured name that decided
/// its classification, or the site's provincial label.
#[must_use]
pub fn display_name(category: Option<&str>, region: Option<&str>, site: &SiteConfig) -> String {
    let haystack = Haystack::new(category, region);
    first_match(&haystack, site).map_or_else(|| site.fallback_label.clone(), |(_, name)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteRegistry;
    use rstest::rstest;

    #[rstest]
    #[case(Some("나주"), None, RegionType::Primary)]
    #[case(Some("광주광역시"), None, RegionType::Adjacent1)]
    #[case(None, Some("무안군"), RegionType::Adjacent2)]
    #[case(Some("전라남도 도정"), None, RegionType::Province)]
    #[case(Some("서울"), Some("seoul"), RegionType::Province)]
    #[case(None, None, RegionType::Province)]
    #[case(Some(""), Some(""), RegionType::Province)]
    fn classifies_naju_articles(
        #[case] category: Option<&str>,
        #[case] region: Option<&str>,
        #[case] expected: RegionType,
    ) {
        let naju = SiteRegistry::builtin().lookup("naju");
        assert_eq!(classify(category, region, &naju), expected);
    }

    #[test]
    fn primary_dominates_when_several_tiers_match() {
        let naju = SiteRegistry::builtin().lookup("naju");
        assert_eq!(
            classify(Some("전남 나주 혁신도시"), None, &naju),
            RegionType::Primary
        );
        assert_eq!(
            classify(Some("광주"), Some("나주"), &naju),
            RegionType::Primary
        );
    }

    #[test]
    fn matching_ignores_ascii_case() {
        let mut site = (*SiteRegistry::builtin().lookup("naju")).clone();
        site.regions.adjacent2.names.push("KTX".into());
        assert_eq!(classify(Some("ktx 증편"), None, &site), RegionType::Adjacent2);
    }

    #[test]
    fn empty_names_never_match() {
        let mut site = (*SiteRegistry::builtin().lookup("naju")).clone();
        site.regions.primary.names.push(String::new());
        assert_eq!(classify(Some("서울"), None, &site), RegionType::Province);
    }

    #[rstest]
    #[case(Some("나주 배"), None, "나주")]
    #[case(Some("화순 고인돌"), Some("전남"), "화순")]
    #[case(Some("전라남도"), None, "전라남도")]
    #[case(Some("부산"), None, "전남")]
    #[case(None, None, "전남")]
    fn display_name_returns_matched_name(
        #[case] category: Option<&str>,
        #[case] region: Option<&str>,
        #[case] expected: &str,
    ) {
        let naju = SiteRegistry::builtin().lookup("naju");
        assert_eq!(display_name(category, region, &naju), expected);
    }
}
