//! Built-in Jeollanam-do site definitions.
//!
//! Each entry only lists what differs between sites: the primary place, the
//! first and second adjacency rings. Weights, hero composition and the
//! provincial group are shared.

use super::types::{HeroConfig, RegionGroup, RegionGroups, RegionWeights, SiteConfig};

const PROVINCE_NAMES: &[&str] = &["전남", "전라남도"];
const PROVINCE_SLUGS: &[&str] = &["jeonnam"];

/// (place name, slug) pairs.
type Places = &'static [(&'static str, &'static str)];

struct SiteSeed {
    id: &'static str,
    primary: Places,
    adjacent1: Places,
    adjacent2: Places,
}

const SEEDS: &[SiteSeed] = &[
    SiteSeed {
        id: "naju",
        primary: &[("나주", "naju")],
        adjacent1: &[
            ("광주", "gwangju"),
            ("화순", "hwasun"),
            ("영암", "yeongam"),
            ("함평", "hampyeong"),
        ],
        adjacent2: &[
            ("목포", "mokpo"),
            ("무안", "muan"),
            ("장성", "jangseong"),
            ("담양", "damyang"),
        ],
    },
    SiteSeed {
        id: "mokpo",
        primary: &[("목포", "mokpo")],
        adjacent1: &[("무안", "muan"), ("신안", "sinan"), ("영암", "yeongam")],
        adjacent2: &[
            ("해남", "haenam"),
            ("진도", "jindo"),
            ("나주", "naju"),
            ("함평", "hampyeong"),
        ],
    },
    SiteSeed {
        id: "suncheon",
        primary: &[("순천", "suncheon")],
        adjacent1: &[("광양", "gwangyang"), ("여수", "yeosu"), ("보성", "boseong")],
        adjacent2: &[
            ("구례", "gurye"),
            ("곡성", "gokseong"),
            ("고흥", "goheung"),
            ("화순", "hwasun"),
        ],
    },
    SiteSeed {
        id: "yeosu",
        primary: &[("여수", "yeosu")],
        adjacent1: &[("순천", "suncheon"), ("광양", "gwangyang")],
        adjacent2: &[("고흥", "goheung"), ("보성", "boseong"), ("구례", "gurye")],
    },
    SiteSeed {
        id: "gwangyang",
        primary: &[("광양", "gwangyang")],
        adjacent1: &[("순천", "suncheon"), ("여수", "yeosu")],
        adjacent2: &[("구례", "gurye"), ("곡성", "gokseong"), ("보성", "boseong")],
    },
    SiteSeed {
        id: "damyang",
        primary: &[("담양", "damyang")],
        adjacent1: &[("광주", "gwangju"), ("장성", "jangseong"), ("곡성", "gokseong")],
        adjacent2: &[("화순", "hwasun"), ("나주", "naju"), ("함평", "hampyeong")],
    },
    SiteSeed {
        id: "hwasun",
        primary: &[("화순", "hwasun")],
        adjacent1: &[("광주", "gwangju"), ("나주", "naju"), ("담양", "damyang")],
        adjacent2: &[
            ("보성", "boseong"),
            ("장흥", "jangheung"),
            ("곡성", "gokseong"),
            ("순천", "suncheon"),
        ],
    },
    SiteSeed {
        id: "yeongam",
        primary: &[("영암", "yeongam")],
        adjacent1: &[("목포", "mokpo"), ("나주", "naju"), ("강진", "gangjin")],
        adjacent2: &[("해남", "haenam"), ("장흥", "jangheung"), ("무안", "muan")],
    },
    SiteSeed {
        id: "muan",
        primary: &[("무안", "muan")],
        adjacent1: &[("목포", "mokpo"), ("신안", "sinan"), ("함평", "hampyeong")],
        adjacent2: &[("영암", "yeongam"), ("나주", "naju"), ("영광", "yeonggwang")],
    },
];

fn group(places: Places) -> RegionGroup {
    RegionGroup::new(
        places.iter().map(|(name, _)| *name),
        places.iter().map(|(_, slug)| *slug),
    )
}

fn site(seed: &SiteSeed) -> SiteConfig {
    let place = seed.primary.first().map_or(seed.id, |(name, _)| *name);
    SiteConfig {
        id: seed.id.to_string(),
        name: format!("{place}뉴스"),
        subtitle: format!("{place}와 이웃 지역의 오늘"),
        domain: format!("{}.jnnews.kr", seed.id),
        regions: RegionGroups {
            primary: group(seed.primary),
            adjacent1: group(seed.adjacent1),
            adjacent2: group(seed.adjacent2),
            province: RegionGroup::new(PROVINCE_NAMES.iter().copied(), PROVINCE_SLUGS.iter().copied()),
        },
        weights: RegionWeights::default(),
        hero: HeroConfig::default(),
        fallback_label: PROVINCE_NAMES[0].to_string(),
    }
}

pub(super) fn sites() -> Vec<SiteConfig> {
    SEEDS.iter().map(site).collect()
}
