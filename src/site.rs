//! Per-site region configuration.
//!
//! Every regional site shares one record shape: four concentric region groups,
//! their relevance weights and the hero carousel composition. The registry maps
//! site ids to immutable records and is built once at startup.

mod builtin;
pub mod registry;
pub mod types;

pub use registry::{SiteError, SiteRegistry};
pub use types::{HeroConfig, HeroIntervals, RegionGroup, RegionGroups, RegionType, RegionWeights, SiteConfig};
