//! Region classification of free-text article fields.

pub mod region;

pub use region::{classify, display_name};
