#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classification;
pub mod clients;
pub mod config;
pub mod observability;
pub mod scoring;
pub mod selection;
pub mod site;
pub mod store;
