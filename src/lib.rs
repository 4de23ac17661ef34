//! Now-playing and upcoming-schedule aggregation for web radio channels
//!
//! Channel pages expose no API, so the crate fetches their markup, recovers
//! structured status and schedule data with layered heuristics, and serves
//! the result as cacheable JSON.

pub mod config;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod registry;
pub mod services;
pub mod sources;
pub mod web;
