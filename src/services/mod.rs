//! Service layer
//!
//! Business logic sits here, between the web handlers and the page sources.

pub mod accumulator;
pub mod nowplaying;

pub use accumulator::ScheduleAccumulator;
pub use nowplaying::NowPlayingService;
