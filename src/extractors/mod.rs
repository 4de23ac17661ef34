//! Text extraction from source pages
//!
//! Pages are scanned with ordered, independent text rules rather than parsed
//! into a document tree; the source markup changes too often for a structural
//! parser to stay correct. Every extractor here is infallible: a rule that
//! finds nothing leaves its fields to the documented defaults.

pub mod markup;
pub mod naming;
pub mod schedule;
pub mod status;

pub use schedule::ScheduleExtractor;
pub use status::StatusExtractor;
