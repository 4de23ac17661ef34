//! Source page fetching
//!
//! The extraction engine only needs "give me the text behind this URL".
//! [`PageFetcher`] is that seam; [`HttpPageFetcher`] is the production
//! implementation and tests plug in canned pages.

pub mod http;
pub mod traits;

pub use http::HttpPageFetcher;
pub use traits::PageFetcher;
