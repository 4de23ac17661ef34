//! Page fetcher trait definitions

use async_trait::async_trait;

use crate::errors::SourceResult;

/// Fetches the raw text content of a source page
///
/// Implementations carry their own timeout; any failure, including a timeout,
/// is reported as a `SourceError` and treated by callers as a failure of that
/// single source.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}
