mod scrape_creators;

pub use scrape_creators::ScrapeCreatorsFetcher;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::VendorError;

/// Scraping vendor that returns transcript data for a hosted video
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Get the vendor name used in logs and error messages
    fn vendor_name(&self) -> &'static str;

    /// Fetch the vendor's JSON payload for `video_url`
    async fn fetch_transcript(&self, video_url: &str) -> Result<Value, VendorError>;
}
