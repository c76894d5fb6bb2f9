pub mod upload;
pub mod url;

use std::sync::Arc;

use crate::fetchers::TranscriptFetcher;

/// Media file received from a client upload.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    /// Original filename as sent by the client
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// One request to turn a cooking video into a recipe.
#[derive(Debug, Clone)]
pub enum TranscriptionRequest {
    /// Uploaded audio or video file
    Upload(MediaUpload),
    /// Link to a hosted video whose transcript is scraped
    Url(String),
}

/// Runtime availability of the scraping vendor
#[derive(Clone)]
pub enum ScraperIntegration {
    Enabled(Arc<dyn TranscriptFetcher>),
    Disabled,
}
