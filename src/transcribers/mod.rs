mod speechmatics;

pub use speechmatics::SpeechmaticsTranscriber;

use async_trait::async_trait;
use std::path::Path;

use crate::error::VendorError;

/// Speech-to-text vendor that works on a staged media file
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Get the vendor name used in logs and error messages
    fn vendor_name(&self) -> &'static str;

    /// Transcribe the media file at `media` into plain text
    async fn transcribe(&self, media: &Path) -> Result<String, VendorError>;
}
