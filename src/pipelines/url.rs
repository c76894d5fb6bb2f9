use log::{info, warn};
use serde_json::Value;

use super::ScraperIntegration;
use crate::error::RelayError;
use crate::recipe::RecipeExtractor;
use crate::transcript::{is_webvtt, normalize_transcript};

/// Process a hosted video URL into a recipe
///
/// This pipeline:
/// 1. Requires the scraping vendor to be configured
/// 2. Validates the URL is not blank
/// 3. Fetches the transcript payload from the scraping vendor
/// 4. Normalizes subtitle-formatted transcripts to plain text
/// 5. Sends the transcript to the recipe extractor
pub async fn process(
    url: &str,
    scraper: &ScraperIntegration,
    extractor: &RecipeExtractor,
) -> Result<Value, RelayError> {
    let fetcher = match scraper {
        ScraperIntegration::Enabled(fetcher) => fetcher,
        ScraperIntegration::Disabled => {
            return Err(RelayError::ServerConfiguration(
                "SCRAPECREATORS_API_KEY or SCRAPECREATORS_BASE_URL not configured".to_string(),
            ))
        }
    };

    let video_url = url.trim();
    if video_url.is_empty() {
        return Err(RelayError::ClientInput(
            "TikTok URL cannot be empty.".to_string(),
        ));
    }

    let payload = fetcher
        .fetch_transcript(video_url)
        .await
        .map_err(|e| RelayError::vendor(fetcher.vendor_name(), e))?;

    let raw_transcript = match payload.get("transcript").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!(
                "{} returned no transcript for {}. Raw response:\n{}",
                fetcher.vendor_name(),
                video_url,
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string())
            );
            return Err(RelayError::ClientInput(format!(
                "{} transcript was empty or missing.",
                fetcher.vendor_name()
            )));
        }
    };

    let transcript = normalize_transcript(raw_transcript);
    if transcript.trim().is_empty() {
        return Err(RelayError::ClientInput(format!(
            "{} transcript had no spoken text.",
            fetcher.vendor_name()
        )));
    }

    info!(
        "Fetched transcript for {} ({} chars{})",
        video_url,
        transcript.len(),
        if is_webvtt(raw_transcript) { ", from WebVTT" } else { "" }
    );

    extractor.extract(&transcript).await
}
