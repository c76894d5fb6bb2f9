use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::VendorError;
use crate::fetchers::TranscriptFetcher;

/// Language hint sent with every transcript request
const TRANSCRIPT_LANGUAGE: &str = "en";

pub struct ScrapeCreatorsFetcher {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl ScrapeCreatorsFetcher {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Result<Self, VendorError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            endpoint,
            timeout,
        })
    }
}

#[async_trait]
impl TranscriptFetcher for ScrapeCreatorsFetcher {
    fn vendor_name(&self) -> &'static str {
        "ScrapeCreators"
    }

    async fn fetch_transcript(&self, video_url: &str) -> Result<Value, VendorError> {
        debug!("Fetching transcript for {} from ScrapeCreators", video_url);

        let response = self
            .client
            .get(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header(ACCEPT, "application/json")
            .query(&[("url", video_url), ("language", TRANSCRIPT_LANGUAGE)])
            .send()
            .await
            .map_err(|e| VendorError::from_request(e, Some(self.timeout)))?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(VendorError::from_response(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| VendorError::from_request(e, Some(self.timeout)))?;

        serde_json::from_str(&body).map_err(|e| {
            VendorError::UnexpectedPayload(format!("body is not JSON ({}): {}", e, body))
        })
    }
}
