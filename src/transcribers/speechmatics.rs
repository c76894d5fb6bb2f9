use async_trait::async_trait;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

use crate::config::SpeechmaticsConfig;
use crate::error::VendorError;
use crate::transcribers::Transcriber;

/// Client for the Speechmatics batch transcription API.
///
/// A transcription is a three step exchange: the media file is submitted as a
/// job, the job is polled until it settles, and the finished transcript is
/// downloaded as plain text. No overall deadline is applied to the polling.
pub struct SpeechmaticsTranscriber {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
    poll_interval: Duration,
}

#[derive(Deserialize)]
struct CreatedJob {
    id: String,
}

#[derive(Deserialize)]
struct JobEnvelope {
    job: JobDetails,
}

#[derive(Deserialize)]
struct JobDetails {
    status: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl SpeechmaticsTranscriber {
    pub fn new(config: &SpeechmaticsConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            poll_interval: config.poll_interval,
        }
    }

    async fn submit(&self, media: &Path) -> Result<String, VendorError> {
        let bytes = tokio::fs::read(media).await?;
        let file_name = media
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());

        let job_config = json!({
            "type": "transcription",
            "transcription_config": {
                "language": self.language,
            }
        });

        let form = Form::new()
            .text("config", job_config.to_string())
            .part("data_file", Part::bytes(bytes).file_name(file_name));

        debug!("Submitting {} to Speechmatics", media.display());
        let response = self
            .client
            .post(format!("{}/jobs", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(response).await);
        }

        let created: CreatedJob = response.json().await?;
        Ok(created.id)
    }

    async fn wait_until_done(&self, job_id: &str) -> Result<(), VendorError> {
        loop {
            let response = self
                .client
                .get(format!("{}/jobs/{}", self.base_url, job_id))
                .bearer_auth(&self.api_key)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(VendorError::from_response(response).await);
            }

            let envelope: JobEnvelope = response.json().await?;
            match envelope.job.status.as_str() {
                "done" => return Ok(()),
                "rejected" | "deleted" | "expired" => {
                    return Err(VendorError::JobFailed {
                        status: envelope.job.status.clone(),
                        detail: serde_json::to_string(&envelope.job.errors)
                            .unwrap_or_default(),
                    })
                }
                status => {
                    debug!("Speechmatics job {} is {}", job_id, status);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }

    async fn download(&self, job_id: &str) -> Result<String, VendorError> {
        let response = self
            .client
            .get(format!("{}/jobs/{}/transcript", self.base_url, job_id))
            .query(&[("format", "txt")])
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(response).await);
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl Transcriber for SpeechmaticsTranscriber {
    fn vendor_name(&self) -> &'static str {
        "Speechmatics"
    }

    async fn transcribe(&self, media: &Path) -> Result<String, VendorError> {
        let job_id = self.submit(media).await?;
        self.wait_until_done(&job_id).await?;
        let transcript = self.download(&job_id).await?;

        info!(
            "Speechmatics job {} finished with {} transcript chars",
            job_id,
            transcript.len()
        );
        Ok(transcript)
    }
}
