use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{RelayConfig, ScraperSetting};
use crate::error::RelayError;
use crate::fetchers::{ScrapeCreatorsFetcher, TranscriptFetcher};
use crate::pipelines::{self, ScraperIntegration, TranscriptionRequest};
use crate::providers::{GeminiProvider, LlmProvider};
use crate::recipe::{RecipeExtractor, ValidationMode};
use crate::transcribers::{SpeechmaticsTranscriber, Transcriber};

/// Orchestrates one video-to-recipe request across the vendors
///
/// Holds no per-request state; a single instance is shared by every request.
pub struct RecipeRelay {
    transcriber: Arc<dyn Transcriber>,
    scraper: ScraperIntegration,
    extractor: RecipeExtractor,
    staging_dir: PathBuf,
}

impl RecipeRelay {
    /// Creates a new builder for assembling a relay
    ///
    /// # Example
    /// ```
    /// use recipe_relay::RecipeRelay;
    ///
    /// let builder = RecipeRelay::builder();
    /// ```
    pub fn builder() -> RecipeRelayBuilder {
        RecipeRelayBuilder::default()
    }

    /// Turn a request into a validated recipe object
    pub async fn handle(&self, request: TranscriptionRequest) -> Result<Value, RelayError> {
        match request {
            TranscriptionRequest::Upload(upload) => {
                pipelines::upload::process(
                    upload,
                    self.transcriber.as_ref(),
                    &self.extractor,
                    &self.staging_dir,
                )
                .await
            }
            TranscriptionRequest::Url(url) => {
                pipelines::url::process(&url, &self.scraper, &self.extractor).await
            }
        }
    }

    pub fn scraper_enabled(&self) -> bool {
        matches!(self.scraper, ScraperIntegration::Enabled(_))
    }
}

/// Builder for configuring a [`RecipeRelay`]
#[derive(Default)]
pub struct RecipeRelayBuilder {
    transcriber: Option<Arc<dyn Transcriber>>,
    provider: Option<Arc<dyn LlmProvider>>,
    fetcher: Option<Arc<dyn TranscriptFetcher>>,
    staging_dir: Option<PathBuf>,
    mode: ValidationMode,
}

impl RecipeRelayBuilder {
    /// Wire the production vendors described by `config`
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let mut builder = RecipeRelayBuilder::default()
            .transcriber(Arc::new(SpeechmaticsTranscriber::new(&config.speechmatics)))
            .provider(Arc::new(GeminiProvider::new(&config.gemini)))
            .staging_dir(config.server.upload_dir.clone());

        if config.server.strict_schema {
            builder = builder.validation_mode(ValidationMode::Strict);
        }

        if let ScraperSetting::Configured {
            api_key,
            base_url,
            timeout,
        } = &config.scraper
        {
            let fetcher = ScrapeCreatorsFetcher::new(api_key.clone(), base_url.clone(), *timeout)
                .map_err(|e| {
                    RelayError::ServerConfiguration(format!(
                        "Failed to create ScrapeCreators client: {}",
                        e
                    ))
                })?;
            builder = builder.fetcher(Arc::new(fetcher));
        }

        Ok(builder)
    }

    /// Set the speech-to-text vendor used by the upload path
    pub fn transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Set the generative model used for recipe extraction
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Enable the URL path with a scraping vendor
    ///
    /// Without a fetcher the URL path answers with a configuration error.
    pub fn fetcher(mut self, fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Directory uploads are staged in (defaults to the system temp dir)
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = Some(dir.into());
        self
    }

    pub fn validation_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the relay
    ///
    /// # Errors
    /// Returns `RelayError::ServerConfiguration` if no transcriber or no
    /// provider was set.
    pub fn build(self) -> Result<RecipeRelay, RelayError> {
        let transcriber = self.transcriber.ok_or_else(|| {
            RelayError::ServerConfiguration("No transcription vendor configured".to_string())
        })?;
        let provider = self.provider.ok_or_else(|| {
            RelayError::ServerConfiguration("No generative model provider configured".to_string())
        })?;

        let scraper = match self.fetcher {
            Some(fetcher) => ScraperIntegration::Enabled(fetcher),
            None => ScraperIntegration::Disabled,
        };

        Ok(RecipeRelay {
            transcriber,
            scraper,
            extractor: RecipeExtractor::new(provider, self.mode),
            staging_dir: self.staging_dir.unwrap_or_else(std::env::temp_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeminiConfig, ServerConfig, SpeechmaticsConfig};
    use std::time::Duration;

    fn relay_config(scraper: ScraperSetting) -> RelayConfig {
        RelayConfig {
            speechmatics: SpeechmaticsConfig {
                api_key: "sm-key".to_string(),
                base_url: "https://asr.example/v2".to_string(),
                language: "en".to_string(),
                poll_interval: Duration::from_secs(1),
            },
            gemini: GeminiConfig {
                api_key: "gm-key".to_string(),
                model: "gemini-2.5-flash-lite".to_string(),
                base_url: "https://gemini.example".to_string(),
            },
            scraper,
            server: ServerConfig {
                bind_address: "127.0.0.1:8000".parse().unwrap(),
                max_upload_bytes: 1024,
                upload_dir: std::env::temp_dir(),
                strict_schema: true,
            },
        }
    }

    #[test]
    fn test_build_without_transcriber_fails() {
        let result = RecipeRelay::builder().build();
        match result {
            Err(RelayError::ServerConfiguration(message)) => {
                assert!(message.contains("transcription"))
            }
            _ => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_from_config_without_scraper() {
        let relay = RecipeRelayBuilder::from_config(&relay_config(ScraperSetting::Unconfigured))
            .unwrap()
            .build()
            .unwrap();
        assert!(!relay.scraper_enabled());
        assert_eq!(relay.extractor.mode(), ValidationMode::Strict);
    }

    #[test]
    fn test_from_config_with_scraper() {
        let relay = RecipeRelayBuilder::from_config(&relay_config(ScraperSetting::Configured {
            api_key: "sc-key".to_string(),
            base_url: "https://scrape.example/transcript".to_string(),
            timeout: Duration::from_secs(30),
        }))
        .unwrap()
        .build()
        .unwrap();
        assert!(relay.scraper_enabled());
    }
}
