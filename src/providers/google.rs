use crate::config::GeminiConfig;
use crate::error::VendorError;
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(config: &GeminiConfig) -> Self {
        GeminiProvider {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        GeminiProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, VendorError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("Sending prompt to Gemini model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": prompt
                    }]
                }]
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(VendorError::from_response(response).await);
        }

        let response_body: Value = response.json().await?;
        debug!("Gemini response: {:?}", response_body);

        // Gemini may split one answer across several parts
        let parts: Vec<&str> = response_body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|part| part["text"].as_str()).collect())
            .unwrap_or_default();

        if parts.is_empty() {
            let reason = response_body["candidates"][0]["finishReason"]
                .as_str()
                .or_else(|| response_body["promptFeedback"]["blockReason"].as_str())
                .unwrap_or("no text candidate");
            return Err(VendorError::UnexpectedPayload(format!(
                "Gemini returned no text ({})",
                reason
            )));
        }

        Ok(parts.concat())
    }
}
