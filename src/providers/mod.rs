mod google;

pub use google::GeminiProvider;

use async_trait::async_trait;

use crate::error::VendorError;

/// Unified trait for generative text model vendors
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name used in logs and error messages (e.g., "Gemini")
    fn provider_name(&self) -> &'static str;

    /// Send a prompt and return the model's free-form text answer
    async fn generate(&self, prompt: &str) -> Result<String, VendorError>;
}
