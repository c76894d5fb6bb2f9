use log::{debug, info};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::prompt::build_prompt;
use super::schema::{validate, ValidationMode};
use crate::error::{ContractError, RelayError};
use crate::providers::LlmProvider;

/// Removes the markdown code fence a model sometimes wraps its JSON in.
///
/// Surrounding whitespace is trimmed. When the text opens with three
/// backticks, all leading and trailing backticks are removed along with a
/// `json` label on the opening fence.
pub fn strip_code_fence(raw: &str) -> &str {
    let cleaned = raw.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }

    let inner = cleaned.trim_matches('`').trim_start();
    let unlabeled = match inner.get(..4) {
        Some(label) if label.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    unlabeled.trim()
}

/// Parse cleaned model text into a JSON object, keeping the raw text on failure.
pub fn parse_recipe_object(raw: &str) -> Result<Map<String, Value>, ContractError> {
    let malformed = |reason: String| ContractError::MalformedOutput {
        reason,
        raw: raw.to_string(),
    };

    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(malformed(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turns a transcript into a validated recipe object using a generative model
#[derive(Clone)]
pub struct RecipeExtractor {
    provider: Arc<dyn LlmProvider>,
    mode: ValidationMode,
}

impl RecipeExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>, mode: ValidationMode) -> Self {
        Self { provider, mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Ask the model for a recipe and enforce the output contract.
    ///
    /// The transcript must be non-empty; ingestion paths check this before
    /// calling. The validated object is returned exactly as the model
    /// produced it.
    pub async fn extract(&self, transcript: &str) -> Result<Value, RelayError> {
        let prompt = build_prompt(transcript);
        debug!(
            "Requesting recipe from {} ({} transcript chars)",
            self.provider.provider_name(),
            transcript.len()
        );

        let raw = self
            .provider
            .generate(&prompt)
            .await
            .map_err(|e| RelayError::vendor(self.provider.provider_name(), e))?;

        let object = parse_recipe_object(&raw)?;

        let report = validate(&object, self.mode);
        if !report.is_valid() {
            return Err(ContractError::SchemaViolation {
                missing: report.missing,
                invalid: report.invalid,
                raw,
            }
            .into());
        }

        info!(
            "Extracted recipe {:?} using {}",
            object.get("name").and_then(Value::as_str).unwrap_or("<unnamed>"),
            self.provider.provider_name()
        );
        Ok(Value::Object(object))
    }
}
