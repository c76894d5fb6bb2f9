#![allow(dead_code)]

use async_trait::async_trait;
use recipe_relay::fetchers::TranscriptFetcher;
use recipe_relay::providers::LlmProvider;
use recipe_relay::transcribers::Transcriber;
use recipe_relay::VendorError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const TOAST: &str = r#"{"name":"Toast","description":"Crispy bread","prepTimeMinutes":1,"cookTimeMinutes":3,"servings":2,"difficulty":"easy","ingredients":[{"name":"bread","quantity":"2","unit":"slices","notes":null}],"steps":["Toast the bread."]}"#;

/// Transcriber that remembers the staged file it was handed
pub struct StubTranscriber {
    reply: Result<String, String>,
    pub seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl StubTranscriber {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Paths received so far, with whether each existed during the call
    pub fn calls(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcriber for StubTranscriber {
    fn vendor_name(&self) -> &'static str {
        "StubTranscriber"
    }

    async fn transcribe(&self, media: &Path) -> Result<String, VendorError> {
        self.seen
            .lock()
            .unwrap()
            .push((media.to_path_buf(), media.exists()));
        self.reply
            .clone()
            .map_err(VendorError::UnexpectedPayload)
    }
}

/// Generative model that answers every prompt with the same text
pub struct StubProvider {
    reply: Result<String, u16>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(status),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn provider_name(&self) -> &'static str {
        "StubModel"
    }

    async fn generate(&self, prompt: &str) -> Result<String, VendorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(|status| VendorError::Status {
            status,
            body: "model unavailable".to_string(),
        })
    }
}

/// Scraping vendor that returns a fixed payload
pub struct StubFetcher {
    payload: Result<Value, u16>,
    pub requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn returning(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            payload: Ok(payload),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            payload: Err(status),
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptFetcher for StubFetcher {
    fn vendor_name(&self) -> &'static str {
        "ScrapeCreators"
    }

    async fn fetch_transcript(&self, video_url: &str) -> Result<Value, VendorError> {
        self.requested.lock().unwrap().push(video_url.to_string());
        self.payload.clone().map_err(|status| VendorError::Status {
            status,
            body: "upstream said no".to_string(),
        })
    }
}

/// Number of entries left in a staging directory
pub fn staged_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
