//! Relay that turns cooking videos into structured recipes.
//!
//! A video reaches the relay either as an uploaded media file or as a link to
//! a hosted video. The upload is transcribed by Speechmatics, the link's
//! transcript is scraped through ScrapeCreators, and Gemini is asked to pull a
//! recipe out of the transcript. The model output is only returned after it
//! parses as a JSON object carrying every recipe key.

pub mod builder;
pub mod config;
pub mod error;
pub mod fetchers;
pub mod pipelines;
pub mod providers;
pub mod recipe;
pub mod server;
pub mod transcribers;
pub mod transcript;

// Re-export commonly used types
pub use builder::{RecipeRelay, RecipeRelayBuilder};
pub use config::{RelayConfig, ScraperSetting};
pub use error::{ContractError, RelayError, VendorError};
pub use pipelines::{MediaUpload, ScraperIntegration, TranscriptionRequest};
pub use recipe::{RecipeExtractor, ValidationMode};
pub use server::create_router;
pub use transcript::normalize_transcript;
