use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Flat settings as read from `config.toml` and the environment.
///
/// Every field maps to an upper-case environment variable of the same name,
/// e.g. `gemini_api_key` is read from `GEMINI_API_KEY`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Speechmatics batch API key (mandatory)
    pub speechmatics_api_key: Option<String>,
    #[serde(default = "default_speechmatics_base_url")]
    pub speechmatics_base_url: String,
    /// Language code sent with every transcription job
    #[serde(default = "default_language")]
    pub speechmatics_language: String,
    /// Delay between job status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub speechmatics_poll_interval_ms: u64,

    /// Google Gemini API key (mandatory)
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// ScrapeCreators API key, required together with the base URL
    pub scrapecreators_api_key: Option<String>,
    /// Full transcript endpoint, e.g. `https://api.scrapecreators.com/v1/tiktok/video/transcript`
    pub scrapecreators_base_url: Option<String>,
    /// Upper bound on a ScrapeCreators call in seconds
    #[serde(default = "default_scrape_timeout_secs")]
    pub scrape_timeout_secs: u64,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Directory uploads are staged in; the system temp dir when unset
    pub upload_dir: Option<PathBuf>,
    /// Check value shapes of model output, not just key presence
    #[serde(default)]
    pub strict_schema: bool,
}

// Default value functions
fn default_speechmatics_base_url() -> String {
    "https://asr.api.speechmatics.com/v2".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash-lite".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_scrape_timeout_secs() -> u64 {
    30
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct SpeechmaticsConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Whether the URL ingestion path has the credentials it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScraperSetting {
    Configured {
        api_key: String,
        base_url: String,
        timeout: Duration,
    },
    Unconfigured,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub max_upload_bytes: usize,
    pub upload_dir: PathBuf,
    pub strict_schema: bool,
}

/// Immutable process-wide configuration, built once at startup
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub speechmatics: SpeechmaticsConfig,
    pub gemini: GeminiConfig,
    pub scraper: ScraperSetting,
    pub server: ServerConfig,
}

impl RelayConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (e.g. GEMINI_API_KEY)
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Fails when either mandatory API key is missing.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_settings(load_settings(Environment::default())?)
    }

    /// Validate raw settings and resolve them into the runtime configuration
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let speechmatics_api_key = require(settings.speechmatics_api_key, "SPEECHMATICS_API_KEY")?;
        let gemini_api_key = require(settings.gemini_api_key, "GEMINI_API_KEY")?;

        let scraper = match (
            present(settings.scrapecreators_api_key),
            present(settings.scrapecreators_base_url),
        ) {
            (Some(api_key), Some(base_url)) => ScraperSetting::Configured {
                api_key,
                base_url,
                timeout: Duration::from_secs(settings.scrape_timeout_secs),
            },
            _ => ScraperSetting::Unconfigured,
        };

        let bind_address = settings.bind_address.parse().map_err(|e| {
            ConfigError::Message(format!(
                "BIND_ADDRESS '{}' is not a socket address: {}",
                settings.bind_address, e
            ))
        })?;

        Ok(RelayConfig {
            speechmatics: SpeechmaticsConfig {
                api_key: speechmatics_api_key,
                base_url: settings.speechmatics_base_url,
                language: settings.speechmatics_language,
                poll_interval: Duration::from_millis(settings.speechmatics_poll_interval_ms),
            },
            gemini: GeminiConfig {
                api_key: gemini_api_key,
                model: settings.gemini_model,
                base_url: settings.gemini_base_url,
            },
            scraper,
            server: ServerConfig {
                bind_address,
                max_upload_bytes: settings.max_upload_bytes,
                upload_dir: settings.upload_dir.unwrap_or_else(std::env::temp_dir),
                strict_schema: settings.strict_schema,
            },
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(value: Option<String>, name: &str) -> Result<String, ConfigError> {
    present(value).ok_or_else(|| ConfigError::NotFound(format!("{} is not set", name)))
}

fn load_settings(environment: Environment) -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Unprefixed variables; empty values behave as unset
        .add_source(environment.ignore_empty(true))
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_settings(Environment::default().source(Some(source)))
    }

    const MANDATORY: [(&str, &str); 2] = [
        ("SPEECHMATICS_API_KEY", "sm-key"),
        ("GEMINI_API_KEY", "gm-key"),
    ];

    #[test]
    fn test_default_values() {
        assert_eq!(default_language(), "en");
        assert_eq!(default_poll_interval_ms(), 2000);
        assert_eq!(default_gemini_model(), "gemini-2.5-flash-lite");
        assert_eq!(default_scrape_timeout_secs(), 30);
        assert_eq!(default_max_upload_bytes(), 104_857_600);
    }

    #[test]
    fn test_mandatory_keys_only() {
        let config = RelayConfig::from_settings(settings_from(&MANDATORY).unwrap()).unwrap();

        assert_eq!(config.speechmatics.api_key, "sm-key");
        assert_eq!(config.speechmatics.base_url, "https://asr.api.speechmatics.com/v2");
        assert_eq!(config.gemini.api_key, "gm-key");
        assert_eq!(config.scraper, ScraperSetting::Unconfigured);
        assert_eq!(config.server.bind_address.port(), 8000);
        assert!(!config.server.strict_schema);
    }

    #[test]
    fn test_missing_gemini_key_fails() {
        let settings = settings_from(&[("SPEECHMATICS_API_KEY", "sm-key")]).unwrap();
        let err = RelayConfig::from_settings(settings).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_empty_speechmatics_key_fails() {
        let settings =
            settings_from(&[("SPEECHMATICS_API_KEY", ""), ("GEMINI_API_KEY", "gm-key")]).unwrap();
        let err = RelayConfig::from_settings(settings).unwrap_err();
        assert!(err.to_string().contains("SPEECHMATICS_API_KEY"));
    }

    #[test]
    fn test_scraper_needs_key_and_base_url() {
        let mut vars = MANDATORY.to_vec();
        vars.push(("SCRAPECREATORS_API_KEY", "sc-key"));
        let half = RelayConfig::from_settings(settings_from(&vars).unwrap()).unwrap();
        assert_eq!(half.scraper, ScraperSetting::Unconfigured);

        vars.push(("SCRAPECREATORS_BASE_URL", "https://scrape.example/transcript"));
        vars.push(("SCRAPE_TIMEOUT_SECS", "5"));
        let full = RelayConfig::from_settings(settings_from(&vars).unwrap()).unwrap();
        assert_eq!(
            full.scraper,
            ScraperSetting::Configured {
                api_key: "sc-key".to_string(),
                base_url: "https://scrape.example/transcript".to_string(),
                timeout: Duration::from_secs(5),
            }
        );
    }

    #[test]
    fn test_overrides_are_parsed() {
        let mut vars = MANDATORY.to_vec();
        vars.push(("STRICT_SCHEMA", "true"));
        vars.push(("BIND_ADDRESS", "127.0.0.1:9090"));
        vars.push(("SPEECHMATICS_POLL_INTERVAL_MS", "250"));
        vars.push(("UPLOAD_DIR", "/var/tmp/uploads"));

        let config = RelayConfig::from_settings(settings_from(&vars).unwrap()).unwrap();
        assert!(config.server.strict_schema);
        assert_eq!(config.server.bind_address.to_string(), "127.0.0.1:9090");
        assert_eq!(config.speechmatics.poll_interval, Duration::from_millis(250));
        assert_eq!(config.server.upload_dir, PathBuf::from("/var/tmp/uploads"));
    }

    #[test]
    fn test_invalid_bind_address_fails() {
        let mut vars = MANDATORY.to_vec();
        vars.push(("BIND_ADDRESS", "not-an-address"));
        let err = RelayConfig::from_settings(settings_from(&vars).unwrap()).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDRESS"));
    }
}
