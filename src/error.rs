use std::time::Duration;
use thiserror::Error;

use crate::recipe::FieldViolation;

/// Failures raised while talking to a third-party service
#[derive(Error, Debug)]
pub enum VendorError {
    /// Connection, TLS or body decoding failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service did not answer within the allowed time
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// The service answered with a non-success status
    #[error("returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A transcription job ended without producing a transcript
    #[error("job ended with status '{status}': {detail}")]
    JobFailed { status: String, detail: String },

    /// The service answered successfully but not in the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedPayload(String),

    /// Local I/O needed to build the request failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VendorError {
    /// Map a reqwest error, keeping timeouts distinguishable.
    pub fn from_request(error: reqwest::Error, timeout: Option<Duration>) -> Self {
        match timeout {
            Some(limit) if error.is_timeout() => VendorError::Timeout(limit),
            _ => VendorError::Transport(error),
        }
    }

    /// Build a `Status` error from a non-success response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        VendorError::Status { status, body }
    }
}

/// The model answered, but not with a usable recipe object
#[derive(Error, Debug)]
pub enum ContractError {
    /// The cleaned response was not a JSON object
    #[error("Failed to parse JSON from model response: {reason}. Raw output was: {raw}")]
    MalformedOutput { reason: String, raw: String },

    /// The response parsed but broke the recipe schema
    #[error("Recipe JSON {}. Raw output: {raw}", describe_violations(.missing, .invalid))]
    SchemaViolation {
        missing: Vec<String>,
        invalid: Vec<FieldViolation>,
        raw: String,
    },
}

impl ContractError {
    /// The unmodified model text attached to every contract failure.
    pub fn raw_output(&self) -> &str {
        match self {
            ContractError::MalformedOutput { raw, .. } => raw,
            ContractError::SchemaViolation { raw, .. } => raw,
        }
    }
}

fn describe_violations(missing: &[String], invalid: &[FieldViolation]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing keys: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        let fields: Vec<String> = invalid.iter().map(|v| v.to_string()).collect();
        parts.push(format!("invalid fields: {}", fields.join(", ")));
    }
    parts.join("; ")
}

/// Errors that can occur while turning a video into a recipe
#[derive(Error, Debug)]
pub enum RelayError {
    /// Bad, missing or empty input from the caller
    #[error("{0}")]
    ClientInput(String),

    /// A deployment secret or endpoint needed by this path is not configured
    #[error("{0}")]
    ServerConfiguration(String),

    /// A transcription, scraping or generative model call failed
    #[error("{vendor} error: {source}")]
    Vendor {
        vendor: &'static str,
        #[source]
        source: VendorError,
    },

    /// The generative model output broke the recipe contract
    #[error(transparent)]
    OutputContract(#[from] ContractError),

    /// The uploaded media could not be written to temporary storage
    #[error("Failed to save uploaded file: {0}")]
    Staging(#[source] std::io::Error),
}

impl RelayError {
    pub fn vendor(vendor: &'static str, source: VendorError) -> Self {
        RelayError::Vendor { vendor, source }
    }

    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::ClientInput(_) => 400,
            RelayError::ServerConfiguration(_) => 500,
            RelayError::Vendor { .. } => 502,
            RelayError::OutputContract(_) => 500,
            RelayError::Staging(_) => 500,
        }
    }
}
