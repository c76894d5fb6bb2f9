use log::{debug, info};
use serde_json::Value;
use std::path::Path;
use tempfile::NamedTempFile;

use super::MediaUpload;
use crate::error::RelayError;
use crate::recipe::RecipeExtractor;
use crate::transcribers::Transcriber;

/// Media extensions accepted by the upload path, lower-case.
pub const ALLOWED_EXTENSIONS: [&str; 7] = ["mp4", "m4a", "mp3", "wav", "webm", "mpeg", "ogg"];

/// Return the lower-cased extension of `filename` if it is on the allow-list.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let extension = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Process an uploaded media file into a recipe
///
/// This pipeline:
/// 1. Checks the file extension against the allow-list
/// 2. Stages the bytes in a temporary file that keeps the extension
/// 3. Transcribes the staged file
/// 4. Sends the transcript to the recipe extractor
///
/// The staged file is owned by a guard for the whole sequence and is
/// deleted when this function returns, whatever the outcome.
pub async fn process(
    upload: MediaUpload,
    transcriber: &dyn Transcriber,
    extractor: &RecipeExtractor,
    staging_dir: &Path,
) -> Result<Value, RelayError> {
    let extension = allowed_extension(&upload.filename).ok_or_else(|| {
        RelayError::ClientInput("File must be a video or audio file".to_string())
    })?;

    let staged = stage(&upload.bytes, &extension, staging_dir).await?;
    debug!(
        "Staged {} ({} bytes) at {}",
        upload.filename,
        upload.bytes.len(),
        staged.path().display()
    );

    let transcript = transcriber
        .transcribe(staged.path())
        .await
        .map_err(|e| RelayError::vendor(transcriber.vendor_name(), e))?;

    if transcript.trim().is_empty() {
        return Err(RelayError::ClientInput(
            "Transcription result was empty.".to_string(),
        ));
    }

    info!(
        "Transcribed {} into {} chars",
        upload.filename,
        transcript.len()
    );
    extractor.extract(&transcript).await
}

async fn stage(bytes: &[u8], extension: &str, dir: &Path) -> Result<NamedTempFile, RelayError> {
    let staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&format!(".{}", extension))
        .tempfile_in(dir)
        .map_err(RelayError::Staging)?;

    tokio::fs::write(staged.path(), bytes)
        .await
        .map_err(RelayError::Staging)?;

    Ok(staged)
}
