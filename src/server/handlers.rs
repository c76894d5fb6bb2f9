use axum::extract::{Multipart, State};
use axum::Json;
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::ApiError;
use crate::builder::RecipeRelay;
use crate::error::RelayError;
use crate::pipelines::{MediaUpload, TranscriptionRequest};

/// Multipart field carrying the media file.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Recipe parser backend (file upload + TikTok URL)",
    }))
}

pub async fn parse_recipe_handler(
    State(relay): State<Arc<RecipeRelay>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        upload = Some(MediaUpload {
            filename,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| RelayError::ClientInput("No file uploaded".to_string()))?;
    info!(
        "Received upload {} ({} bytes)",
        upload.filename,
        upload.bytes.len()
    );

    let recipe = relay.handle(TranscriptionRequest::Upload(upload)).await?;
    Ok(Json(recipe))
}

pub async fn parse_recipe_url_handler(
    State(relay): State<Arc<RecipeRelay>>,
    Json(body): Json<UrlRequest>,
) -> Result<Json<Value>, ApiError> {
    info!("Received URL request for {}", body.url.trim());
    let recipe = relay.handle(TranscriptionRequest::Url(body.url)).await?;
    Ok(Json(recipe))
}
