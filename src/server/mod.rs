mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{health_handler, parse_recipe_handler, parse_recipe_url_handler, UrlRequest};

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::builder::RecipeRelay;

/// Build the HTTP router around a shared relay
///
/// `max_upload_bytes` caps every request body, uploads included.
pub fn create_router(relay: Arc<RecipeRelay>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/parse_recipe", post(parse_recipe_handler))
        .route("/parse_recipe_tiktok", post(parse_recipe_url_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(relay)
}
