use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    routing::post,
};
use futures_util::future::try_join_all;
use tracing::info;
use vibraze_api_types::{UploadImageRequest, UploadImageResponse};
use vibraze_core::domain::{DomainError, MAX_PHOTOS};

use super::error::ApiError;
use super::state::AppState;

/// A full gallery of base64 photos.
pub const MAX_UPLOAD_BODY_BYTES: usize = 40 * 1024 * 1024;

pub fn create_images_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/upload-image", post(upload_image))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
}

async fn upload_image(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UploadImageRequest>, JsonRejection>,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let Json(request) = payload?;
    let images: Vec<String> = request
        .into_images()
        .into_iter()
        .filter(|image| !image.trim().is_empty())
        .collect();

    if images.is_empty() {
        return Err(ApiError::bad_request("no image provided"));
    }
    if images.len() > MAX_PHOTOS {
        return Err(DomainError::TooManyPhotos(images.len()).into());
    }

    let urls = try_join_all(images.iter().map(|image| state.images.upload(image)))
        .await
        .map_err(|err| ApiError::from(err).titled("failed to upload image"))?;

    info!(count = urls.len(), "images uploaded");

    Ok(Json(UploadImageResponse {
        success: true,
        urls,
    }))
}
