//! HTTP routes under `/api`.

mod error;
mod health;
mod images;
mod payments;
mod sites;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use health::create_health_router;
pub use images::{MAX_UPLOAD_BODY_BYTES, create_images_router};
pub use payments::create_payments_router;
pub use sites::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT, create_sites_router};
pub use state::AppState;

/// Full application router with middleware attached.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_payments_router())
        .merge(create_sites_router())
        .merge(create_images_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
