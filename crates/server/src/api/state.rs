//! Shared application state.

use std::sync::Arc;

use crate::gateway::{ImageHost, PaymentGateway};
use crate::repository::PremiumSiteRepository;

/// Services every handler can reach. Each seam is a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    /// Premium site storage.
    pub sites: Arc<dyn PremiumSiteRepository>,
    /// Mercado Pago.
    pub payments: Arc<dyn PaymentGateway>,
    /// ImgBB.
    pub images: Arc<dyn ImageHost>,
}

impl AppState {
    pub fn new(
        sites: Arc<dyn PremiumSiteRepository>,
        payments: Arc<dyn PaymentGateway>,
        images: Arc<dyn ImageHost>,
    ) -> Self {
        Self {
            sites,
            payments,
            images,
        }
    }
}
