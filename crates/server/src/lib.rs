//! Vibraze storefront backend: PIX checkout, premium site storage, image hosting.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod gateway;
pub mod repository;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sea_orm::DatabaseConnection;

use api::AppState;
use config::ServerConfig;
use gateway::{ImgbbClient, MercadoPagoClient};
use repository::SeaOrmPremiumSiteRepository;

/// Wires the production services behind the router.
pub fn build_app(config: &ServerConfig, db: DatabaseConnection) -> anyhow::Result<Router> {
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .context("failed to build HTTP client")?;

    let state = AppState::new(
        Arc::new(SeaOrmPremiumSiteRepository::new(db)),
        Arc::new(MercadoPagoClient::new(
            http.clone(),
            config.mercado_pago.base_url.clone(),
            config.mercado_pago.access_token.clone(),
        )),
        Arc::new(ImgbbClient::new(
            http,
            config.imgbb.base_url.clone(),
            config.imgbb.api_key.clone(),
        )),
    );

    Ok(api::create_router(Arc::new(state)))
}
