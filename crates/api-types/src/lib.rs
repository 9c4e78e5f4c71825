//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Error envelope returned by every route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePixRequest {
    pub plan: Option<String>,
    pub customer: Option<CustomerInput>,
    pub amount: Option<AmountInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
}

/// The storefront sends the amount either as a number or as its string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePixResponse {
    pub success: bool,
    pub payment_id: u64,
    pub status: String,
    pub qr_code: String,
    pub qr_code_base64: Option<String>,
    pub ticket_url: Option<String>,
    pub pix_code: String,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub external_reference: Option<String>,
    pub date_created: Option<String>,
    pub date_of_expiration: Option<String>,
    pub customer: CustomerEcho,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEcho {
    pub name: String,
    pub email: String,
    pub cpf: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPaymentQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatusResponse {
    pub id: u64,
    pub status: String,
    pub status_detail: Option<String>,
    pub transaction_amount: Option<f64>,
    pub date_approved: Option<String>,
    pub date_created: Option<String>,
    pub external_reference: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookNotification {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub data: Option<WebhookData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookData {
    /// Mercado Pago sends this as a string in some notification versions.
    pub id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    pub received: bool,
}

// ---------------------------------------------------------------------------
// Premium sites
// ---------------------------------------------------------------------------

/// Site document as posted by the storefront after a successful payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumSitePayload {
    pub token: Option<String>,
    pub id: Option<String>,
    pub is_premium: Option<bool>,
    pub is_active: Option<bool>,
    pub plan: Option<String>,
    pub payment_id: Option<String>,
    pub customer_info: Option<CustomerInfoPayload>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub theme: Option<String>,
    pub names: Option<NamesPayload>,
    /// `null` and a missing key both mean no photos.
    pub photos: Option<Vec<String>>,
    pub banner: Option<String>,
    pub emoji: Option<String>,
    pub background_color: Option<String>,
    pub spotify_track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfoPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub plan: Option<String>,
    pub payment_id: Option<String>,
    pub payment_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesPayload {
    pub person1: Option<String>,
    pub person2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<SpotifyExternalUrls>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyExternalUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Names {
    pub person1: String,
    pub person2: String,
}

/// Customizable part of a site, shared by the full and the public view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub theme: String,
    pub names: Names,
    pub photos: Vec<String>,
    pub banner: String,
    pub emoji: String,
    pub background_color: String,
    pub spotify_track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub plan: String,
    pub payment_id: String,
    pub payment_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumSiteView {
    pub token: String,
    pub id: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub views: i64,
    pub plan: String,
    pub payment_id: String,
    pub customer_info: CustomerInfo,
    #[serde(flatten)]
    pub content: SiteContent,
    pub created_at: String,
    pub updated_at: String,
    pub last_viewed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePremiumSiteResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub created: bool,
    pub data: PremiumSiteView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPremiumSiteQuery {
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPremiumSiteResponse {
    pub success: bool,
    pub data: PremiumSiteView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPremiumSitesQuery {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    pub email: Option<String>,
}

/// Listing entry. The customer's CPF never leaves the server here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPremiumSite {
    pub token: String,
    pub id: String,
    pub is_premium: bool,
    pub is_active: bool,
    pub views: i64,
    pub plan: String,
    pub payment_id: String,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(flatten)]
    pub content: SiteContent,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPremiumSitesResponse {
    pub success: bool,
    pub data: Vec<PublicPremiumSite>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageRequest {
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
}

impl UploadImageRequest {
    /// Single `image` first, then the `images` list.
    pub fn into_images(self) -> Vec<String> {
        self.image
            .into_iter()
            .chain(self.images.into_iter().flatten())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub success: bool,
    pub urls: Vec<String>,
}
