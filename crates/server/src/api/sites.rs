//! Premium site storage and retrieval.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use chrono::{NaiveDateTime, SecondsFormat};
use tracing::info;
use vibraze_api_types::{
    CustomerInfo, CustomerInfoPayload, GetPremiumSiteQuery, GetPremiumSiteResponse,
    ListPremiumSitesQuery, ListPremiumSitesResponse, Names, Pagination, PremiumSitePayload,
    PremiumSiteView, PublicPremiumSite, SavePremiumSiteResponse, SiteContent, SpotifyTrack,
};
use vibraze_core::domain::{
    BannerUrl, Cpf, DEFAULT_EMOJI, DomainError, Email, HexColor, MAX_CUSTOMER_NAME_LEN,
    MAX_DESCRIPTION_LEN, MAX_EMOJI_LEN, MAX_PAYMENT_ID_LEN, MAX_PERSON_NAME_LEN, MAX_PHOTOS,
    MAX_TITLE_LEN, MAX_TRACK_FIELD_LEN, Plan, SiteToken, Theme, parse_date_time,
    require_non_empty, validate_len,
};

use super::error::ApiError;
use super::state::AppState;
use crate::repository::{
    CustomerRecord, ListFilter, NewPremiumSite, PremiumSiteRecord, SiteContentRecord,
};

pub const DEFAULT_LIST_LIMIT: u64 = 10;
pub const MAX_LIST_LIMIT: u64 = 100;

pub fn create_sites_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/save-premium-site", post(save_premium_site))
        .route("/api/get-premium-site", get(get_premium_site))
        .route("/api/list-premium-sites", get(list_premium_sites))
}

async fn save_premium_site(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PremiumSitePayload>, JsonRejection>,
) -> Result<Json<SavePremiumSiteResponse>, ApiError> {
    let Json(payload) = payload?;
    let site = validate_site(payload)?;
    let token = site.token.clone();

    info!(
        %token,
        plan = %site.plan,
        photos = site.content.photos.len(),
        has_spotify = site.content.spotify_track.is_some(),
        "saving premium site"
    );

    let outcome = state.sites.upsert(site).await?;
    let message = if outcome.created {
        "premium site created"
    } else {
        "premium site updated"
    };
    info!(%token, created = outcome.created, "premium site saved");

    Ok(Json(SavePremiumSiteResponse {
        success: true,
        message: message.to_string(),
        token: token.into_inner(),
        created: outcome.created,
        data: to_view(&outcome.record),
    }))
}

async fn get_premium_site(
    State(state): State<Arc<AppState>>,
    query: Result<Query<GetPremiumSiteQuery>, QueryRejection>,
) -> Result<Json<GetPremiumSiteResponse>, ApiError> {
    let Query(query) = query?;
    let raw = query
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("token is required"))?;
    let token = SiteToken::parse(&raw)?;

    let Some(record) = state.sites.record_view(&token).await? else {
        info!(%token, "premium site not found");
        return Err(ApiError::not_found("premium site not found"));
    };

    info!(%token, views = record.views, "premium site viewed");

    Ok(Json(GetPremiumSiteResponse {
        success: true,
        data: to_view(&record),
    }))
}

async fn list_premium_sites(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListPremiumSitesQuery>, QueryRejection>,
) -> Result<Json<ListPremiumSitesResponse>, ApiError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let skip = query.skip.unwrap_or(0);
    let email = query
        .email
        .filter(|email| !email.trim().is_empty())
        .map(|email| Email::parse(&email))
        .transpose()?;

    let page = state.sites.list(ListFilter { email, limit, skip }).await?;
    info!(returned = page.records.len(), total = page.total, "premium sites listed");

    Ok(Json(ListPremiumSitesResponse {
        success: true,
        data: page.records.iter().map(to_public).collect(),
        pagination: Pagination {
            total: page.total,
            limit,
            skip,
            has_more: skip.saturating_add(limit) < page.total,
        },
    }))
}

/// Turns the storefront's loosely typed document into a validated site.
fn validate_site(payload: PremiumSitePayload) -> Result<NewPremiumSite, ApiError> {
    let has_token = payload
        .token
        .as_deref()
        .is_some_and(|token| !token.trim().is_empty());
    let has_email = payload
        .customer_info
        .as_ref()
        .and_then(|info| info.email.as_deref())
        .is_some_and(|email| !email.trim().is_empty());
    if !has_token || !has_email {
        return Err(ApiError::bad_request("token and email are required"));
    }

    Ok(build_site(payload)?)
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    require_non_empty(field, value.as_deref().unwrap_or_default())
}

fn build_site(payload: PremiumSitePayload) -> Result<NewPremiumSite, DomainError> {
    let token = SiteToken::parse(payload.token.as_deref().unwrap_or_default())?;
    let site_id = required("id", payload.id)?;
    let plan: Plan = required("plan", payload.plan)?.parse()?;
    let payment_id = required("paymentId", payload.payment_id)?;
    validate_len("paymentId", &payment_id, MAX_PAYMENT_ID_LEN)?;
    let customer = build_customer(payload.customer_info.unwrap_or_default())?;

    let title = required("title", payload.title)?;
    validate_len("title", &title, MAX_TITLE_LEN)?;

    let description = payload.description.unwrap_or_default();
    validate_len("description", &description, MAX_DESCRIPTION_LEN)?;

    let start_date = parse_date_time(
        "startDate",
        payload.start_date.as_deref().unwrap_or_default(),
    )?;
    let theme: Theme = payload.theme.as_deref().unwrap_or_default().parse()?;

    let names = payload.names.unwrap_or_default();
    let person1 = required("names.person1", names.person1)?;
    validate_len("names.person1", &person1, MAX_PERSON_NAME_LEN)?;
    let person2 = names.person2.unwrap_or_default().trim().to_string();
    validate_len("names.person2", &person2, MAX_PERSON_NAME_LEN)?;

    let photos: Vec<String> = payload
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(|photo| photo.trim().to_string())
        .filter(|photo| !photo.is_empty())
        .collect();
    if photos.len() > MAX_PHOTOS {
        return Err(DomainError::TooManyPhotos(photos.len()));
    }

    let banner = BannerUrl::parse(payload.banner.as_deref().unwrap_or_default())?;

    let emoji = payload
        .emoji
        .map(|emoji| emoji.trim().to_string())
        .filter(|emoji| !emoji.is_empty())
        .unwrap_or_else(|| DEFAULT_EMOJI.to_string());
    validate_len("emoji", &emoji, MAX_EMOJI_LEN)?;

    let background_color =
        HexColor::parse(payload.background_color.as_deref().unwrap_or_default())?;

    let spotify_track = payload.spotify_track.map(validate_track).transpose()?;

    Ok(NewPremiumSite {
        token,
        site_id,
        is_premium: payload.is_premium.unwrap_or(true),
        is_active: payload.is_active.unwrap_or(true),
        plan,
        payment_id,
        customer,
        content: SiteContentRecord {
            title,
            description,
            start_date,
            theme,
            person1,
            person2,
            photos,
            banner,
            emoji,
            background_color,
            spotify_track,
        },
    })
}

fn build_customer(info: CustomerInfoPayload) -> Result<CustomerRecord, DomainError> {
    let name = required("customerInfo.name", info.name)?;
    validate_len("customerInfo.name", &name, MAX_CUSTOMER_NAME_LEN)?;
    let email = Email::parse(info.email.as_deref().unwrap_or_default())?;
    let cpf = Cpf::parse(&required("customerInfo.cpf", info.cpf)?)?;
    let plan = required("customerInfo.plan", info.plan)?;
    let payment_id = required("customerInfo.paymentId", info.payment_id)?;
    let payment_date = parse_date_time(
        "customerInfo.paymentDate",
        info.payment_date.as_deref().unwrap_or_default(),
    )?;

    Ok(CustomerRecord {
        name,
        email,
        cpf,
        plan,
        payment_id,
        payment_date,
    })
}

fn validate_track(track: SpotifyTrack) -> Result<SpotifyTrack, DomainError> {
    if let Some(name) = &track.name {
        validate_len("spotifyTrack.name", name, MAX_TRACK_FIELD_LEN)?;
    }
    if let Some(artist) = &track.artist {
        validate_len("spotifyTrack.artist", artist, MAX_TRACK_FIELD_LEN)?;
    }
    Ok(track)
}

fn format_timestamp(value: NaiveDateTime) -> String {
    value.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_content(content: &SiteContentRecord) -> SiteContent {
    SiteContent {
        title: content.title.clone(),
        description: content.description.clone(),
        start_date: format_timestamp(content.start_date),
        theme: content.theme.as_str().to_string(),
        names: Names {
            person1: content.person1.clone(),
            person2: content.person2.clone(),
        },
        photos: content.photos.clone(),
        banner: content.banner.as_str().to_string(),
        emoji: content.emoji.clone(),
        background_color: content.background_color.as_str().to_string(),
        spotify_track: content.spotify_track.clone(),
    }
}

fn to_view(record: &PremiumSiteRecord) -> PremiumSiteView {
    PremiumSiteView {
        token: record.token.as_str().to_string(),
        id: record.site_id.clone(),
        is_premium: record.is_premium,
        is_active: record.is_active,
        views: record.views,
        plan: record.plan.as_str().to_string(),
        payment_id: record.payment_id.clone(),
        customer_info: CustomerInfo {
            name: record.customer.name.clone(),
            email: record.customer.email.as_str().to_string(),
            cpf: record.customer.cpf.formatted(),
            plan: record.customer.plan.clone(),
            payment_id: record.customer.payment_id.clone(),
            payment_date: format_timestamp(record.customer.payment_date),
        },
        content: to_content(&record.content),
        created_at: format_timestamp(record.created_at),
        updated_at: format_timestamp(record.updated_at),
        last_viewed_at: record.last_viewed_at.map(format_timestamp),
    }
}

fn to_public(record: &PremiumSiteRecord) -> PublicPremiumSite {
    PublicPremiumSite {
        token: record.token.as_str().to_string(),
        id: record.site_id.clone(),
        is_premium: record.is_premium,
        is_active: record.is_active,
        views: record.views,
        plan: record.plan.as_str().to_string(),
        payment_id: record.payment_id.clone(),
        customer_name: record.customer.name.clone(),
        customer_email: record.customer.email.as_str().to_string(),
        content: to_content(&record.content),
        created_at: format_timestamp(record.created_at),
        updated_at: format_timestamp(record.updated_at),
    }
}
