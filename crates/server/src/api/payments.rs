//! PIX checkout: payment creation, status polling and gateway notifications.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use vibraze_api_types::{
    AmountInput, CheckPaymentQuery, CreatePixRequest, CreatePixResponse, CustomerEcho,
    PaymentStatusResponse, WebhookAck, WebhookNotification,
};
use vibraze_core::domain::{Amount, Cpf, Email, PaymentStatus, Plan};

use super::error::ApiError;
use super::state::AppState;
use crate::gateway::{GatewayError, PixPaymentRequest};

pub fn create_payments_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/create-pix", post(create_pix))
        .route("/api/check-payment", get(check_payment))
        .route("/api/webhook", post(webhook))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn create_pix(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePixRequest>, JsonRejection>,
) -> Result<Json<CreatePixResponse>, ApiError> {
    let Json(request) = payload?;

    let (Some(plan), Some(customer), Some(amount)) =
        (non_empty(request.plan), request.customer, request.amount)
    else {
        return Err(ApiError::bad_request("required data not provided"));
    };

    let (Some(name), Some(raw_email), Some(raw_cpf)) = (
        non_empty(customer.name),
        non_empty(customer.email),
        non_empty(customer.cpf),
    ) else {
        return Err(ApiError::bad_request("incomplete customer data"));
    };

    let plan: Plan = plan.parse()?;
    let amount = match amount {
        AmountInput::Number(value) => Amount::new(value)?,
        AmountInput::Text(raw) => Amount::parse(&raw)?,
    };
    let email = Email::parse(&raw_email)?;
    let cpf = Cpf::parse(&raw_cpf)?;

    let now_millis = Utc::now().timestamp_millis();
    let payment_request =
        PixPaymentRequest::new(plan, amount, &name, &email, &cpf, now_millis)?;
    let idempotency_key = PixPaymentRequest::idempotency_key(plan, &email, now_millis);

    info!(
        %plan,
        amount = amount.value(),
        external_reference = %payment_request.external_reference,
        "creating PIX payment"
    );

    let payment = state
        .payments
        .create_pix_payment(&payment_request, &idempotency_key)
        .await
        .map_err(|err| ApiError::from(err).titled("failed to create PIX payment"))?;

    let Some(pix) = payment.pix_data() else {
        warn!(payment_id = payment.id, "gateway response has no PIX data");
        return Err(
            ApiError::bad_request("PIX data was not generated by Mercado Pago")
                .with_details("point_of_interaction.transaction_data.qr_code not found"),
        );
    };
    let qr_code = pix.qr_code.clone().unwrap_or_default();

    info!(payment_id = payment.id, status = %payment.status, "PIX payment created");

    Ok(Json(CreatePixResponse {
        success: true,
        payment_id: payment.id,
        status: payment.status.clone(),
        pix_code: qr_code.clone(),
        qr_code,
        qr_code_base64: pix.qr_code_base64.clone(),
        ticket_url: pix.ticket_url.clone(),
        amount: payment.transaction_amount,
        description: payment.description.clone(),
        external_reference: payment.external_reference.clone(),
        date_created: payment.date_created.clone(),
        date_of_expiration: payment.date_of_expiration.clone(),
        customer: CustomerEcho {
            name: name.trim().to_string(),
            email: email.into_inner(),
            cpf: raw_cpf,
        },
    }))
}

/// Gateway payment ids are numeric; anything else never reaches the gateway URL.
fn parse_payment_id(raw: Option<String>) -> Result<String, ApiError> {
    let id = non_empty(raw).ok_or_else(|| ApiError::bad_request("payment id not provided"))?;
    let id = id.trim();
    if !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::bad_request(format!("invalid payment id: {id}")));
    }
    Ok(id.to_string())
}

async fn check_payment(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CheckPaymentQuery>, QueryRejection>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let Query(query) = query?;
    let payment_id = parse_payment_id(query.id)?;

    let payment = state
        .payments
        .get_payment(&payment_id)
        .await
        .map_err(|err| match err {
            GatewayError::Rejected { body, .. } => {
                ApiError::bad_request("failed to query payment").with_details(body)
            }
            other => ApiError::from(other).titled("failed to query payment"),
        })?;

    info!(payment_id = payment.id, status = %payment.status, "payment status checked");

    Ok(Json(PaymentStatusResponse {
        id: payment.id,
        status: payment.status,
        status_detail: payment.status_detail,
        transaction_amount: payment.transaction_amount,
        date_approved: payment.date_approved,
        date_created: payment.date_created,
        external_reference: payment.external_reference,
        description: payment.description,
    }))
}

async fn webhook(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<WebhookNotification>, JsonRejection>,
) -> Result<Json<WebhookAck>, ApiError> {
    let Json(notification) = payload?;

    if notification.kind.as_deref() != Some("payment") {
        info!(kind = ?notification.kind, "ignoring non-payment notification");
        return Ok(Json(WebhookAck { received: true }));
    }

    let raw_id = notification.data.and_then(|data| data.id).and_then(|id| match id {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    });
    // Mercado Pago retries notifications answered with a 5xx.
    let payment_id = parse_payment_id(raw_id).map_err(|err| {
        warn!(error = %err.message(), "webhook notification has no usable payment id");
        ApiError::internal("failed to process webhook").with_details(err.message().to_string())
    })?;

    let payment = state.payments.get_payment(&payment_id).await.map_err(|err| {
        warn!(payment_id = %payment_id, error = %err, "webhook payment lookup failed");
        ApiError::internal("failed to process webhook").with_details(err.to_string())
    })?;

    match PaymentStatus::from_gateway(&payment.status) {
        PaymentStatus::Approved => info!(
            payment_id = payment.id,
            reference = ?payment.external_reference,
            "payment approved"
        ),
        PaymentStatus::Rejected => info!(payment_id = payment.id, "payment rejected"),
        PaymentStatus::Pending | PaymentStatus::InProcess => {
            info!(payment_id = payment.id, "payment pending")
        }
        other => info!(payment_id = payment.id, status = %other, "payment status changed"),
    }

    Ok(Json(WebhookAck { received: true }))
}

#[cfg(test)]
mod tests {
    use super::parse_payment_id;

    #[test]
    fn payment_id_must_be_numeric() {
        assert_eq!(
            parse_payment_id(Some(" 1234 ".to_string())).expect("valid id"),
            "1234"
        );
        assert!(parse_payment_id(None).is_err());
        assert!(parse_payment_id(Some("".to_string())).is_err());
        assert!(parse_payment_id(Some("12/../34".to_string())).is_err());
    }
}
