//! Clients for the third-party HTTP APIs the storefront depends on.

mod imgbb;
mod mercado_pago;

use serde_json::Value;
use thiserror::Error;

pub use imgbb::{IMGBB_EXPIRATION_SECS, ImageHost, ImgbbClient, strip_data_url_prefix};
pub use mercado_pago::{
    GatewayPayment, MercadoPagoClient, PaymentGateway, PaymentIdentification, PaymentMetadata,
    PixPayer, PixPaymentRequest, PointOfInteraction, TransactionData,
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} credentials are not configured")]
    NotConfigured(&'static str),

    #[error("{service} rejected the request ({status}): {message}")]
    Rejected {
        service: &'static str,
        status: u16,
        message: String,
        body: Value,
    },

    #[error("request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {service}: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// Pulls a human-readable message out of an error body, the way both APIs shape them.
fn error_message(body: &Value) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| body.get("error").and_then(Value::as_str))
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::error_message;
    use serde_json::json;

    #[test]
    fn error_message_prefers_top_level_message() {
        assert_eq!(
            error_message(&json!({ "message": "invalid payer", "error": "bad_request" })),
            "invalid payer"
        );
        assert_eq!(
            error_message(&json!({ "error": { "message": "Invalid API v1 key." } })),
            "Invalid API v1 key."
        );
        assert_eq!(error_message(&json!({ "error": "not_found" })), "not_found");
        assert_eq!(error_message(&json!(null)), "unknown error");
    }
}
