use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use vibraze_core::domain::{Amount, Cpf, Email, PayerName, Plan};

use super::{GatewayError, error_message};

const SERVICE: &str = "Mercado Pago";

/// Body of `POST /v1/payments` for a PIX charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixPaymentRequest {
    pub transaction_amount: f64,
    pub description: String,
    pub payment_method_id: String,
    pub payer: PixPayer,
    pub external_reference: String,
    pub statement_descriptor: String,
    pub metadata: PaymentMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixPayer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub identification: PaymentIdentification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentIdentification {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMetadata {
    pub plan: String,
    pub customer_name: String,
    pub customer_email: String,
}

impl PixPaymentRequest {
    pub fn new(
        plan: Plan,
        amount: Amount,
        customer_name: &str,
        email: &Email,
        cpf: &Cpf,
        created_at_millis: i64,
    ) -> Result<Self, vibraze_core::domain::DomainError> {
        let payer_name = PayerName::split(customer_name)?;

        Ok(Self {
            transaction_amount: amount.value(),
            description: plan.payment_description().to_string(),
            payment_method_id: "pix".to_string(),
            payer: PixPayer {
                email: email.as_str().to_string(),
                first_name: payer_name.first_name,
                last_name: payer_name.last_name,
                identification: PaymentIdentification {
                    kind: "CPF".to_string(),
                    number: cpf.digits().to_string(),
                },
            },
            external_reference: format!("Vibraze_{plan}_{created_at_millis}"),
            statement_descriptor: "Vibraze".to_string(),
            metadata: PaymentMetadata {
                plan: plan.as_str().to_string(),
                customer_name: customer_name.trim().to_string(),
                customer_email: email.as_str().to_string(),
            },
        })
    }

    /// Value for the `X-Idempotency-Key` header.
    pub fn idempotency_key(plan: Plan, email: &Email, created_at_millis: i64) -> String {
        format!("Vibraze_{plan}_{email}_{created_at_millis}")
    }
}

/// The subset of a Mercado Pago payment the storefront reads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GatewayPayment {
    pub id: u64,
    pub status: String,
    #[serde(default)]
    pub status_detail: Option<String>,
    #[serde(default)]
    pub transaction_amount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_reference: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub date_approved: Option<String>,
    #[serde(default)]
    pub date_of_expiration: Option<String>,
    #[serde(default)]
    pub point_of_interaction: Option<PointOfInteraction>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PointOfInteraction {
    #[serde(default)]
    pub transaction_data: Option<TransactionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionData {
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub qr_code_base64: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
}

impl GatewayPayment {
    /// PIX copy-and-paste data, present only when the gateway generated a QR code.
    pub fn pix_data(&self) -> Option<&TransactionData> {
        self.point_of_interaction
            .as_ref()?
            .transaction_data
            .as_ref()
            .filter(|data| data.qr_code.as_deref().is_some_and(|code| !code.is_empty()))
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_pix_payment(
        &self,
        request: &PixPaymentRequest,
        idempotency_key: &str,
    ) -> Result<GatewayPayment, GatewayError>;
    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;
}

#[derive(Clone)]
pub struct MercadoPagoClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl MercadoPagoClient {
    pub fn new(http: Client, base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn token(&self) -> Result<&str, GatewayError> {
        self.access_token
            .as_deref()
            .ok_or(GatewayError::NotConfigured(SERVICE))
    }

    async fn send(&self, request: RequestBuilder) -> Result<GatewayPayment, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| GatewayError::Transport {
                service: SERVICE,
                source,
            })?;
        let body: Value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %body, "Mercado Pago returned an error");
            return Err(GatewayError::Rejected {
                service: SERVICE,
                status: status.as_u16(),
                message: error_message(&body),
                body,
            });
        }

        serde_json::from_value(body).map_err(|err| GatewayError::Decode {
            service: SERVICE,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for MercadoPagoClient {
    async fn create_pix_payment(
        &self,
        request: &PixPaymentRequest,
        idempotency_key: &str,
    ) -> Result<GatewayPayment, GatewayError> {
        let token = self.token()?;
        debug!(
            external_reference = %request.external_reference,
            amount = request.transaction_amount,
            "creating PIX payment"
        );

        let builder = self
            .http
            .post(format!("{}/v1/payments", self.base_url))
            .bearer_auth(token)
            .header("X-Idempotency-Key", idempotency_key)
            .json(request);
        self.send(builder).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let token = self.token()?;
        debug!(payment_id, "fetching payment");

        let builder = self
            .http
            .get(format!("{}/v1/payments/{payment_id}", self.base_url))
            .bearer_auth(token);
        self.send(builder).await
    }
}
