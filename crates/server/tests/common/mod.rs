#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{StatusCode, header::CONTENT_TYPE};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tokio::sync::oneshot;
use vibraze_server::api::{AppState, create_router};
use vibraze_server::db::init_pool_and_migrate;
use vibraze_server::gateway::{
    GatewayError, GatewayPayment, ImageHost, PaymentGateway, PixPaymentRequest,
    PointOfInteraction, TransactionData,
};
use vibraze_server::repository::SeaOrmPremiumSiteRepository;

pub const PIX_CODE: &str = "00020126580014br.gov.bcb.pix0136vibraze-test5204000053039865802BR";

pub fn pix_payment() -> GatewayPayment {
    GatewayPayment {
        id: 123_456_789,
        status: "pending".to_string(),
        status_detail: Some("pending_waiting_transfer".to_string()),
        transaction_amount: Some(19.9),
        description: Some("Vibraze Premium - Assinatura Mensal".to_string()),
        external_reference: Some("Vibraze_premium_1700000000000".to_string()),
        date_created: Some("2024-05-01T12:00:00.000-04:00".to_string()),
        date_approved: None,
        date_of_expiration: Some("2024-05-02T12:00:00.000-04:00".to_string()),
        point_of_interaction: Some(PointOfInteraction {
            transaction_data: Some(TransactionData {
                qr_code: Some(PIX_CODE.to_string()),
                qr_code_base64: Some("iVBORw0KGgo=".to_string()),
                ticket_url: Some(
                    "https://www.mercadopago.com.br/payments/123456789/ticket".to_string(),
                ),
            }),
        }),
    }
}

#[derive(Default)]
struct GatewayState {
    payment: GatewayPayment,
    rejection: Option<(u16, Value)>,
    created: Vec<(PixPaymentRequest, String)>,
    fetched: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockPaymentGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl MockPaymentGateway {
    pub fn new(payment: GatewayPayment) -> Self {
        let gateway = Self::default();
        gateway.state.lock().unwrap().payment = payment;
        gateway
    }

    pub fn rejecting(status: u16, body: Value) -> Self {
        let gateway = Self::default();
        gateway.state.lock().unwrap().rejection = Some((status, body));
        gateway
    }

    pub fn created_requests(&self) -> Vec<(PixPaymentRequest, String)> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn fetched_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().fetched.clone()
    }

    fn respond(state: &GatewayState) -> Result<GatewayPayment, GatewayError> {
        match &state.rejection {
            Some((status, body)) => Err(GatewayError::Rejected {
                service: "Mercado Pago",
                status: *status,
                message: body["message"].as_str().unwrap_or("rejected").to_string(),
                body: body.clone(),
            }),
            None => Ok(state.payment.clone()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_pix_payment(
        &self,
        request: &PixPaymentRequest,
        idempotency_key: &str,
    ) -> Result<GatewayPayment, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state
            .created
            .push((request.clone(), idempotency_key.to_string()));
        Self::respond(&state)
    }

    async fn get_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.fetched.push(payment_id.to_string());
        Self::respond(&state)
    }
}

#[derive(Clone, Default)]
pub struct MockImageHost {
    uploads: Arc<AtomicUsize>,
    fail: bool,
}

impl MockImageHost {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(&self, _image: &str) -> Result<String, GatewayError> {
        if self.fail {
            return Err(GatewayError::Rejected {
                service: "ImgBB",
                status: 400,
                message: "Invalid API v1 key.".to_string(),
                body: json!({ "success": false, "error": { "message": "Invalid API v1 key." } }),
            });
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://i.ibb.co/mock/{n}.jpg"))
    }
}

pub async fn test_db() -> DatabaseConnection {
    init_pool_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory database should migrate")
}

/// The full router served on an ephemeral local port, backed by mocks and an in-memory database.
pub struct TestApp {
    pub base_url: String,
    pub payments: MockPaymentGateway,
    pub images: MockImageHost,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_services(MockPaymentGateway::new(pix_payment()), MockImageHost::default()).await
    }

    pub async fn with_services(payments: MockPaymentGateway, images: MockImageHost) -> Self {
        let state = AppState::new(
            Arc::new(SeaOrmPremiumSiteRepository::new(test_db().await)),
            Arc::new(payments.clone()),
            Arc::new(images.clone()),
        );
        let app = create_router(Arc::new(state));

        let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            base_url: format!("http://{addr}"),
            payments,
            images,
            client: reqwest::Client::new(),
            _shutdown: tx,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(self.client.get(self.url(uri))).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(self.client.post(self.url(uri)).json(&body)).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = self
            .client
            .post(self.url(uri))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.send(request).await
    }

    fn url(&self, uri: &str) -> String {
        format!("{}{uri}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (StatusCode, Value) {
        let response = request.send().await.expect("server should respond");
        let status = response.status();
        let bytes = response.bytes().await.expect("body should be readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response should be JSON")
        };

        (status, json)
    }
}

pub fn pix_request() -> Value {
    json!({
        "plan": "premium",
        "customer": {
            "name": "Ana Maria Souza",
            "email": "Ana@Example.com",
            "cpf": "123.456.789-09"
        },
        "amount": 19.9
    })
}

pub fn site_payload(token: &str, email: &str) -> Value {
    json!({
        "token": token,
        "id": format!("site-{token}"),
        "isPremium": true,
        "isActive": true,
        "plan": "premium",
        "paymentId": "123456789",
        "customerInfo": {
            "name": "Ana Souza",
            "email": email,
            "cpf": "123.456.789-09",
            "plan": "premium",
            "paymentId": "123456789",
            "paymentDate": "2024-05-01T12:00:00Z"
        },
        "title": "Ana & Bia",
        "description": "Desde o primeiro dia",
        "startDate": "2021-06-12",
        "theme": "ocean",
        "names": { "person1": "Ana", "person2": "Bia" },
        "photos": ["https://i.ibb.co/a.jpg", "https://i.ibb.co/b.jpg"],
        "banner": "https://i.ibb.co/banner.jpg",
        "emoji": "💕",
        "backgroundColor": "#ffe4e1",
        "spotifyTrack": {
            "name": "Evidências",
            "artist": "Chitãozinho & Xororó",
            "id": "4ZrXQKzTmkWcFvG3bq4G4v",
            "embed_url": "https://open.spotify.com/embed/track/4ZrXQKzTmkWcFvG3bq4G4v",
            "external_urls": { "spotify": "https://open.spotify.com/track/4ZrXQKzTmkWcFvG3bq4G4v" }
        }
    })
}
