//! Exercises the real HTTP clients against local stand-ins for the remote APIs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use vibraze_core::domain::{Amount, Cpf, Email, Plan};
use vibraze_server::gateway::{
    GatewayError, ImageHost, ImgbbClient, MercadoPagoClient, PaymentGateway, PixPaymentRequest,
};

#[derive(Clone, Default)]
struct Captured {
    headers: Arc<Mutex<Vec<HeaderMap>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    forms: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

fn payment_json(id: u64, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "status_detail": "pending_waiting_transfer",
        "transaction_amount": 19.9,
        "collector_id": 1,
        "point_of_interaction": {
            "type": "PIX",
            "transaction_data": {
                "qr_code": "00020126...",
                "qr_code_base64": "iVBORw0KGgo=",
                "ticket_url": "https://www.mercadopago.com.br/payments/1/ticket"
            }
        }
    })
}

async fn create_payment(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured.headers.lock().unwrap().push(headers);
    captured.bodies.lock().unwrap().push(body);
    Json(payment_json(555, "pending"))
}

async fn fetch_payment(Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    if id == 404 {
        let body = json!({ "message": "Payment not found", "error": "not_found", "status": 404 });
        return (StatusCode::NOT_FOUND, Json(body));
    }
    (StatusCode::OK, Json(payment_json(id, "approved")))
}

async fn fake_mercado_pago(captured: Captured) -> String {
    let router = Router::new()
        .route("/v1/payments", post(create_payment))
        .route("/v1/payments/{id}", get(fetch_payment))
        .with_state(captured);
    serve(router).await
}

fn pix_request() -> PixPaymentRequest {
    PixPaymentRequest::new(
        Plan::Premium,
        Amount::new(19.9).expect("amount"),
        "Ana Souza",
        &Email::parse("ana@example.com").expect("email"),
        &Cpf::parse("12345678909").expect("cpf"),
        1_700_000_000_000,
    )
    .expect("request")
}

#[tokio::test]
async fn test_mercado_pago_create_sends_auth_and_idempotency_headers() {
    let captured = Captured::default();
    let base_url = fake_mercado_pago(captured.clone()).await;
    let client = MercadoPagoClient::new(
        reqwest::Client::new(),
        format!("{base_url}/"),
        Some("TEST-token".to_string()),
    );

    let payment = client
        .create_pix_payment(&pix_request(), "Vibraze_premium_ana@example.com_1")
        .await
        .expect("payment should be created");
    assert_eq!(payment.id, 555);
    assert_eq!(payment.status, "pending");
    assert_eq!(
        payment.pix_data().and_then(|data| data.qr_code.as_deref()),
        Some("00020126...")
    );

    let headers = captured.headers.lock().unwrap()[0].clone();
    assert_eq!(headers["authorization"], "Bearer TEST-token");
    assert_eq!(
        headers["x-idempotency-key"],
        "Vibraze_premium_ana@example.com_1"
    );
    let body = captured.bodies.lock().unwrap()[0].clone();
    assert_eq!(body["payment_method_id"], "pix");
    assert_eq!(body["payer"]["identification"]["number"], "12345678909");
}

#[tokio::test]
async fn test_mercado_pago_get_payment_and_rejection() {
    let base_url = fake_mercado_pago(Captured::default()).await;
    let client = MercadoPagoClient::new(
        reqwest::Client::new(),
        base_url,
        Some("TEST-token".to_string()),
    );

    let payment = client.get_payment("777").await.expect("payment");
    assert_eq!(payment.id, 777);
    assert_eq!(payment.status, "approved");

    let err = client.get_payment("404").await.expect_err("should be rejected");
    match err {
        GatewayError::Rejected {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Payment not found");
            assert_eq!(body["error"], "not_found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

async fn upload_image(
    State(captured): State<Captured>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let valid_key = form.get("key").map(String::as_str) == Some("imgbb-key");
    captured.forms.lock().unwrap().push(form);
    if !valid_key {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "status_code": 400,
                "error": { "message": "Invalid API v1 key.", "code": 100 },
                "success": false
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": { "url": "https://i.ibb.co/xyz/photo.png" },
            "success": true,
            "status": 200
        })),
    )
}

#[tokio::test]
async fn test_imgbb_upload_posts_form() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/1/upload", post(upload_image))
        .with_state(captured.clone());
    let base_url = serve(router).await;

    let client = ImgbbClient::new(
        reqwest::Client::new(),
        base_url.clone(),
        Some("imgbb-key".to_string()),
    );
    let url = client
        .upload("data:image/png;base64,iVBORw0KGgo=")
        .await
        .expect("upload should succeed");
    assert_eq!(url, "https://i.ibb.co/xyz/photo.png");

    let form = captured.forms.lock().unwrap()[0].clone();
    assert_eq!(form["image"], "iVBORw0KGgo=");
    assert_eq!(form["expiration"], "15552000");

    let bad_key = ImgbbClient::new(reqwest::Client::new(), base_url, Some("wrong".to_string()));
    let err = bad_key.upload("iVBORw0KGgo=").await.expect_err("bad key");
    assert!(matches!(
        err,
        GatewayError::Rejected { status: 400, ref message, .. } if message == "Invalid API v1 key."
    ));
}

#[tokio::test]
async fn test_imgbb_without_key_is_not_configured() {
    let client = ImgbbClient::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
    let err = client.upload("iVBORw0KGgo=").await.expect_err("no key");
    assert!(matches!(err, GatewayError::NotConfigured("ImgBB")));
}
