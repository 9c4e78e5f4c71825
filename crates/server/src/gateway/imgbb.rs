use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{GatewayError, error_message};

const SERVICE: &str = "ImgBB";

/// Hosted images expire after six months.
pub const IMGBB_EXPIRATION_SECS: u64 = 15_552_000;

/// Drops a `data:image/...;base64,` prefix, leaving bare base64 untouched.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once(',') {
        Some((_, payload)) => payload,
        None => image,
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads a base64 image (optionally a data URL) and returns its public URL.
    async fn upload(&self, image: &str) -> Result<String, GatewayError>;
}

#[derive(Clone)]
pub struct ImgbbClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ImgbbClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageHost for ImgbbClient {
    async fn upload(&self, image: &str) -> Result<String, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::NotConfigured(SERVICE))?;
        let payload = strip_data_url_prefix(image);
        let expiration = IMGBB_EXPIRATION_SECS.to_string();
        debug!(bytes = payload.len(), "uploading image");

        let response = self
            .http
            .post(format!("{}/1/upload", self.base_url))
            .form(&[
                ("key", api_key),
                ("image", payload),
                ("expiration", expiration.as_str()),
            ])
            .send()
            .await
            .map_err(|source| GatewayError::Transport {
                service: SERVICE,
                source,
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|err| GatewayError::Decode {
            service: SERVICE,
            message: err.to_string(),
        })?;

        let succeeded = body.get("success").and_then(Value::as_bool) == Some(true);
        if !status.is_success() || !succeeded {
            warn!(status = status.as_u16(), "ImgBB upload failed");
            return Err(GatewayError::Rejected {
                service: SERVICE,
                status: status.as_u16(),
                message: error_message(&body),
                body,
            });
        }

        body.pointer("/data/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Decode {
                service: SERVICE,
                message: "data.url missing from upload response".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::strip_data_url_prefix;

    #[test]
    fn strips_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,iVBORw0KGgo"), "iVBORw0KGgo");
        assert_eq!(strip_data_url_prefix("iVBORw0KGgo"), "iVBORw0KGgo");
    }
}
