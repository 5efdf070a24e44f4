//! Shiprocket HTTP client with a single-flight token cache.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::services::shipping::{ShipmentCreated, ShippingError, ShippingProvider};
use crate::shipment_request::ShipmentRequest;

/// Process-wide cache for the provider bearer token.
///
/// The slot mutex is held across the first authentication call, so
/// concurrent first callers queue behind one login instead of racing
/// independent requests. There is no expiry or refresh: a long-lived
/// process will eventually hold a stale token, and restart is the only
/// recovery. That limitation is inherited deliberately.
#[derive(Clone, Default)]
pub struct TokenCache {
    slot: Arc<Mutex<Option<String>>>,
}

impl TokenCache {
    /// Creates an empty token cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// HTTP client for the Shiprocket external API.
#[derive(Clone)]
pub struct ShiprocketClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    password: String,
    token: TokenCache,
}

impl ShiprocketClient {
    /// Creates a client with an injected token cache.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        token: TokenCache,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            email: email.into(),
            password: password.into(),
            token,
        }
    }

    /// Returns the cached bearer token, logging in on first use.
    async fn authenticate(&self) -> Result<String, ShippingError> {
        let mut slot = self.token.slot.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": self.email,
                "password": self.password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ShippingError::Auth(format!("login returned {status}: {body}")));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ShippingError::Malformed(format!("login response: {e}")))?;

        *slot = Some(login.token.clone());
        Ok(login.token)
    }

    async fn check_status(response: reqwest::Response) -> Result<Value, ShippingError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ShippingError::Status { status, body });
        }
        response
            .json()
            .await
            .map_err(|e| ShippingError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl ShippingProvider for ShiprocketClient {
    #[tracing::instrument(skip(self, request), fields(order_id = %request.order_id))]
    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> Result<ShipmentCreated, ShippingError> {
        let token = self.authenticate().await?;

        let response = self
            .http
            .post(format!("{}/orders/create/adhoc", self.base_url))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let raw = Self::check_status(response).await?;
        Ok(ShipmentCreated { raw })
    }

    #[tracing::instrument(skip(self))]
    async fn track_shipment(&self, shipment_id: &str) -> Result<Value, ShippingError> {
        let token = self.authenticate().await?;

        let response = self
            .http
            .get(format!(
                "{}/courier/track?shipment_id={shipment_id}",
                self.base_url
            ))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response).await
    }
}
