//! Razorpay HTTP client.

use async_trait::async_trait;
use serde_json::Value;

use crate::services::payment::{PaymentError, PaymentGateway};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// HTTP client for the Razorpay orders API.
///
/// Amounts are converted to paise (minor units); currency is fixed to
/// INR. The browser-side SDK completes the charge with the returned
/// gateway order, so the body is passed through verbatim.
#[derive(Clone)]
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    /// Creates a client against the production API.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, key_id, key_secret)
    }

    /// Creates a client against a custom base URL (for tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    #[tracing::instrument(skip(self))]
    async fn create_order(&self, amount: f64, receipt: &str) -> Result<Value, PaymentError> {
        let amount_minor = (amount * 100.0).round() as i64;

        let response = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount_minor,
                "currency": "INR",
                "receipt": receipt,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Malformed(e.to_string()))
    }
}
