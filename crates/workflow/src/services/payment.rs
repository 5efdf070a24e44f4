//! Payment gateway trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from the payment gateway integration.
///
/// Unlike shipping failures these surface directly: payment precedes
/// order creation in the checkout flow, so there is nothing durable to
/// protect yet.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The HTTP call itself failed (network, timeout).
    #[error("Payment gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("Payment gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The gateway response could not be interpreted.
    #[error("Unexpected payment gateway response: {0}")]
    Malformed(String),
}

/// Trait for payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a gateway-side payment order for the given amount.
    ///
    /// `amount` is in whole currency units; implementations convert to
    /// the gateway's minor units. The raw gateway order object is
    /// returned verbatim for the browser SDK to consume.
    async fn create_order(&self, amount: f64, receipt: &str) -> Result<Value, PaymentError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    next_id: u32,
    fail_on_create: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to fail on create_order calls.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_order(&self, amount: f64, receipt: &str) -> Result<Value, PaymentError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(PaymentError::Status {
                status: 502,
                body: "gateway unavailable".to_string(),
            });
        }

        state.next_id += 1;
        let amount_minor = (amount * 100.0).round() as i64;
        Ok(serde_json::json!({
            "id": format!("order_{:06}", state.next_id),
            "amount": amount_minor,
            "currency": "INR",
            "receipt": receipt,
            "status": "created",
        }))
    }
}
