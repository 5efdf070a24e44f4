//! Shipping provider trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Shipment;
use serde_json::Value;
use thiserror::Error;

use crate::shipment_request::ShipmentRequest;

/// Errors from the shipping provider integration.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Authentication with the provider failed.
    #[error("Shipping provider authentication failed: {0}")]
    Auth(String),

    /// The HTTP call itself failed (network, timeout).
    #[error("Shipping provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Shipping provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider response could not be interpreted.
    #[error("Unexpected shipping provider response: {0}")]
    Malformed(String),
}

/// Raw result of a successful shipment creation call.
///
/// The provider body is kept verbatim; typed shipment metadata is
/// extracted lazily so an unusual-but-successful response still reaches
/// the caller unchanged.
#[derive(Debug, Clone)]
pub struct ShipmentCreated {
    /// Provider response body, verbatim.
    pub raw: Value,
}

impl ShipmentCreated {
    /// Extracts shipment metadata, if the response carries a shipment id.
    ///
    /// Providers are inconsistent about numeric vs. string ids, so both
    /// are accepted.
    pub fn shipment(&self) -> Option<Shipment> {
        let shipment_id = field_as_string(&self.raw, "shipment_id")?;
        Some(Shipment {
            shipment_id,
            tracking_code: field_as_string(&self.raw, "awb_code"),
            carrier_id: field_as_string(&self.raw, "courier_company_id"),
            carrier_name: field_as_string(&self.raw, "courier_name"),
            tracking_url: field_as_string(&self.raw, "tracking_url"),
            status: field_as_string(&self.raw, "status"),
        })
    }
}

fn field_as_string(value: &Value, key: &str) -> Option<String> {
    match value.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Trait for shipping provider operations.
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Registers a shipment for a placed order.
    async fn create_shipment(
        &self,
        request: &ShipmentRequest,
    ) -> Result<ShipmentCreated, ShippingError>;

    /// Fetches live tracking data for a shipment.
    async fn track_shipment(&self, shipment_id: &str) -> Result<Value, ShippingError>;
}

#[derive(Debug)]
struct InMemoryShippingState {
    fail_on_create: bool,
    next_id: u32,
    create_response: Option<Value>,
    track_response: Value,
    create_calls: u32,
    track_calls: u32,
}

impl Default for InMemoryShippingState {
    fn default() -> Self {
        Self {
            fail_on_create: false,
            next_id: 0,
            create_response: None,
            track_response: serde_json::json!({ "tracking_data": { "shipment_status": "NEW" } }),
            create_calls: 0,
            track_calls: 0,
        }
    }
}

/// In-memory shipping provider for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingProvider {
    state: Arc<RwLock<InMemoryShippingState>>,
}

impl InMemoryShippingProvider {
    /// Creates a new in-memory shipping provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the provider to fail on create_shipment calls.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Sets a canned response body for the next create_shipment call.
    pub fn set_create_response(&self, response: Value) {
        self.state.write().unwrap().create_response = Some(response);
    }

    /// Sets the canned tracking response body.
    pub fn set_track_response(&self, response: Value) {
        self.state.write().unwrap().track_response = response;
    }

    /// Number of create_shipment calls seen.
    pub fn create_calls(&self) -> u32 {
        self.state.read().unwrap().create_calls
    }

    /// Number of track_shipment calls seen.
    pub fn track_calls(&self) -> u32 {
        self.state.read().unwrap().track_calls
    }
}

#[async_trait]
impl ShippingProvider for InMemoryShippingProvider {
    async fn create_shipment(
        &self,
        _request: &ShipmentRequest,
    ) -> Result<ShipmentCreated, ShippingError> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(ShippingError::Status {
                status: 503,
                body: "shipping unavailable".to_string(),
            });
        }

        let raw = match state.create_response.clone() {
            Some(response) => response,
            None => {
                state.next_id += 1;
                serde_json::json!({
                    "shipment_id": format!("SHIP-{:04}", state.next_id),
                    "awb_code": format!("AWB-{:04}", state.next_id),
                    "status": "NEW",
                })
            }
        };

        Ok(ShipmentCreated { raw })
    }

    async fn track_shipment(&self, _shipment_id: &str) -> Result<Value, ShippingError> {
        let mut state = self.state.write().unwrap();
        state.track_calls += 1;
        Ok(state.track_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipment_request::ShipmentRequest;
    use common::UserId;
    use domain::{LineItem, Order, ShippingInfo};

    fn request() -> ShipmentRequest {
        let order = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 2, 100.0)],
            ShippingInfo {
                address: "1 Main St".to_string(),
                city: None,
                pincode: None,
                phone: None,
            },
            200.0,
        )
        .unwrap();
        ShipmentRequest::from_order(&order)
    }

    #[tokio::test]
    async fn create_shipment_returns_sequential_ids() {
        let provider = InMemoryShippingProvider::new();

        let r1 = provider.create_shipment(&request()).await.unwrap();
        let r2 = provider.create_shipment(&request()).await.unwrap();

        assert_eq!(r1.shipment().unwrap().shipment_id, "SHIP-0001");
        assert_eq!(r2.shipment().unwrap().shipment_id, "SHIP-0002");
        assert_eq!(provider.create_calls(), 2);
    }

    #[tokio::test]
    async fn fail_on_create() {
        let provider = InMemoryShippingProvider::new();
        provider.set_fail_on_create(true);

        let result = provider.create_shipment(&request()).await;
        assert!(matches!(result, Err(ShippingError::Status { .. })));
    }

    #[test]
    fn shipment_extraction_accepts_numeric_ids() {
        let created = ShipmentCreated {
            raw: serde_json::json!({
                "shipment_id": 123456,
                "awb_code": "AWB1",
                "courier_company_id": 24,
                "courier_name": "BlueDart",
            }),
        };
        let shipment = created.shipment().unwrap();
        assert_eq!(shipment.shipment_id, "123456");
        assert_eq!(shipment.tracking_code.as_deref(), Some("AWB1"));
        assert_eq!(shipment.carrier_id.as_deref(), Some("24"));
        assert_eq!(shipment.carrier_name.as_deref(), Some("BlueDart"));
    }

    #[test]
    fn shipment_extraction_requires_shipment_id() {
        let created = ShipmentCreated {
            raw: serde_json::json!({ "status": "NEW" }),
        };
        assert!(created.shipment().is_none());
    }
}
