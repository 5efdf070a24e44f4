//! Order placement and fulfillment workflow.
//!
//! Two side effects are chained here with asymmetric failure handling:
//! the durable order write (must succeed, aborts the operation when it
//! fails) and the shipment registration with the external provider
//! (best-effort, downgraded to a warning when it fails). The two-phase
//! order update — create, then patch with shipment metadata — is not
//! atomic; a crash between the phases leaves a valid, shipment-less
//! order that consumers detect through the `shipment` field's absence.

use std::sync::Arc;

use common::{OrderId, UserId};
use domain::{LineItem, Order, ShippingInfo};
use serde_json::Value;
use store::OrderStore;

use crate::error::{Result, WorkflowError};
use crate::services::shipping::ShippingProvider;
use crate::shipment_request::ShipmentRequest;

/// Outcome of the best-effort shipment registration.
#[derive(Debug, Clone)]
pub enum ShippingOutcome {
    /// The provider accepted the shipment; raw response attached.
    Registered(Value),
    /// The provider call failed; the order stands regardless.
    Failed(String),
}

impl ShippingOutcome {
    /// Returns the captured error detail, if registration failed.
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            ShippingOutcome::Registered(_) => None,
            ShippingOutcome::Failed(detail) => Some(detail),
        }
    }
}

/// Result of a successful order placement.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The persisted order, including shipment metadata when
    /// registration succeeded.
    pub order: Order,
    /// What happened with the shipping provider.
    pub shipping: ShippingOutcome,
}

/// Orchestrates order placement, retrieval, and tracking.
pub struct OrderWorkflow<S> {
    store: S,
    shipping: Arc<dyn ShippingProvider>,
}

impl<S: OrderStore> OrderWorkflow<S> {
    /// Creates a new workflow over the given store and shipping provider.
    pub fn new(store: S, shipping: Arc<dyn ShippingProvider>) -> Self {
        Self { store, shipping }
    }

    /// Places an order: validate, persist, then register the shipment
    /// best-effort.
    ///
    /// The order write is the durable source of truth and must succeed
    /// before the provider is contacted. A provider failure never rolls
    /// the order back; it is captured into the returned outcome so the
    /// caller can surface it as a recoverable warning.
    #[tracing::instrument(skip(self, items, shipping_info), fields(buyer = %buyer))]
    pub async fn place_order(
        &self,
        buyer: UserId,
        items: Vec<LineItem>,
        shipping_info: ShippingInfo,
        total_amount: f64,
    ) -> Result<PlacedOrder> {
        let start = std::time::Instant::now();

        let mut order = Order::place(buyer, items, shipping_info, total_amount)?;

        // Phase 1: the durable write. Any failure here aborts the whole
        // operation; no shipment call is attempted.
        self.store.insert_order(order.clone()).await?;
        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.id, total = order.total_amount, "order persisted");

        // Phase 2: best-effort shipment registration.
        let request = ShipmentRequest::from_order(&order);
        let shipping = match self.shipping.create_shipment(&request).await {
            Ok(created) => {
                if let Some(shipment) = created.shipment() {
                    order.attach_shipment(shipment)?;
                    self.store.update_order(order.clone()).await?;
                    tracing::info!(
                        order_id = %order.id,
                        shipment_id = %order.shipment.as_ref().map(|s| s.shipment_id.as_str()).unwrap_or_default(),
                        "shipment registered"
                    );
                } else {
                    tracing::warn!(order_id = %order.id, "provider response carried no shipment id");
                }
                ShippingOutcome::Registered(created.raw)
            }
            Err(e) => {
                metrics::counter!("shipment_registration_failures_total").increment(1);
                tracing::warn!(order_id = %order.id, error = %e, "shipment registration failed; order stands");
                ShippingOutcome::Failed(e.to_string())
            }
        };

        metrics::histogram!("order_placement_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        Ok(PlacedOrder { order, shipping })
    }

    /// Returns the buyer's orders, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_buyer(&self, buyer: UserId) -> Result<Vec<Order>> {
        Ok(self.store.orders_for_buyer(buyer).await?)
    }

    /// Loads a single order, enforcing that the requester owns it.
    #[tracing::instrument(skip(self))]
    pub async fn order_by_id(&self, order_id: OrderId, requester: UserId) -> Result<Order> {
        let order = self
            .store
            .get_order(order_id)
            .await?
            .ok_or(WorkflowError::OrderNotFound(order_id))?;

        if !order.is_owned_by(requester) {
            return Err(WorkflowError::Forbidden(order_id));
        }
        Ok(order)
    }

    /// Fetches live tracking data for an order's shipment.
    ///
    /// Read-through only: nothing is cached into the order, so a later
    /// fetch failure leaves stored shipment metadata stale but intact.
    /// The provider is never contacted when the order has no shipment.
    #[tracing::instrument(skip(self))]
    pub async fn track_order(&self, order_id: OrderId, requester: UserId) -> Result<Value> {
        let order = self.order_by_id(order_id, requester).await?;

        let shipment_id = order
            .shipment
            .as_ref()
            .map(|s| s.shipment_id.clone())
            .ok_or(WorkflowError::NoShipment(order_id))?;

        metrics::counter!("tracking_lookups_total").increment(1);
        Ok(self.shipping.track_shipment(&shipment_id).await?)
    }
}
