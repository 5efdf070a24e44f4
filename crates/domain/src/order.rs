//! Order entity and its value objects.
//!
//! An order is the durable record of a purchase. Its line items are a
//! denormalized snapshot taken at placement time, so later product edits
//! never alter historical orders. Shipment metadata is an optional nested
//! value object attached after the fact; its absence is a valid state.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Tolerance when comparing a declared total against the recomputed sum.
const TOTAL_EPSILON: f64 = 0.01;

/// A single line of an order: a point-in-time snapshot of product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Reference to the product the snapshot was taken from.
    pub product_id: ProductId,

    /// Product name as displayed at purchase time.
    pub name: String,

    /// Quantity ordered.
    pub quantity: u32,

    /// Unit price at purchase time.
    pub price: f64,
}

impl LineItem {
    /// Creates a new line item snapshot.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Returns the total for this line (quantity * price).
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Shipping destination captured once at order-creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Shipment metadata returned by the shipping provider.
///
/// Attached at most once, only when the provider call succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub shipment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Order lifecycle status.
///
/// Only `Processing` is ever set by the placement workflow; the remaining
/// states exist for admin tooling and carry no transition logic here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

/// The central entity: a placed order owned by exactly one buyer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub buyer: UserId,
    pub items: Vec<LineItem>,
    pub shipping_info: ShippingInfo,
    pub total_amount: f64,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment: Option<Shipment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Validates the inputs and constructs a new `Processing` order with no
    /// shipment attached.
    ///
    /// The declared total must match the recomputed sum of line items; the
    /// server does not trust a client-supplied total.
    pub fn place(
        buyer: UserId,
        items: Vec<LineItem>,
        shipping_info: ShippingInfo,
        total_amount: f64,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::NoItems);
        }
        for item in &items {
            if item.quantity == 0 {
                return Err(DomainError::InvalidQuantity {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                });
            }
            if item.price < 0.0 {
                return Err(DomainError::InvalidPrice {
                    product_id: item.product_id.to_string(),
                    price: item.price,
                });
            }
        }
        if shipping_info.address.trim().is_empty() {
            return Err(DomainError::MissingAddress);
        }

        let computed: f64 = items.iter().map(LineItem::line_total).sum();
        if (computed - total_amount).abs() > TOTAL_EPSILON {
            return Err(DomainError::TotalMismatch {
                declared: total_amount,
                computed,
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: OrderId::new(),
            buyer,
            items,
            shipping_info,
            total_amount,
            status: OrderStatus::Processing,
            shipment: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns the sum of `quantity * price` across line items.
    pub fn computed_total(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Attaches shipment metadata. May be called at most once per order.
    pub fn attach_shipment(&mut self, shipment: Shipment) -> Result<(), DomainError> {
        if self.shipment.is_some() {
            return Err(DomainError::ShipmentAlreadyAttached);
        }
        self.shipment = Some(shipment);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns true if the given user owns this order.
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.buyer == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            address: "1 Main St".to_string(),
            city: Some("Pune".to_string()),
            pincode: Some("411001".to_string()),
            phone: Some("9999999999".to_string()),
        }
    }

    #[test]
    fn place_creates_processing_order_without_shipment() {
        let order = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 2, 100.0)],
            shipping(),
            200.0,
        )
        .unwrap();

        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.shipment.is_none());
        assert_eq!(order.total_amount, 200.0);
    }

    #[test]
    fn place_rejects_empty_items() {
        let result = Order::place(UserId::new(), vec![], shipping(), 0.0);
        assert!(matches!(result, Err(DomainError::NoItems)));
    }

    #[test]
    fn place_rejects_zero_quantity() {
        let result = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 0, 100.0)],
            shipping(),
            0.0,
        );
        assert!(matches!(result, Err(DomainError::InvalidQuantity { .. })));
    }

    #[test]
    fn place_rejects_missing_address() {
        let mut info = shipping();
        info.address = "  ".to_string();
        let result = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 1, 100.0)],
            info,
            100.0,
        );
        assert!(matches!(result, Err(DomainError::MissingAddress)));
    }

    #[test]
    fn place_rejects_total_mismatch() {
        let result = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 2, 100.0)],
            shipping(),
            150.0,
        );
        assert!(matches!(result, Err(DomainError::TotalMismatch { .. })));
    }

    #[test]
    fn attach_shipment_is_single_shot() {
        let mut order = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 1, 100.0)],
            shipping(),
            100.0,
        )
        .unwrap();

        let shipment = Shipment {
            shipment_id: "S1".to_string(),
            tracking_code: Some("AWB1".to_string()),
            carrier_id: None,
            carrier_name: None,
            tracking_url: None,
            status: None,
        };
        order.attach_shipment(shipment.clone()).unwrap();
        assert_eq!(order.shipment.as_ref().unwrap().shipment_id, "S1");

        let result = order.attach_shipment(shipment);
        assert!(matches!(result, Err(DomainError::ShipmentAlreadyAttached)));
    }

    #[test]
    fn order_serializes_camel_case() {
        let order = Order::place(
            UserId::new(),
            vec![LineItem::new("P1", "Bangle", 2, 100.0)],
            shipping(),
            200.0,
        )
        .unwrap();

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["totalAmount"], 200.0);
        assert_eq!(json["status"], "Processing");
        assert_eq!(json["items"][0]["productId"], "P1");
        assert_eq!(json["shippingInfo"]["pincode"], "411001");
        assert!(json.get("shipment").is_none());
    }

    #[test]
    fn shipment_serializes_camel_case() {
        let shipment = Shipment {
            shipment_id: "SR123".to_string(),
            tracking_code: Some("AWB1".to_string()),
            carrier_id: Some("24".to_string()),
            carrier_name: Some("BlueDart".to_string()),
            tracking_url: Some("https://track/SR123".to_string()),
            status: Some("NEW".to_string()),
        };
        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["shipmentId"], "SR123");
        assert_eq!(json["trackingCode"], "AWB1");
        assert_eq!(json["carrierName"], "BlueDart");
    }
}
