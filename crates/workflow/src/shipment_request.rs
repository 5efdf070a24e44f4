//! Pure mapping from a persisted order to the shipping provider's
//! shipment-creation payload.
//!
//! The mapping never mutates the order; it copies the placement-time
//! snapshot into the provider's field names and fills in the static
//! fulfillment defaults (package dimensions, pickup location, payment
//! method label).

use domain::Order;
use serde::Serialize;

/// Pickup location label registered with the provider.
const PICKUP_LOCATION: &str = "Primary";

/// Payment method label; orders reach the workflow already paid.
const PAYMENT_METHOD: &str = "Prepaid";

// Placeholder parcel dimensions (cm) and weight (kg); the catalog does
// not carry physical dimensions.
const PACKAGE_LENGTH_CM: f64 = 10.0;
const PACKAGE_BREADTH_CM: f64 = 10.0;
const PACKAGE_HEIGHT_CM: f64 = 10.0;
const PACKAGE_WEIGHT_KG: f64 = 0.5;

/// One line item in the provider's shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentItem {
    pub name: String,
    pub sku: String,
    pub units: u32,
    pub selling_price: f64,
}

/// Shipment-creation payload in the provider's adhoc-order shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentRequest {
    pub order_id: String,
    pub order_date: String,
    pub pickup_location: String,
    pub billing_customer_name: String,
    pub billing_last_name: String,
    pub billing_address: String,
    pub billing_city: String,
    pub billing_pincode: String,
    pub billing_state: String,
    pub billing_country: String,
    pub billing_email: String,
    pub billing_phone: String,
    pub shipping_is_billing: bool,
    pub order_items: Vec<ShipmentItem>,
    pub payment_method: String,
    pub sub_total: f64,
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
    pub weight: f64,
}

impl ShipmentRequest {
    /// Builds the provider payload from an order snapshot.
    pub fn from_order(order: &Order) -> Self {
        let items: Vec<ShipmentItem> = order
            .items
            .iter()
            .map(|item| ShipmentItem {
                name: item.name.clone(),
                sku: item.product_id.to_string(),
                units: item.quantity,
                selling_price: item.price,
            })
            .collect();

        Self {
            order_id: order.id.to_string(),
            order_date: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            pickup_location: PICKUP_LOCATION.to_string(),
            billing_customer_name: "Customer".to_string(),
            billing_last_name: String::new(),
            billing_address: order.shipping_info.address.clone(),
            billing_city: order.shipping_info.city.clone().unwrap_or_default(),
            billing_pincode: order.shipping_info.pincode.clone().unwrap_or_default(),
            billing_state: String::new(),
            billing_country: "India".to_string(),
            billing_email: String::new(),
            billing_phone: order.shipping_info.phone.clone().unwrap_or_default(),
            shipping_is_billing: true,
            order_items: items,
            payment_method: PAYMENT_METHOD.to_string(),
            sub_total: order.computed_total(),
            length: PACKAGE_LENGTH_CM,
            breadth: PACKAGE_BREADTH_CM,
            height: PACKAGE_HEIGHT_CM,
            weight: PACKAGE_WEIGHT_KG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::UserId;
    use domain::{LineItem, ShippingInfo};

    fn order() -> Order {
        Order::place(
            UserId::new(),
            vec![
                LineItem::new("P1", "Bangle", 2, 100.0),
                LineItem::new("P2", "Ring", 1, 50.0),
            ],
            ShippingInfo {
                address: "1 Main St".to_string(),
                city: Some("Pune".to_string()),
                pincode: Some("411001".to_string()),
                phone: Some("9999999999".to_string()),
            },
            250.0,
        )
        .unwrap()
    }

    #[test]
    fn maps_snapshot_fields_and_defaults() {
        let order = order();
        let request = ShipmentRequest::from_order(&order);

        assert_eq!(request.order_id, order.id.to_string());
        assert_eq!(request.billing_address, "1 Main St");
        assert_eq!(request.billing_city, "Pune");
        assert_eq!(request.billing_pincode, "411001");
        assert_eq!(request.payment_method, "Prepaid");
        assert_eq!(request.pickup_location, "Primary");
        assert_eq!(request.sub_total, 250.0);
        assert_eq!(request.order_items.len(), 2);
        assert_eq!(request.order_items[0].sku, "P1");
        assert_eq!(request.order_items[0].units, 2);
    }

    #[test]
    fn mapping_does_not_mutate_the_order() {
        let order = order();
        let before = order.clone();
        let _ = ShipmentRequest::from_order(&order);
        assert_eq!(order, before);
    }
}
