//! Order placement workflow and its external-call integrations.
//!
//! The core design decision lives in [`OrderWorkflow::place_order`]: the
//! durable order write and the best-effort shipment registration are
//! deliberately decoupled with asymmetric failure handling. The order is
//! never lost because the logistics partner is unreachable.

mod cart;
mod error;
mod order_workflow;
pub mod services;
mod shipment_request;
mod wishlist;

pub use cart::{CartItemView, CartService};
pub use error::WorkflowError;
pub use order_workflow::{OrderWorkflow, PlacedOrder, ShippingOutcome};
pub use services::payment::{InMemoryPaymentGateway, PaymentError, PaymentGateway};
pub use services::razorpay::RazorpayClient;
pub use services::shipping::{
    InMemoryShippingProvider, ShipmentCreated, ShippingError, ShippingProvider,
};
pub use services::shiprocket::{ShiprocketClient, TokenCache};
pub use shipment_request::{ShipmentItem, ShipmentRequest};
pub use wishlist::WishlistService;
