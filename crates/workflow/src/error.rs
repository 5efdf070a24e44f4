//! Workflow error types.

use common::{OrderId, ProductId, UserId};
use domain::DomainError;
use store::StoreError;
use thiserror::Error;

use crate::services::payment::PaymentError;
use crate::services::shipping::ShippingError;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Input failed validation; nothing was persisted.
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),

    /// Referenced order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Authenticated caller does not own the order.
    #[error("Order {0} does not belong to the requesting user")]
    Forbidden(OrderId),

    /// Tracking requested for an order with no registered shipment.
    #[error("Order {0} has no registered shipment")]
    NoShipment(OrderId),

    /// Referenced user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Resource store failure.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Shipping provider failure that could not be downgraded
    /// (tracking lookups; placement downgrades these to a warning).
    #[error("Shipping provider error: {0}")]
    Shipping(#[from] ShippingError),

    /// Payment gateway failure.
    #[error("Payment gateway error: {0}")]
    Payment(#[from] PaymentError),
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, WorkflowError>;
