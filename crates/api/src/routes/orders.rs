//! Order placement, retrieval, and tracking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, Path, State};
use axum::http::StatusCode;
use common::OrderId;
use domain::{LineItem, Order, ShippingInfo};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::ResourceStore;
use workflow::{
    CartService, OrderWorkflow, PaymentGateway, ShippingOutcome, WishlistService,
};

use crate::auth::{AuthKeys, AuthUser};
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub orders: OrderWorkflow<S>,
    pub cart: CartService<S>,
    pub wishlist: WishlistService<S>,
    pub payment: Arc<dyn PaymentGateway>,
    pub store: S,
    pub auth: AuthKeys,
}

impl<S> FromRef<Arc<AppState<S>>> for AuthKeys {
    fn from_ref(state: &Arc<AppState<S>>) -> Self {
        state.auth.clone()
    }
}

// -- Request types --

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<LineItemRequest>,
    pub shipping_info: ShippingInfo,
    pub total_amount: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
}

// -- Response types --

/// Response for order placement: always success-shaped once the order
/// is durable, with the shipping outcome attached either way.
#[derive(Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    pub order: Order,
    /// Raw provider response, present when registration succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shiprocket: Option<Value>,
    /// Captured error detail, present when registration failed.
    #[serde(rename = "shiprocketError", skip_serializing_if = "Option::is_none")]
    pub shiprocket_error: Option<String>,
}

// -- Handlers --

/// POST /orders — place a new order.
#[tracing::instrument(skip(state, req), fields(buyer = %user.id))]
pub async fn place<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ApiError> {
    let items: Vec<LineItem> = req
        .items
        .into_iter()
        .map(|item| LineItem::new(item.product_id, item.name, item.quantity, item.price))
        .collect();

    let placed = state
        .orders
        .place_order(user.id, items, req.shipping_info, req.total_amount)
        .await?;

    let response = match placed.shipping {
        ShippingOutcome::Registered(raw) => PlaceOrderResponse {
            message: "Order placed successfully",
            order: placed.order,
            shiprocket: Some(raw),
            shiprocket_error: None,
        },
        ShippingOutcome::Failed(detail) => PlaceOrderResponse {
            message: "Order placed, but shipping integration failed",
            order: placed.order,
            shiprocket: None,
            shiprocket_error: Some(detail),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/my — the caller's orders, newest first.
#[tracing::instrument(skip(state), fields(buyer = %user.id))]
pub async fn my_orders<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.orders_for_buyer(user.id).await?;
    Ok(Json(orders))
}

/// GET /orders/:id — a single order; owner only.
#[tracing::instrument(skip(state), fields(requester = %user.id))]
pub async fn get<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let order = state.orders.order_by_id(order_id, user.id).await?;
    Ok(Json(order))
}

/// GET /orders/track/:id — live tracking data for an order's shipment.
#[tracing::instrument(skip(state), fields(requester = %user.id))]
pub async fn track<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order_id = parse_order_id(&id)?;
    let tracking = state.orders.track_order(order_id, user.id).await?;
    Ok(Json(tracking))
}

fn parse_order_id(id: &str) -> Result<OrderId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::Validation(format!("Invalid order id: {e}")))?;
    Ok(OrderId::from_uuid(uuid))
}
