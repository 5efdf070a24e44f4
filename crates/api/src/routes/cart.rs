//! Cart endpoints: every response is the full, expanded cart.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::ProductId;
use serde::Deserialize;
use store::ResourceStore;
use workflow::CartItemView;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub product_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityUpdate {
    pub product_id: String,
    pub quantity: u32,
}

/// GET /cart — the caller's cart, expanded against the catalog.
pub async fn get<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    Ok(Json(state.cart.get_cart(user.id).await?))
}

/// POST /cart/add — add a product (idempotent).
#[tracing::instrument(skip(state, req), fields(user = %user.id))]
pub async fn add<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<ProductRef>,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    let items = state
        .cart
        .add_item(user.id, ProductId::new(req.product_id))
        .await?;
    Ok(Json(items))
}

/// POST /cart/remove — remove a product's entry.
#[tracing::instrument(skip(state, req), fields(user = %user.id))]
pub async fn remove<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<ProductRef>,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    let items = state
        .cart
        .remove_item(user.id, ProductId::new(req.product_id))
        .await?;
    Ok(Json(items))
}

/// POST /cart/update — overwrite an entry's quantity.
#[tracing::instrument(skip(state, req), fields(user = %user.id))]
pub async fn update<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<QuantityUpdate>,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    let items = state
        .cart
        .set_quantity(user.id, ProductId::new(req.product_id), req.quantity)
        .await?;
    Ok(Json(items))
}

/// POST /cart/clear — empty the cart.
#[tracing::instrument(skip(state), fields(user = %user.id))]
pub async fn clear<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
) -> Result<Json<Vec<CartItemView>>, ApiError> {
    Ok(Json(state.cart.clear(user.id).await?))
}
