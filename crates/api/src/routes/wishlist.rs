//! Wishlist endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::ProductId;
use domain::Product;
use store::ResourceStore;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::routes::cart::ProductRef;
use crate::routes::orders::AppState;

/// GET /wishlist — the caller's wishlist, expanded to full products.
pub async fn get<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.wishlist.get_wishlist(user.id).await?))
}

/// POST /wishlist/add — add a product (idempotent).
#[tracing::instrument(skip(state, req), fields(user = %user.id))]
pub async fn add<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<ProductRef>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .wishlist
        .add(user.id, ProductId::new(req.product_id))
        .await?;
    Ok(Json(products))
}

/// POST /wishlist/remove — remove a product.
#[tracing::instrument(skip(state, req), fields(user = %user.id))]
pub async fn remove<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<ProductRef>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .wishlist
        .remove(user.id, ProductId::new(req.product_id))
        .await?;
    Ok(Json(products))
}
