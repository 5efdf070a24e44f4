//! Product catalog endpoints: public reads, admin-only mutations.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::ProductId;
use domain::Product;
use serde::{Deserialize, Serialize};
use store::ResourceStore;

use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Deserialize)]
pub struct ProductBody {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: &'static str,
}

/// GET /products — list the catalog.
pub async fn list<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products().await?))
}

/// GET /products/:id — a single product.
pub async fn get<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product_id = ProductId::new(id);
    let product = state
        .store
        .get_product(&product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {product_id}")))?;
    Ok(Json(product))
}

/// POST /products — admin: create a product.
#[tracing::instrument(skip(state, body), fields(admin = %admin.0.id))]
pub async fn create<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminUser,
    Json(body): Json<ProductBody>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::Validation("Product name is required".to_string()));
    }

    let mut product = Product::new(
        uuid::Uuid::new_v4().to_string(),
        body.name,
        body.kind,
        body.price,
    );
    product.image = body.image;
    product.subcategory = body.subcategory;

    state.store.upsert_product(product.clone()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/:id — admin: update a product.
#[tracing::instrument(skip(state, body), fields(admin = %admin.0.id))]
pub async fn update<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>, ApiError> {
    let product_id = ProductId::new(id);
    let mut product = state
        .store
        .get_product(&product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product not found: {product_id}")))?;

    product.name = body.name;
    product.kind = body.kind;
    product.price = body.price;
    product.image = body.image;
    product.subcategory = body.subcategory;
    product.updated_at = chrono::Utc::now();

    state.store.upsert_product(product.clone()).await?;
    Ok(Json(product))
}

/// DELETE /products/:id — admin: delete a product.
#[tracing::instrument(skip(state), fields(admin = %admin.0.id))]
pub async fn delete<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let product_id = ProductId::new(id);
    state.store.delete_product(&product_id).await?;
    Ok(Json(DeletedResponse {
        message: "Product deleted",
    }))
}
