//! Payment-gateway order creation endpoint.
//!
//! The browser-side SDK completes the charge with the returned gateway
//! order; the proof of payment comes back embedded in the subsequent
//! order-placement call.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use store::ResourceStore;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::routes::orders::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub total_amount: f64,
}

/// POST /payment/create — create a gateway-side payment order.
#[tracing::instrument(skip(state, req), fields(buyer = %user.id))]
pub async fn create<S: ResourceStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthUser,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.total_amount <= 0.0 {
        return Err(ApiError::Validation(
            "totalAmount must be positive".to_string(),
        ));
    }

    let receipt = format!("rcpt_{}", uuid::Uuid::new_v4().simple());
    let order = state
        .payment
        .create_order(req.total_amount, &receipt)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(order))
}
