//! HTTP API server with observability for the storefront system.
//!
//! Provides REST endpoints for orders, payment, cart, wishlist, and the
//! product catalog, with structured logging (tracing) and Prometheus
//! metrics.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use store::ResourceStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use workflow::{
    CartService, InMemoryPaymentGateway, InMemoryShippingProvider, OrderWorkflow, PaymentGateway,
    ShippingProvider, WishlistService,
};

use auth::AuthKeys;
use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: ResourceStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/orders", post(routes::orders::place::<S>))
        .route("/orders/my", get(routes::orders::my_orders::<S>))
        .route("/orders/{id}", get(routes::orders::get::<S>))
        .route("/orders/track/{id}", get(routes::orders::track::<S>))
        .route("/payment/create", post(routes::payment::create::<S>))
        .route("/cart", get(routes::cart::get::<S>))
        .route("/cart/add", post(routes::cart::add::<S>))
        .route("/cart/remove", post(routes::cart::remove::<S>))
        .route("/cart/update", post(routes::cart::update::<S>))
        .route("/cart/clear", post(routes::cart::clear::<S>))
        .route("/wishlist", get(routes::wishlist::get::<S>))
        .route("/wishlist/add", post(routes::wishlist::add::<S>))
        .route("/wishlist/remove", post(routes::wishlist::remove::<S>))
        .route("/products", get(routes::products::list::<S>))
        .route("/products", post(routes::products::create::<S>))
        .route("/products/{id}", get(routes::products::get::<S>))
        .route("/products/{id}", put(routes::products::update::<S>))
        .route("/products/{id}", delete(routes::products::delete::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over the given store and external clients.
pub fn create_state<S: ResourceStore + Clone + 'static>(
    store: S,
    auth: AuthKeys,
    shipping: Arc<dyn ShippingProvider>,
    payment: Arc<dyn PaymentGateway>,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        orders: OrderWorkflow::new(store.clone(), shipping),
        cart: CartService::new(store.clone()),
        wishlist: WishlistService::new(store.clone()),
        payment,
        store,
        auth,
    })
}

/// Creates application state with in-memory provider doubles.
pub fn create_default_state<S: ResourceStore + Clone + 'static>(
    store: S,
    auth: AuthKeys,
) -> Arc<AppState<S>> {
    create_state(
        store,
        auth,
        Arc::new(InMemoryShippingProvider::new()),
        Arc::new(InMemoryPaymentGateway::new()),
    )
}
