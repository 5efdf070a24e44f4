//! API server entry point.

use std::sync::Arc;

use api::auth::AuthKeys;
use api::config::Config;
use store::InMemoryStore;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use workflow::{
    InMemoryPaymentGateway, InMemoryShippingProvider, PaymentGateway, RazorpayClient,
    ShippingProvider, ShiprocketClient, TokenCache,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. External clients: real ones when credentials are configured,
    //    in-memory doubles otherwise.
    let shipping: Arc<dyn ShippingProvider> = match &config.shiprocket {
        Some(sr) => {
            tracing::info!(api_url = %sr.api_url, "using Shiprocket shipping provider");
            Arc::new(ShiprocketClient::new(
                sr.api_url.clone(),
                sr.email.clone(),
                sr.password.clone(),
                TokenCache::new(),
            ))
        }
        None => {
            tracing::warn!("SHIPROCKET_* not set; using in-memory shipping provider");
            Arc::new(InMemoryShippingProvider::new())
        }
    };

    let payment: Arc<dyn PaymentGateway> = match &config.razorpay {
        Some(rp) => {
            tracing::info!("using Razorpay payment gateway");
            Arc::new(RazorpayClient::new(
                rp.key_id.clone(),
                rp.key_secret.clone(),
            ))
        }
        None => {
            tracing::warn!("RAZORPAY_* not set; using in-memory payment gateway");
            Arc::new(InMemoryPaymentGateway::new())
        }
    };

    // 4. Create store and application state
    let store = InMemoryStore::new();
    let auth = AuthKeys::new(config.jwt_secret.clone());
    let state = api::create_state(store, auth, shipping, payment);

    // 5. Build the application
    let app = api::create_app(state, metrics_handle);

    // 6. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
