//! Entry point for the `bank-app` HTTP server.

use std::sync::Arc;

use bank_app::{routes::create_router, store::AccountStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = std::env::var("BANK_LISTEN_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:5000".to_owned());

    let store = Arc::new(AccountStore::new());
    let app = create_router(store);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "bank-app listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
