//! BGI relay entry point.
//!
//! Receives BetterGI lifecycle/task notifications over HTTP, renders each
//! one into a human-readable message, and forwards it to the configured
//! Discord webhook.

use tracing_subscriber::EnvFilter;

use bgi_notify::{load_or_create_token, WebhookSink};
use relay_api::routes::{relay_router, RelayState};
use relay_api::RelayConfig;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,relay_api=debug,bgi_notify=debug")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    // The endpoint token is resolved once at startup and immutable afterwards.
    // Failure to read or write it means no endpoint can be safely assigned.
    let endpoint_token = load_or_create_token(&config.cache_dir).unwrap_or_else(|e| {
        eprintln!("Endpoint token error: {e}");
        std::process::exit(1);
    });

    let sink = WebhookSink::new(&config.webhook_url).unwrap_or_else(|e| {
        eprintln!("Webhook client error: {e}");
        std::process::exit(1);
    });

    let app = relay_router(&endpoint_token, RelayState::new(sink));

    let listen_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Bind error on {listen_addr}: {e}");
            std::process::exit(1);
        });

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %listen_addr,
        endpoint = %format!("http://localhost:{}/{}", config.port, endpoint_token),
        "Relay listening"
    );

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    });
}
