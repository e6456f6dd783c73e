//! Payhook Webhook Receiver Daemon
//!
//! Serves the webhook endpoint with a logging handler registry. Real
//! integrations use the library directly and register their own handlers.

use std::sync::Arc;

use clap::Parser;
use tower_http::trace::TraceLayer;

use payhook::webhook::{webhook_router, WebhookConfig, WebhookHandlers, WebhookState};

/// Payhook Webhook Receiver
#[derive(Parser, Debug)]
#[command(name = "payhookd")]
#[command(version)]
#[command(about = "Signature-verifying webhook receiver for payments platform events")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = WebhookConfig::from_env()?;
    let state = Arc::new(WebhookState::new(
        config.verifier()?,
        WebhookHandlers::logging(),
    ));

    let app = webhook_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("payhookd listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
