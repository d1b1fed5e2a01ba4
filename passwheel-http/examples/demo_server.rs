//! Demo server with every route behind the token gate.
//!
//! Run with: cargo run -p passwheel-http --example demo_server
//!
//! The server prints its secret on startup. Then in another terminal:
//! curl -H "token: $(passwheel <secret>)" http://127.0.0.1:8080/demo

use std::sync::Arc;

use anyhow::Context;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use passwheel_auth::{Passkey, SecretSpec, ShutdownCoordinator};
use passwheel_http::{TokenGate, require_token};

/// Window from the `PASSWHEEL_SECRET` environment variable.
///
/// An absent or malformed secret downgrades to a generated one instead of
/// refusing to start; the startup print reveals whichever secret is in
/// effect.
fn startup_passkey() -> Passkey {
    let spec = match std::env::var("PASSWHEEL_SECRET") {
        Ok(encoded) => SecretSpec::Encoded(encoded),
        Err(_) => {
            warn!("PASSWHEEL_SECRET not set, generating a throwaway secret");
            SecretSpec::Generate
        }
    };
    match Passkey::new(spec) {
        Ok(passkey) => passkey,
        Err(err) => {
            warn!(%err, "PASSWHEEL_SECRET is malformed, generating a throwaway secret");
            Passkey::new(SecretSpec::Generate).expect("generating a secret cannot fail")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let passkey = Arc::new(startup_passkey());

    let shutdown = ShutdownCoordinator::new();
    let refresher = passkey.spawn_refresher(shutdown.signal());

    let gate = TokenGate::new(passkey);
    println!("secret: {}", gate.passkey().secret().encode());
    let app = Router::new()
        .route("/demo", get(|| async { "access granted\n" }))
        .layer(from_fn_with_state(gate, require_token));

    let listener = TcpListener::bind("127.0.0.1:8080")
        .await
        .context("failed to bind demo server")?;
    info!(addr = "127.0.0.1:8080", "demo server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        })
        .await
        .context("server error")?;

    info!("shutting down");
    shutdown.shutdown();
    refresher.await?;

    Ok(())
}
