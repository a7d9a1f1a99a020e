use anyhow::Context;
use tokio::net::TcpListener;

use threads_replies::ThreadsClient;
use threads_replies::middleware::AuthConfig;
use threads_replies::server::{ServerConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("threads_replies=info,tower_http=info,warn")
            }),
        )
        .init();

    let auth = AuthConfig::from_env().context("loading OAuth configuration")?;
    let server = ServerConfig::from_env().context("loading server configuration")?;
    let client = ThreadsClient::new(auth.threads().clone());

    tracing::info!(
        client_id = auth.threads().client_id(),
        redirect_uri = %auth.threads().redirect_uri(),
        "Threads OAuth configured"
    );

    let listener = TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("binding {}", server.bind_addr))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "Starting threads-replies server");

    axum::serve(listener, app(auth, client, &server)).await?;
    Ok(())
}
