use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use baby_tracker_server::backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the variables directly
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "baby_tracker_server=info,tower_http=info".into()),
        )
        .init();

    info!("Setting up backend services");
    let app_state = initialize_backend().await?;
    let app = create_router(app_state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
