//! Mergington High School activities API server.
//!
//! Binds the HTTP listener and serves the Axum router until ctrl-c.
//! Configuration comes from the environment (optionally via `.env`):
//!   HOST / PORT        listen address (default 0.0.0.0:8000)
//!   TEACHERS_FILE      credential file path (default teachers.json)
//!   STATIC_DIR         static asset directory (default static)

use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use mergington_api::auth::{AuthService, FileCredentials};
use mergington_api::rest::{create_router, AppState};
use mergington_api::store::ActivityStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let teachers_file =
        std::env::var("TEACHERS_FILE").unwrap_or_else(|_| "teachers.json".to_string());
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8000);

    let state = AppState::new(
        ActivityStore::with_seed_data(),
        AuthService::new(Box::new(FileCredentials::new(&teachers_file))),
    );
    let app = create_router(state, &static_dir);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        teachers_file = %teachers_file,
        "activities API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
