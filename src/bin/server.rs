use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use proplink::config::Config;
use proplink::error::Error;
use proplink::{http, Supabase};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "proplink=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let supabase = Arc::new(Supabase::from_config(&config)?);

    let app = http::router(supabase);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::general(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!(%addr, "proplink server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::general(format!("server error: {}", e)))
}
