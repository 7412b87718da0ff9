//! Storefront Backend - cart, wishlist and order checkout service

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_api::{api, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    let db = PgPoolOptions::new().max_connections(cfg.max_connections).connect(&cfg.database_url).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let nats = match cfg.nats_url.as_deref() {
        Some(url) => match async_nats::connect(url).await {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(%err, "NATS connection failed, order events disabled");
                None
            }
        },
        None => None,
    };

    let app = api::router(AppState::new(db, nats));

    tracing::info!("storefront-api listening on 0.0.0.0:{}", cfg.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", cfg.port)).await?, app).await?;
    Ok(())
}
