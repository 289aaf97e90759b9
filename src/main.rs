use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use tunespace::config::AppConfig;
use tunespace::db;
use tunespace::router::build_router;
use tunespace::services::backend::http::HttpBackend;
use tunespace::services::catalog;
use tunespace::services::ledger::Ledger;
use tunespace::services::session::SessionStore;
use tunespace::services::storage::sqlite::SqliteSlotStore;
use tunespace::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    let store = SqliteSlotStore::new(Arc::new(Mutex::new(conn)));
    let ledger = Ledger::load(Box::new(store), config.ledger_key.clone())
        .context("failed to load booking ledger")?;

    tracing::info!("using booking backend at {}", config.backend_url);
    let backend = HttpBackend::new(config.backend_url.clone());
    let catalog = catalog::load_catalog(&backend).await;

    let state = Arc::new(AppState {
        config: config.clone(),
        ledger: Mutex::new(ledger),
        sessions: Mutex::new(SessionStore::new()),
        catalog,
        backend: Box::new(backend),
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
