use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal::api::router;
use portal::catalog::{Catalog, sample_events};
use portal::config::AppConfig;
use portal::db::{RecordStore, SqliteRecordStore, SubmissionRepository};
use portal::gemini::{AnalysisClient, GeminiHttpClient, NoopAnalysisClient};
use portal::services::{AssignmentHelper, PortalService};
use portal::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "portal=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let db = Arc::new(SqliteRecordStore::new(pool));
    db.migrate().await?;
    let store: Arc<dyn RecordStore> = db.clone();

    let ai: Arc<dyn AnalysisClient> = match config.gemini.clone() {
        Some(gemini) => Arc::new(GeminiHttpClient::new(gemini)?),
        None => {
            warn!("GEMINI_API_KEY is not set; assignment analysis is disabled");
            Arc::new(NoopAnalysisClient)
        }
    };

    let portal = PortalService::load(Catalog::sample(), sample_events(), store.clone()).await?;
    let helper = AssignmentHelper::new(ai, SubmissionRepository::submissions(store));

    let state = AppState {
        portal: Arc::new(portal),
        helper: Arc::new(helper),
        db: Some(db),
    };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
