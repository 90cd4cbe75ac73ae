use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trending_service::{
    algs::trending::TrendingEngine,
    api::AppState,
    article_store::SqliteArticleStore,
    config::Config,
    database::setup_database,
    http_server::start_http_server,
    scheduler::start_scheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = setup_database(&config.database_url)
        .await
        .context("failed to set up the article database")?;

    let trending = Arc::new(TrendingEngine::new(
        Arc::new(SqliteArticleStore::new(pool)),
        config.trending_settings(),
    ));
    info!(
        event_horizon_hours = config.event_horizon.num_hours(),
        cache_ttl_secs = config.cache_ttl_secs,
        default_limit = config.default_limit,
        "trending engine ready"
    );

    let _scheduler = start_scheduler(Arc::clone(&trending), &config.sweep_cron).await?;

    let state = AppState {
        trending,
        default_limit: config.default_limit,
    };
    start_http_server(state, &config.bind_addr).await
}
