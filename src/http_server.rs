use crate::api::{self, AppState};
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health_check", get(api::health_check))
        .route("/events", post(api::ingest_event))
        .route("/trending", get(api::get_trending))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_http_server(state: AppState, bind_addr: &str) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
