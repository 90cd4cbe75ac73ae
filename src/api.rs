use crate::algs::trending::TrendingEngine;
use crate::common::error::AppError;
use crate::common::model::{Article, EventType, InteractionEvent};
use crate::common::time::now_utc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub trending: Arc<TrendingEngine>,
    pub default_limit: usize,
}

#[derive(Deserialize, Debug)]
pub struct EventPayload {
    pub user_id: Option<String>,
    pub article_id: String,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug)]
pub struct TrendingParams {
    pub lat: f64,
    pub lon: f64,
    pub limit: Option<usize>,
}

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn ingest_event(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<StatusCode, AppError> {
    if payload.article_id.trim().is_empty() {
        return Err(AppError::invalid_request("article_id cannot be empty"));
    }
    check_coordinates(payload.latitude, payload.longitude)?;

    state.trending.ingest(InteractionEvent {
        user_id: payload.user_id,
        article_id: payload.article_id,
        event_type: payload.event_type,
        latitude: payload.latitude,
        longitude: payload.longitude,
        timestamp: payload.timestamp.unwrap_or_else(now_utc),
    });

    Ok(StatusCode::ACCEPTED)
}

pub async fn get_trending(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<Vec<Article>>, AppError> {
    check_coordinates(params.lat, params.lon)?;
    let limit = params.limit.unwrap_or(state.default_limit);

    let articles = state
        .trending
        .top_trending(params.lat, params.lon, limit)
        .await?;

    Ok(Json(articles))
}

fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(AppError::invalid_request(
            "latitude and longitude must be finite numbers",
        ));
    }
    Ok(())
}
