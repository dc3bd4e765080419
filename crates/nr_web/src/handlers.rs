use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use nr_core::FetchedArticle;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use crate::{error::ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub url: Option<String>,
}

/// GET /fetch-source?url=... — extracted articles found at `url`.
pub async fn fetch_source(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FetchParams>, QueryRejection>,
) -> Result<Json<Vec<FetchedArticle>>, ApiError> {
    let Query(params) = query.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing url query parameter"))?;

    let articles = state.scraper.scrape_source(&url).await?;
    info!(%url, count = articles.len(), "Served fetch-source request");
    Ok(Json(articles))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
