//! API Handlers
//!
//! HTTP request handlers. Each one calls a single public engine operation.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::CacheEngine;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_segment, DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// The engine does its own locking, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheEngine<Value>>,
}

impl AppState {
    pub fn new(cache: CacheEngine<Value>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState with an engine built from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheEngine::from_config(config))
    }
}

fn validate_path(category: &str, key: &str) -> Result<()> {
    if let Some(error_msg) =
        validate_segment("Category", category).or_else(|| validate_segment("Key", key))
    {
        return Err(CacheError::InvalidRequest(error_msg));
    }
    Ok(())
}

/// Handler for PUT /cache/:category/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    validate_path(&category, &key)?;

    state.cache.set(&category, &key, req.value);

    Ok(Json(SetResponse::new(category, key)))
}

/// Handler for GET /cache/:category/:key
///
/// Misses come back as 404 with the reason in the body.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    validate_path(&category, &key)?;

    let value = state.cache.lookup(&category, &key)?;

    Ok(Json(GetResponse::new(category, key, value)))
}

/// Handler for DELETE /cache/:category/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    validate_path(&category, &key)?;

    let removed = state.cache.delete(&category, &key);

    Ok(Json(DeleteResponse::new(category, key, removed)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    let ttl_secs = state.cache.ttl().map(|ttl| ttl.as_secs());

    Json(StatsResponse::new(&stats, state.cache.capacity(), ttl_secs))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
