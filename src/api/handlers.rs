//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, ExistsResponse, GetResponse, HealthResponse, SetRequest,
    SetResponse, StatsResponse,
};
use crate::registry::CacheRegistry;

/// Registry type served over HTTP: string keys, arbitrary JSON values.
pub type JsonRegistry = CacheRegistry<String, Value>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<JsonRegistry>,
}

impl AppState {
    pub fn new(registry: JsonRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Builds the preset registry with `general` configured from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_config(config: &crate::config::ServerConfig) -> Result<Self> {
        Ok(Self::new(CacheRegistry::with_presets(config.general.clone())?))
    }

    /// Preset registry with default settings.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(CacheRegistry::with_presets(CacheConfig::default())?))
    }
}

/// Handler for PUT /cache/:namespace
pub async fn set_handler(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state
        .registry
        .set(&namespace, req.key.clone(), req.value, ttl)
        .await?;

    Ok(Json(SetResponse::new(namespace, req.key)))
}

/// Handler for GET /cache/:namespace/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    match state.registry.get(&namespace, &key).await? {
        Some(value) => Ok(Json(GetResponse::new(namespace, key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /cache/:namespace/:key/exists
pub async fn exists_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<ExistsResponse>> {
    let exists = state.registry.has(&namespace, &key).await?;

    Ok(Json(ExistsResponse {
        namespace,
        key,
        exists,
    }))
}

/// Handler for DELETE /cache/:namespace/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.registry.delete(&namespace, &key).await?;

    Ok(Json(DeleteResponse {
        namespace,
        key,
        deleted,
    }))
}

/// Handler for POST /clear
///
/// Clears the default namespace only.
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.registry.clear().await?;

    Ok(Json(ClearResponse::new(state.registry.default_name())))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.registry.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
