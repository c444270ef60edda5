//! Main server implementation
//!
//! Holds the injected research runner and run store, builds the axum
//! router, and implements the HTTP handlers. Runs triggered over HTTP
//! execute synchronously within the request; there is no background
//! job queue.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use research::core::runner::ResearchRunner;
use research::traits::{CasinoDiscovery, OffersSource, PromotionResearch, RunStore};
use shared::RunMode;

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// Header carrying the shared secret for the scheduled endpoint.
pub const CRON_KEY_HEADER: &str = "x-cron-key";

/// Research server with injected collaborators.
pub struct ResearchServer<O, D, P, S>
where
    O: OffersSource,
    D: CasinoDiscovery,
    P: PromotionResearch,
    S: RunStore,
{
    state: Arc<ServerState>,
    runner: Arc<ResearchRunner<O, D, P, S>>,
    store: Arc<S>,
    cron_key: String,
}

// Manual Clone: the derive would demand Clone on the collaborator
// types, but only the Arc handles are cloned.
impl<O, D, P, S> Clone for ResearchServer<O, D, P, S>
where
    O: OffersSource,
    D: CasinoDiscovery,
    P: PromotionResearch,
    S: RunStore,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            runner: self.runner.clone(),
            store: self.store.clone(),
            cron_key: self.cron_key.clone(),
        }
    }
}

impl<O, D, P, S> ResearchServer<O, D, P, S>
where
    O: OffersSource + 'static,
    D: CasinoDiscovery + 'static,
    P: PromotionResearch + 'static,
    S: RunStore + 'static,
{
    pub fn new(
        bind_address: SocketAddr,
        runner: Arc<ResearchRunner<O, D, P, S>>,
        store: Arc<S>,
        cron_key: String,
    ) -> Self {
        Self {
            state: Arc::new(ServerState::new(bind_address)),
            runner,
            store,
            cron_key,
        }
    }

    /// Build the axum router with all routes.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(root))
            .route("/api/results", get(get_results))
            .route("/api/results/scheduled", get(scheduled_results))
            .route("/api/health", get(health_check))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Start the server and block until shutdown.
    pub async fn run(&self) -> ServerResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.state.bind_address)
            .await
            .map_err(|e| {
                ServerError::ServerStartup(format!(
                    "failed to bind to {}: {e}",
                    self.state.bind_address
                ))
            })?;

        info!("research server listening on http://{}", self.state.bind_address);

        tokio::select! {
            result = async { axum::serve(listener, router).await } => {
                result.map_err(|e| ServerError::ServerStartup(e.to_string()))?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received shutdown signal");
            }
        }

        Ok(())
    }

    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }
}

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub mode: Option<String>,
}

// HTTP handlers

/// Liveness placeholder.
pub async fn root<O, D, P, S>(State(server): State<ResearchServer<O, D, P, S>>) -> Json<Value>
where
    O: OffersSource + 'static,
    D: CasinoDiscovery + 'static,
    P: PromotionResearch + 'static,
    S: RunStore + 'static,
{
    Json(json!({
        "service": "casino promotion research",
        "status": "running",
        "uptime_seconds": server.state.uptime_seconds(),
    }))
}

/// Manual runs and last-result retrieval.
///
/// `mode=manual` (the default) runs the full job synchronously;
/// `mode=last` fetches the last persisted run. Any other value answers
/// with an error object, deliberately not an HTTP error status.
pub async fn get_results<O, D, P, S>(
    State(server): State<ResearchServer<O, D, P, S>>,
    Query(query): Query<ResultsQuery>,
) -> Json<Value>
where
    O: OffersSource + 'static,
    D: CasinoDiscovery + 'static,
    P: PromotionResearch + 'static,
    S: RunStore + 'static,
{
    match query.mode.as_deref().unwrap_or("manual") {
        "manual" => {
            let result = server.runner.run(RunMode::Manual).await;
            Json(json!({ "mode": "manual", "result": result }))
        }
        "last" => {
            let last = match server.store.last_run().await {
                Ok(row) => row,
                Err(e) => {
                    warn!("error fetching last run: {e}");
                    None
                }
            };
            Json(json!({ "mode": "last", "result": last }))
        }
        _ => Json(json!({ "error": "Invalid mode. Use 'manual' or 'last'." })),
    }
}

/// Secured endpoint for the external cron trigger.
pub async fn scheduled_results<O, D, P, S>(
    State(server): State<ResearchServer<O, D, P, S>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode>
where
    O: OffersSource + 'static,
    D: CasinoDiscovery + 'static,
    P: PromotionResearch + 'static,
    S: RunStore + 'static,
{
    let presented = headers
        .get(CRON_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    // An unset secret keeps the endpoint locked.
    if server.cron_key.is_empty() || presented != Some(server.cron_key.as_str()) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let result = server.runner.run(RunMode::Scheduled).await;
    Ok(Json(json!({ "mode": "scheduled", "result": result })))
}

/// Health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
