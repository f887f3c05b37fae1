//! HTTP surface: `GET /api/cep/{cep}` plus a liveness probe.

use crate::adapters::viacep::ViaCepClient;
use crate::core::lookup::{CepLookupService, UfPolicy};
use crate::domain::model::Address;
use crate::domain::ports::{CepProvider, ConfigProvider};
use crate::utils::error::{CepError, Result};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub type SharedLookupService = Arc<CepLookupService<Arc<dyn CepProvider>>>;

#[derive(Clone)]
pub struct AppState {
    lookup: SharedLookupService,
}

impl AppState {
    pub fn new(lookup: CepLookupService<Arc<dyn CepProvider>>) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Wire the ViaCEP client and lookup service from configuration.
    pub fn from_config(config: &dyn ConfigProvider) -> Result<Self> {
        let client = ViaCepClient::new(config.viacep_base_url(), config.request_timeout())?;
        let provider: Arc<dyn CepProvider> = Arc::new(client);
        let lookup = CepLookupService::new(provider)
            .with_uf_policy(UfPolicy::from_strict(config.strict_uf()));
        Ok(Self::new(lookup))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/cep/{cep}", get(get_cep))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_cep(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> std::result::Result<Json<Address>, CepError> {
    let address = state.lookup.lookup_raw(Some(&raw)).await?;
    Ok(Json(address))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
