// src/lib.rs
// Public library surface shared by the server binary, the CLI and integration tests.

pub mod api;
pub mod config;
pub mod document;
pub mod scorer;
pub mod telemetry;
pub mod view;
pub mod weights;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::scorer::{score, score_with, Assessment, Direction, Factor, Inputs, RiskLevel};
pub use crate::view::BarometerView;
pub use crate::weights::WeightTable;

use axum::Router;
use tracing::info;

use crate::config::AppConfig;
use crate::document::ModelDocument;
use crate::telemetry::Metrics;

/// Build the full application router from environment configuration:
/// weights, model document, metrics and the calculator API.
pub async fn app() -> anyhow::Result<Router> {
    app_with_config(AppConfig::from_env()).await
}

pub async fn app_with_config(cfg: AppConfig) -> anyhow::Result<Router> {
    let weights = WeightTable::load_or_default(&cfg.weights_path)?;
    let document = ModelDocument::load(&cfg.document_path).await;
    let metrics = Metrics::init(&weights)?;

    info!(
        static_dir = %cfg.static_dir.display(),
        document = document.is_available(),
        "barometer app ready"
    );

    let state = AppState::new(weights, document, cfg.static_dir);
    Ok(api::router(state).merge(metrics.router()))
}
