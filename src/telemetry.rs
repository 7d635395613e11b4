//! Tracing setup and Prometheus metrics.

use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::scorer::{Assessment, Factor};
use crate::weights::WeightTable;

const DEFAULT_LOG_FILTER: &str = "stress_barometer=info,warn";

/// Compact logs on stderr filtered by `RUST_LOG`; stdout stays free for program
/// output. Uses `try_init` so it is a no-op when the hosting runtime already
/// installed a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

// The global recorder can only be installed once per process.
static PROMETHEUS: OnceCell<Result<PrometheusHandle, String>> = OnceCell::new();

#[derive(Clone)]
pub struct Metrics {
    handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder (first call only) and publish the
    /// active weights as gauges.
    pub fn init(weights: &WeightTable) -> Result<Self> {
        let handle = PROMETHEUS
            .get_or_init(|| {
                PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(|e| anyhow!("prometheus: install recorder: {e}"))?;

        for f in Factor::ALL {
            gauge!("barometer_weight", "factor" => f.key()).set(weights.weight(f));
        }

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_assessment(a: &Assessment) {
    counter!("barometer_scores_total", "risk" => a.risk.label()).increment(1);
    counter!("barometer_dominant_factor_total", "factor" => a.dominant.factor.key()).increment(1);
    histogram!("barometer_probability").record(a.probability);
}

pub fn record_document_download() {
    counter!("barometer_document_downloads_total").increment(1);
}
