//! Cellular Stress Barometer — server entrypoint.
//! Boots the Axum HTTP server (calculator page + scoring API) on Shuttle.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    stress_barometer::telemetry::init_tracing();

    let router = stress_barometer::app().await?;
    Ok(router.into())
}
