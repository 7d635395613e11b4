//! HTTP surface: calculator API, model document download and the static page.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::debug;

use crate::document::{self, ModelDocument};
use crate::scorer::{self, Assessment, Factor, Inputs, DEFAULT_INPUT};
use crate::telemetry;
use crate::view::BarometerView;
use crate::weights::WeightTable;

#[derive(Clone)]
pub struct AppState {
    pub weights: Arc<WeightTable>,
    pub document: Arc<ModelDocument>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(weights: WeightTable, document: ModelDocument, static_dir: PathBuf) -> Self {
        Self {
            weights: Arc::new(weights),
            document: Arc::new(document),
            static_dir,
        }
    }
}

/// Calculator API plus the static page as fallback.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/factors", get(factors))
        .route("/api/score", get(score_query).post(score_json))
        .route("/model.pdf", get(download_document))
        .fallback_service(static_files)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: msg.into() })).into_response()
}

#[derive(Serialize)]
struct FactorOut {
    key: &'static str,
    label: &'static str,
    title: &'static str,
    help: &'static str,
    weight: f64,
    default: f64,
    min: f64,
    max: f64,
}

async fn factors(State(state): State<AppState>) -> Json<Vec<FactorOut>> {
    let out = Factor::ALL
        .iter()
        .map(|&f| FactorOut {
            key: f.key(),
            label: f.label(),
            title: f.title(),
            help: f.help(),
            weight: state.weights.weight(f),
            default: DEFAULT_INPUT,
            min: 0.0,
            max: 1.0,
        })
        .collect();
    Json(out)
}

#[derive(Serialize)]
struct ScoreResp {
    /// Inputs after clamping to the slider bounds.
    inputs: Inputs,
    assessment: Assessment,
    view: BarometerView,
}

// Rejections are reported as JSON like every other input error.
async fn score_query(
    State(state): State<AppState>,
    inputs: Result<Query<Inputs>, QueryRejection>,
) -> Response {
    match inputs {
        Ok(Query(inputs)) => score_inputs(&state, inputs),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.body_text()),
    }
}

async fn score_json(
    State(state): State<AppState>,
    inputs: Result<Json<Inputs>, JsonRejection>,
) -> Response {
    match inputs {
        Ok(Json(inputs)) => score_inputs(&state, inputs),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.body_text()),
    }
}

fn score_inputs(state: &AppState, raw: Inputs) -> Response {
    if let Some(f) = raw.first_non_finite() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("`{}` must be a finite number", f.key()),
        );
    }
    let inputs = raw.clamped();
    let assessment = scorer::score_with(&state.weights, &inputs);
    telemetry::record_assessment(&assessment);
    debug!(
        probability = assessment.probability,
        risk = assessment.risk.label(),
        dominant = assessment.dominant.factor.key(),
        "scored"
    );

    let view = BarometerView::from_assessment(&assessment);
    Json(ScoreResp {
        inputs,
        assessment,
        view,
    })
    .into_response()
}

async fn download_document(State(state): State<AppState>) -> Response {
    let Some(bytes) = state.document.bytes() else {
        return error_response(StatusCode::NOT_FOUND, state.document.missing_message());
    };
    telemetry::record_document_download();

    let disposition = format!("attachment; filename=\"{}\"", document::DOWNLOAD_FILE_NAME);
    (
        [
            (header::CONTENT_TYPE, document::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes.clone(),
    )
        .into_response()
}
