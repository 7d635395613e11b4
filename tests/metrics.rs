// tests/metrics.rs
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

// Build the full in-process app (API + /metrics).
async fn build_app() -> Router {
    stress_barometer::app()
        .await
        .expect("app() should build Router in tests")
}

async fn scrape(app: Router) -> String {
    let resp = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    // axum::body::to_bytes requires an explicit limit
    let body = body::to_bytes(resp.into_body(), 1_048_576).await.unwrap(); // 1 MiB
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn metrics_endpoint_contains_weight_gauges() {
    let app = build_app().await;
    let text = scrape(app).await;

    assert!(
        text.contains("barometer_weight"),
        "metrics exposition missing weight gauges\n{text}"
    );
    assert!(text.contains("factor=\"dpsi\""), "no dpsi label\n{text}");
}

#[tokio::test]
async fn scoring_increments_series() {
    let app = build_app().await;

    for uri in [
        "/api/score?ros=1&dpsi=0&peo=0&zn=0&cpla2=0&spla2=0",
        "/api/score?ros=0&dpsi=1&peo=1&zn=1&cpla2=0&spla2=0",
    ] {
        let r = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(r.status(), StatusCode::OK);
    }

    let text = scrape(app).await;
    for needle in [
        "barometer_scores_total",
        "risk=\"High\"",
        "risk=\"Low\"",
        "barometer_dominant_factor_total",
        "barometer_probability",
    ] {
        assert!(
            text.contains(needle),
            "metrics exposition missing '{needle}'\n{text}"
        );
    }
}
