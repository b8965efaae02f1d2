//! HTTP tests for the form surface.
//!
//! Run against test-double models so no artifact files are needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pipeline::error::Result as PredictionResult;
use pipeline::{Classifier, FeatureScaler, PredictionError, Recommender};
use server::{create_router, AppState};
use tower::ServiceExt; // for oneshot

struct FixedClassifier {
    label: f64,
    width: usize,
}

impl Classifier for FixedClassifier {
    fn name(&self) -> &str {
        "fixed"
    }

    fn n_features(&self) -> usize {
        self.width
    }

    fn predict(&self, _features: &[f64]) -> PredictionResult<f64> {
        Ok(self.label)
    }
}

struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn name(&self) -> &str {
        "broken"
    }

    fn n_features(&self) -> usize {
        7
    }

    fn predict(&self, _features: &[f64]) -> PredictionResult<f64> {
        Err(PredictionError::Model {
            model: "broken".to_string(),
            reason: "corrupt weights".to_string(),
        })
    }
}

struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn name(&self) -> &str {
        "identity"
    }

    fn n_features(&self) -> usize {
        8
    }

    fn transform(&self, features: &[f64]) -> PredictionResult<Vec<f64>> {
        Ok(features.to_vec())
    }
}

fn app_with(crop: Arc<dyn Classifier>, fertilizer_label: f64) -> Router {
    let recommender = Recommender::new(
        crop,
        Arc::new(FixedClassifier {
            label: fertilizer_label,
            width: 8,
        }),
        Arc::new(IdentityScaler),
    );
    create_router(AppState::new(recommender))
}

fn app(crop_label: f64, fertilizer_label: f64) -> Router {
    app_with(
        Arc::new(FixedClassifier {
            label: crop_label,
            width: 7,
        }),
        fertilizer_label,
    )
}

const REFERENCE_FORM: &str = "nitrogen=50&phosphorus=50&potassium=50&ph=6.5&moisture=30\
&soil_type=Loamy&temperature=25&humidity=60&rainfall=100";

async fn post_form(app: Router, body: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_text(response).await)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_text(response).await)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

// =========================================================================
// Form page
// =========================================================================

#[tokio::test]
async fn test_form_page_shows_defaults() {
    let (status, html) = get(app(13.0, 1.0), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("AgriVision AI"));
    assert!(html.contains("Soil Properties"));
    assert!(html.contains("Weather Conditions"));
    assert!(html.contains(r#"id="rainfall" name="rainfall" value="100""#));
    assert!(!html.contains("result-card"));
}

#[tokio::test]
async fn test_stylesheet_and_health() {
    let response = app(13.0, 1.0)
        .oneshot(
            Request::builder()
                .uri("/static/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/css; charset=utf-8"
    );

    let (status, body) = get(app(13.0, 1.0), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

// =========================================================================
// Submissions
// =========================================================================

#[tokio::test]
async fn test_submission_renders_rice_and_urea() {
    let (status, html) = post_form(app(13.0, 1.0), REFERENCE_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Recommended Crop"));
    assert!(html.contains(r#"<div class="result-value">Rice</div>"#));
    assert!(html.contains("Recommended Fertilizer"));
    assert!(html.contains(r#"<div class="result-value">Urea</div>"#));
    assert!(!html.contains("Prediction Error"));
    // Submitted values stay in the form
    assert!(html.contains(r#"<option value="Loamy" selected>"#));
}

#[tokio::test]
async fn test_unknown_crop_renders_error_panel_only_for_crop() {
    let (status, html) = post_form(app(99.0, 2.0), REFERENCE_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Prediction Error"));
    assert!(html.contains("Unknown Crop"));
    assert!(html.contains("<code>99</code>"));
    assert!(html.contains(r#"<div class="result-value">DAP</div>"#));
    assert!(!html.contains("Unknown Fertilizer"));
}

#[tokio::test]
async fn test_unknown_fertilizer_renders_error_panel() {
    let (status, html) = post_form(app(0.0, 8.0), REFERENCE_FORM).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<div class="result-value">Wheat</div>"#));
    assert!(html.contains("Unknown Fertilizer"));
    assert!(html.contains("<code>8</code>"));
}

#[tokio::test]
async fn test_out_of_range_input_is_rejected() {
    let body = REFERENCE_FORM.replace("rainfall=100", "rainfall=750");
    let (status, html) = post_form(app(13.0, 1.0), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("rainfall must be between 0 and 500, got 750"));
    assert!(!html.contains("result-card"));
}

#[tokio::test]
async fn test_unparsable_input_is_rejected() {
    let body = REFERENCE_FORM.replace("soil_type=Loamy", "soil_type=Peat");
    let (status, html) = post_form(app(13.0, 1.0), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Invalid submission"));
    assert!(!html.contains("result-card"));
}

#[tokio::test]
async fn test_model_failure_is_a_server_error() {
    let (status, html) = post_form(app_with(Arc::new(BrokenClassifier), 1.0), REFERENCE_FORM).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("Prediction failed: broken failed: corrupt weights"));
    assert!(!html.contains("result-card"));
}

#[tokio::test]
async fn test_repeated_submission_is_idempotent() {
    let router = app(13.0, 1.0);
    let (_, first) = post_form(router.clone(), REFERENCE_FORM).await;
    let (_, second) = post_form(router, REFERENCE_FORM).await;
    assert_eq!(first, second);
}

// =========================================================================
// Startup
// =========================================================================

#[test]
fn test_missing_artifacts_fail_startup() {
    let dir = tempfile::tempdir().unwrap();
    let err = match AppState::load(dir.path()) {
        Ok(_) => panic!("loading an empty directory should fail"),
        Err(e) => e,
    };

    let message = format!("{:#}", err);
    assert!(message.contains("Failed to load model artifacts"));
    assert!(message.contains("crop_model.json, fertilizer_model.json, scaler.json"));
}
