//! Router and request handlers.

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::form::{self, RecommendForm};
use crate::state::AppState;
use crate::views::IndexPage;

const STYLESHEET: &str = include_str!("../static/style.css");

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Form page
        .route("/", get(form_page).post(submit))
        .route("/static/style.css", get(stylesheet))
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn form_page() -> Response {
    render(StatusCode::OK, IndexPage::defaults())
}

/// Handle one submission.
///
/// - Unparsable body → 400 with the default form
/// - Out-of-range value → 400 with the submitted values
/// - Model failure → 500 with the submitted values and no result cards
/// - Otherwise → 200 with both result cards (known or unknown)
async fn submit(
    State(state): State<AppState>,
    submission: Result<Form<RecommendForm>, FormRejection>,
) -> Response {
    let Form(submission) = match submission {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Rejected form submission: {}", rejection.body_text());
            let page = IndexPage::defaults()
                .with_error(format!("Invalid submission: {}", rejection.body_text()));
            return render(StatusCode::BAD_REQUEST, page);
        }
    };

    let (soil, weather) = submission.into_inputs();
    let page = IndexPage::form(&soil, &weather);

    if let Err(e) = form::validate(&soil, &weather) {
        warn!("Rejected out-of-range input: {}", e);
        return render(StatusCode::BAD_REQUEST, page.with_error(e.to_string()));
    }

    match state.recommender.recommend(&soil, &weather) {
        Ok(recommendation) => render(StatusCode::OK, page.with_recommendation(&recommendation)),
        Err(e) => {
            error!("Prediction failed: {}", e);
            render(
                StatusCode::INTERNAL_SERVER_ERROR,
                page.with_error(format!("Prediction failed: {}", e)),
            )
        }
    }
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

fn render(status: StatusCode, page: IndexPage) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    }
}
