// file: src/server/routes.rs
// description: axum handlers for the form page, json api and health probe

use crate::error::PipelineError;
use crate::models::{AskReport, FetchStatus};
use crate::parser::MarkdownRenderer;
use crate::pipeline::AskPipeline;
use crate::utils::telemetry::HealthReport;
use crate::utils::validation::Validator;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

use super::page::{PageView, render_page};

pub const MAX_QUESTION_CHARS: usize = 2000;

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<AskPipeline>,
    renderer: Arc<MarkdownRenderer>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(pipeline: Arc<AskPipeline>) -> Router {
    let state = AppState {
        pipeline,
        renderer: Arc::new(MarkdownRenderer::new()),
    };

    Router::new()
        .route("/", get(index).post(submit))
        .route("/api/ask", post(api_ask))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

async fn submit(
    State(state): State<AppState>,
    Form(form): Form<AskRequest>,
) -> (StatusCode, Html<String>) {
    let question = form.question.as_str();

    let result = match Validator::validate_question_length(question, MAX_QUESTION_CHARS) {
        Ok(()) => state.pipeline.ask_detailed(question).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            let notice = partial_notice(&report);
            let view = PageView {
                question: Some(question),
                answer_html: Some(state.renderer.render_html(&report.answer)),
                notice,
                error: None,
                sources: &report.documents,
            };
            (StatusCode::OK, Html(render_page(&view)))
        }
        Err(e) => {
            error!("Ask failed: {}", e);
            let view = PageView {
                question: Some(question),
                error: Some(e.to_string()),
                ..PageView::default()
            };
            (status_for(&e), Html(render_page(&view)))
        }
    }
}

async fn api_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskReport>, (StatusCode, Json<ErrorBody>)> {
    let result = match Validator::validate_question_length(&request.question, MAX_QUESTION_CHARS)
    {
        Ok(()) => state.pipeline.ask_detailed(&request.question).await,
        Err(e) => Err(e),
    };

    result.map(Json).map_err(|e| {
        error!("Ask failed: {}", e);
        (
            status_for(&e),
            Json(ErrorBody {
                error: e.to_string(),
            }),
        )
    })
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.pipeline.health(false).await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report))
}

fn status_for(error: &PipelineError) -> StatusCode {
    match error {
        PipelineError::Validation(_) => StatusCode::BAD_REQUEST,
        PipelineError::Generation { .. } | PipelineError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn partial_notice(report: &AskReport) -> Option<String> {
    match &report.fetch_status {
        FetchStatus::Complete => None,
        FetchStatus::Partial { cause } => Some(format!(
            "The literature search was interrupted ({}); this answer is based on {} article(s).",
            cause,
            report.documents.len()
        )),
    }
}
