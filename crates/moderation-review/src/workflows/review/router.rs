use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::answers::{AnswerSet, Question};
use super::progress::ProgressView;
use super::resolver::{ResolutionRule, StatusResolver};
use super::status::{FormVariant, ReviewStatus};

#[derive(Debug, Clone, Copy)]
struct ReviewRouterState {
    default_variant: FormVariant,
}

/// Router exposing stateless status resolution and pipeline lookups.
pub fn review_router(default_variant: FormVariant) -> Router {
    Router::new()
        .route("/api/v1/review/resolve", post(resolve_handler))
        .route("/api/v1/review/pipelines/:variant", get(pipeline_handler))
        .with_state(ReviewRouterState { default_variant })
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub variant: Option<FormVariant>,
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub variant: FormVariant,
    pub status: ReviewStatus,
    pub status_label: &'static str,
    pub rule: ResolutionRule,
    pub rationale: String,
    pub progress: ProgressView,
    /// Answered questions the variant does not ask; they never affect the status.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub variant: FormVariant,
    pub steps: Vec<PipelineStepView>,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Serialize)]
pub struct PipelineStepView {
    pub status: ReviewStatus,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub key: &'static str,
    pub prompt: &'static str,
}

/// Resolve `request` against the requested or default form variant.
///
/// Every answer set resolves; answers to questions outside the variant are
/// reported back in `ignored`.
pub fn resolve_request(request: ResolveRequest, default_variant: FormVariant) -> ResolveResponse {
    let variant = request.variant.unwrap_or(default_variant);

    let ignored = request
        .answers
        .answered()
        .map(|(question, _)| question)
        .filter(|question| !variant.asks(*question))
        .collect();

    let resolution = StatusResolver::for_variant(variant).explain(&request.answers);

    ResolveResponse {
        variant,
        status: resolution.status,
        status_label: resolution.status.label(),
        rule: resolution.rule,
        rationale: resolution.rationale(),
        progress: ProgressView::build(resolution.status, &variant.pipeline()),
        ignored,
    }
}

pub fn pipeline_view(variant: FormVariant) -> PipelineResponse {
    let steps = variant
        .pipeline()
        .steps()
        .iter()
        .map(|status| PipelineStepView {
            status: *status,
            label: status.label(),
        })
        .collect();
    let questions = variant
        .questions()
        .iter()
        .map(|question: &Question| QuestionView {
            key: question.key(),
            prompt: question.prompt(),
        })
        .collect();

    PipelineResponse {
        variant,
        steps,
        questions,
    }
}

async fn resolve_handler(
    State(state): State<ReviewRouterState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(request)) => {
            let response = resolve_request(request, state.default_variant);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            (rejection.status(), Json(payload)).into_response()
        }
    }
}

async fn pipeline_handler(Path(variant): Path<String>) -> Response {
    match variant.parse::<FormVariant>() {
        Ok(variant) => (StatusCode::OK, Json(pipeline_view(variant))).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
