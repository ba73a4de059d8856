use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::RawJobRecord;
use super::importer;
use super::repository::{ApplicationLog, CoverLetterWriter, JobFeed, NotificationPublisher};
use super::scoring::{Rubric, RubricPatch};
use super::service::{JobSearchService, SearchServiceError};

/// Router builder exposing the scoring core over HTTP.
pub fn search_router<F, L, N, W>(service: Arc<JobSearchService<F, L, N, W>>) -> Router
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    Router::new()
        .route("/api/v1/jobs/search", post(search_handler::<F, L, N, W>))
        .route(
            "/api/v1/jobs/priority",
            post(priority_handler::<F, L, N, W>),
        )
        .route("/api/v1/jobs/score", post(score_handler::<F, L, N, W>))
        .route("/api/v1/jobs/rank", post(rank_handler::<F, L, N, W>))
        .route(
            "/api/v1/applications",
            post(apply_handler::<F, L, N, W>).get(applications_handler::<F, L, N, W>),
        )
        .route(
            "/api/v1/cover-letter",
            post(cover_letter_handler::<F, L, N, W>),
        )
        .route(
            "/api/v1/rubric",
            get(rubric_handler::<F, L, N, W>)
                .put(replace_rubric_handler::<F, L, N, W>)
                .patch(patch_rubric_handler::<F, L, N, W>),
        )
        .route(
            "/api/v1/rubric/reset",
            post(reset_rubric_handler::<F, L, N, W>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    pub(crate) query: String,
    #[serde(default = "default_limit")]
    pub(crate) limit: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PriorityRequest {
    #[serde(default = "default_priority_limit")]
    pub(crate) limit: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    #[serde(default)]
    pub(crate) jobs: Vec<RawJobRecord>,
    /// Optional CSV export appended to `jobs` after parsing.
    #[serde(default)]
    pub(crate) jobs_csv: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyRequest {
    pub(crate) job: RawJobRecord,
    #[serde(default)]
    pub(crate) notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CoverLetterRequest {
    pub(crate) job: RawJobRecord,
    pub(crate) resume_text: String,
}

fn default_limit() -> usize {
    10
}

fn default_priority_limit() -> usize {
    15
}

pub(crate) async fn search_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(request): Json<SearchRequest>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.search(&request.query, request.limit) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn priority_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(request): Json<PriorityRequest>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.search_priority(request.limit) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(record): Json<RawJobRecord>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.score_job(record) {
        Ok(evaluation) => (StatusCode::OK, Json(evaluation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rank_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(request): Json<RankRequest>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    let RankRequest { mut jobs, jobs_csv } = request;

    if let Some(csv) = jobs_csv {
        match importer::parse_job_records(Cursor::new(csv.into_bytes())) {
            Ok(imported) => jobs.extend(imported),
            Err(error) => {
                let payload = json!({ "error": format!("job import error: {error}") });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        }
    }

    let outcome = service.rank_batch(jobs);
    (StatusCode::OK, Json(outcome)).into_response()
}

pub(crate) async fn apply_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(request): Json<ApplyRequest>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.apply(request.job, request.notes) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applications_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.applications() {
        Ok(entries) => (StatusCode::OK, Json(json!({ "applications": entries }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cover_letter_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(request): Json<CoverLetterRequest>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.cover_letter(request.job, &request.resume_text) {
        Ok(letter) => (StatusCode::OK, Json(json!({ "cover_letter": letter }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rubric_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    let rubric = service.rubric();
    (StatusCode::OK, Json(rubric.as_ref().clone())).into_response()
}

pub(crate) async fn replace_rubric_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(rubric): Json<Rubric>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.replace_rubric(rubric) {
        Ok(updated) => (StatusCode::OK, Json(updated.as_ref().clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn patch_rubric_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
    Json(patch): Json<RubricPatch>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    match service.patch_rubric(&patch) {
        Ok(updated) => (StatusCode::OK, Json(updated.as_ref().clone())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_rubric_handler<F, L, N, W>(
    State(service): State<Arc<JobSearchService<F, L, N, W>>>,
) -> Response
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    let rubric = service.reset_rubric();
    (StatusCode::OK, Json(rubric.as_ref().clone())).into_response()
}

/// Map service failures to HTTP statuses, naming the violated invariant.
fn error_response(error: SearchServiceError) -> Response {
    let status = match &error {
        SearchServiceError::Malformed(_) => StatusCode::BAD_REQUEST,
        SearchServiceError::Rubric(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SearchServiceError::Feed(_) => StatusCode::BAD_GATEWAY,
        SearchServiceError::Log(_)
        | SearchServiceError::Alert(_)
        | SearchServiceError::Draft(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}
