use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use jobscout::workflows::search::{
    search_router, ApplicationLog, CoverLetterWriter, JobFeed, JobSearchService,
    NotificationPublisher,
};
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn with_service_routes<F, L, N, W>(
    service: Arc<JobSearchService<F, L, N, W>>,
) -> axum::Router
where
    F: JobFeed + 'static,
    L: ApplicationLog + 'static,
    N: NotificationPublisher + 'static,
    W: CoverLetterWriter + 'static,
{
    search_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use jobscout::workflows::search::{JobSearchService, RubricStore};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::*;
    use crate::infra::{
        InMemoryApplicationLog, InMemoryJobFeed, LoggingAlertPublisher, TemplateCoverLetterWriter,
    };

    fn test_router(ready: bool) -> axum::Router {
        let service = Arc::new(JobSearchService::new(
            Arc::new(InMemoryJobFeed::default()),
            Arc::new(InMemoryApplicationLog::default()),
            Arc::new(LoggingAlertPublisher::default()),
            Arc::new(TemplateCoverLetterWriter),
            Arc::new(RubricStore::standard()),
        ));
        let handle = PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        };
        with_service_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let response = test_router(true)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("status"), Some(&Value::from("ok")));
    }

    #[tokio::test]
    async fn readiness_reflects_the_flag() {
        let response = test_router(false)
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn rubric_endpoint_is_mounted() {
        let response = test_router(true)
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rubric")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 64 * 1024).await.expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(
            payload
                .get("auto_apply_threshold")
                .and_then(Value::as_i64),
            Some(25)
        );
    }
}
