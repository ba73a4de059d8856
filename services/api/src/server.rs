use std::fs::File;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobscout::config::AppConfig;
use jobscout::error::AppError;
use jobscout::telemetry;
use jobscout::workflows::search::{importer, JobSearchService, RubricStore};
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    load_rubric, AppState, InMemoryApplicationLog, InMemoryJobFeed, LoggingAlertPublisher,
    TemplateCoverLetterWriter,
};
use crate::routes::with_service_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let feed = match args.jobs_csv.take() {
        Some(path) => {
            let records = importer::parse_job_records(File::open(&path)?)?;
            info!(path = %path.display(), count = records.len(), "seeded listings feed");
            InMemoryJobFeed::seeded(records)
        }
        None => InMemoryJobFeed::default(),
    };

    let rubric = load_rubric(&config)?;
    let store = Arc::new(RubricStore::new(rubric)?);
    let service = Arc::new(JobSearchService::new(
        Arc::new(feed),
        Arc::new(InMemoryApplicationLog::default()),
        Arc::new(LoggingAlertPublisher::default()),
        Arc::new(TemplateCoverLetterWriter),
        store,
    ));

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job-search assistant ready");

    axum::serve(listener, app).await?;
    Ok(())
}
