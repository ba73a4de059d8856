use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use jobscout::config::AppConfig;
use jobscout::error::AppError;
use jobscout::workflows::search::{
    AlertError, ApplicationEntry, ApplicationLog, CoverLetterWriter, DraftError, FeedError,
    JobAlert, JobFeed, JobRecord, LogError, NotificationPublisher, RawJobRecord, Rubric,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory stand-in for the upstream listings collaborator.
///
/// Serves whatever records it was seeded with, filtered by the query's
/// " OR "-separated terms against title and description.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobFeed {
    records: Arc<Mutex<Vec<RawJobRecord>>>,
}

impl InMemoryJobFeed {
    pub(crate) fn seeded(records: Vec<RawJobRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl JobFeed for InMemoryJobFeed {
    fn fetch(&self, query: &str, limit: usize) -> Result<Vec<RawJobRecord>, FeedError> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split(" or ")
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty())
            .collect();

        let guard = self.records.lock().expect("feed mutex poisoned");
        let matches = guard
            .iter()
            .filter(|record| {
                if terms.is_empty() {
                    return true;
                }
                let title = record.title.as_deref().unwrap_or_default().to_lowercase();
                let description = record
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase();
                terms
                    .iter()
                    .any(|term| title.contains(term.as_str()) || description.contains(term.as_str()))
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationLog {
    entries: Arc<Mutex<Vec<ApplicationEntry>>>,
}

impl ApplicationLog for InMemoryApplicationLog {
    fn record(&self, entry: ApplicationEntry) -> Result<ApplicationEntry, LogError> {
        let mut guard = self.entries.lock().expect("log mutex poisoned");
        guard.push(entry.clone());
        Ok(entry)
    }

    fn list(&self) -> Result<Vec<ApplicationEntry>, LogError> {
        let guard = self.entries.lock().expect("log mutex poisoned");
        Ok(guard.clone())
    }
}

/// Logs alerts instead of paging anyone; the SMS/voice transport belongs to
/// the notification collaborator.
#[derive(Default, Clone)]
pub(crate) struct LoggingAlertPublisher {
    events: Arc<Mutex<Vec<JobAlert>>>,
}

impl NotificationPublisher for LoggingAlertPublisher {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError> {
        info!(
            title = %alert.title,
            company = %alert.company,
            score = alert.score,
            tier = alert.tier.label(),
            "high-priority job match"
        );
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

/// Deterministic fallback writer used until an LLM-backed collaborator is
/// wired in.
pub(crate) struct TemplateCoverLetterWriter;

impl CoverLetterWriter for TemplateCoverLetterWriter {
    fn draft(&self, job: &JobRecord, _resume: &str) -> Result<String, DraftError> {
        let company = if job.company.is_empty() {
            "the Company"
        } else {
            job.company.as_str()
        };
        let title = if job.title.is_empty() {
            "open position"
        } else {
            job.title.as_str()
        };

        Ok(format!(
            "Dear Hiring Manager at {company},\n\n\
             I am excited to apply for the {title} position. With hands-on experience \
             building data pipelines, cloud infrastructure, and production ML systems, \
             I am well positioned to contribute to your team's technical objectives.\n\n\
             I would welcome the opportunity to discuss how my background aligns with \
             {company}'s needs. Thank you for considering my application.\n\n\
             Best regards,\n[Your Name]"
        ))
    }
}

/// Load the startup rubric: the configured JSON file when present, the stock
/// rubric otherwise. Either way the result is validated before use.
pub(crate) fn load_rubric(config: &AppConfig) -> Result<Rubric, AppError> {
    match &config.rubric_path {
        Some(path) => read_rubric_file(path),
        None => Ok(Rubric::standard()),
    }
}

pub(crate) fn read_rubric_file(path: &Path) -> Result<Rubric, AppError> {
    let contents = fs::read_to_string(path)?;
    let rubric: Rubric = serde_json::from_str(&contents).map_err(AppError::RubricFile)?;
    Ok(rubric.validated()?)
}
