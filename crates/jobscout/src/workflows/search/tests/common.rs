use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use crate::workflows::search::domain::{JobRecord, RawJobRecord};
use crate::workflows::search::repository::{
    AlertError, ApplicationEntry, ApplicationLog, CoverLetterWriter, DraftError, FeedError,
    JobAlert, JobFeed, LogError, NotificationPublisher,
};
use crate::workflows::search::scoring::Rubric;
use crate::workflows::search::service::JobSearchService;
use crate::workflows::search::store::RubricStore;

pub(super) fn job(title: &str, company: &str, description: &str, location: &str) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        company: company.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        url: format!(
            "https://jobs.example.com/{}",
            title.to_lowercase().replace(' ', "-")
        ),
        source_id: format!("src-{}", title.len()),
    }
}

pub(super) fn senior_data_engineer() -> JobRecord {
    job(
        "Senior Data Engineer",
        "Netflix",
        "Build pipelines with Spark and Kafka",
        "Remote",
    )
}

pub(super) fn raw(record: JobRecord) -> RawJobRecord {
    RawJobRecord::from(record)
}

/// The scenario rubric: title "senior data engineer" 20, description spark 8
/// and kafka 7, company netflix 5, location remote 8, thresholds 8/25.
pub(super) fn scenario_rubric() -> Rubric {
    Rubric {
        title_keywords: weights(&[("senior data engineer", 20)]),
        description_keywords: weights(&[("spark", 8), ("kafka", 7)]),
        company_preferences: weights(&[("netflix", 5)]),
        location_preferences: weights(&[("remote", 8)]),
        required_keywords: BTreeSet::new(),
        blacklist_keywords: BTreeSet::new(),
        min_score_threshold: 8,
        auto_apply_threshold: 25,
    }
}

pub(super) fn weights(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(phrase, points)| (phrase.to_string(), *points))
        .collect()
}

pub(super) fn phrases(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|phrase| phrase.to_string()).collect()
}

#[derive(Default, Clone)]
pub(super) struct StaticJobFeed {
    records: Arc<Mutex<Vec<RawJobRecord>>>,
}

impl StaticJobFeed {
    pub(super) fn seeded(records: Vec<RawJobRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

impl JobFeed for StaticJobFeed {
    fn fetch(&self, _query: &str, limit: usize) -> Result<Vec<RawJobRecord>, FeedError> {
        let guard = self.records.lock().expect("feed mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

pub(super) struct FailingJobFeed;

impl JobFeed for FailingJobFeed {
    fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<RawJobRecord>, FeedError> {
        Err(FeedError::Unavailable("upstream timed out".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct InMemoryApplicationLog {
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

#[derive(Default, Clone)]
pub(super) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<JobAlert>>>,
}

impl InMemoryAlertPublisher {
    pub(super) fn events(&self) -> Vec<JobAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl NotificationPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: JobAlert) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

pub(super) struct StubLetterWriter;

impl CoverLetterWriter for StubLetterWriter {
    fn draft(&self, job: &JobRecord, resume: &str) -> Result<String, DraftError> {
        Ok(format!(
            "Dear {} hiring team, re: {}. Resume: {} chars.",
            job.company,
            job.title,
            resume.len()
        ))
    }
}

pub(super) type TestService =
    JobSearchService<StaticJobFeed, InMemoryApplicationLog, InMemoryAlertPublisher, StubLetterWriter>;

pub(super) fn build_service(
    feed_records: Vec<RawJobRecord>,
    rubric: Rubric,
) -> (
    Arc<TestService>,
    InMemoryApplicationLog,
    InMemoryAlertPublisher,
) {
    let feed = Arc::new(StaticJobFeed::seeded(feed_records));
    let log = InMemoryApplicationLog::default();
    let alerts = InMemoryAlertPublisher::default();
    let store = Arc::new(RubricStore::new(rubric).expect("valid rubric"));
    let service = JobSearchService::new(
        feed,
        Arc::new(log.clone()),
        Arc::new(alerts.clone()),
        Arc::new(StubLetterWriter),
        store,
    );
    (Arc::new(service), log, alerts)
}
