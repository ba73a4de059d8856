use std::sync::Arc;

use super::common::*;
use crate::workflows::search::domain::{PriorityTier, RawJobRecord};
use crate::workflows::search::repository::{ApplicationLog, JobFeed};
use crate::workflows::search::scoring::RubricPatch;
use crate::workflows::search::service::{JobSearchService, SearchServiceError};
use crate::workflows::search::store::RubricStore;

#[test]
fn search_alerts_only_on_high_tier_hits() {
    let records = vec![
        raw(senior_data_engineer()),                      // 48 -> high
        raw(job("Senior Data Engineer", "Acme", "", "")), // 20 -> relevant
    ];
    let (service, _log, alerts) = build_service(records, scenario_rubric());

    let outcome = service.search("data engineer", 10).expect("search succeeds");

    assert_eq!(outcome.ranked.len(), 2);
    let events = alerts.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].score, 48);
    assert_eq!(events[0].tier, PriorityTier::High);
    assert_eq!(events[0].company, "Netflix");
}

#[test]
fn search_reports_skipped_records_without_aborting() {
    let records = vec![RawJobRecord::default(), raw(senior_data_engineer())];
    let (service, _log, _alerts) = build_service(records, scenario_rubric());

    let outcome = service.search("data engineer", 10).expect("search succeeds");

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
}

#[test]
fn search_priority_drops_merely_relevant_jobs() {
    let records = vec![
        raw(senior_data_engineer()),
        raw(job("Senior Data Engineer", "Acme", "", "")),
    ];
    let (service, _log, _alerts) = build_service(records, scenario_rubric());

    let outcome = service.search_priority(10).expect("search succeeds");

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.ranked[0].tier, PriorityTier::High);
}

#[test]
fn feed_failure_surfaces_as_feed_error() {
    let store = Arc::new(RubricStore::new(scenario_rubric()).expect("valid rubric"));
    let service = JobSearchService::new(
        Arc::new(FailingJobFeed),
        Arc::new(InMemoryApplicationLog::default()),
        Arc::new(InMemoryAlertPublisher::default()),
        Arc::new(StubLetterWriter),
        store,
    );

    let result = service.search("anything", 5);
    assert!(matches!(result, Err(SearchServiceError::Feed(_))));
}

#[test]
fn score_job_reports_threshold_flags() {
    let (service, _log, _alerts) = build_service(Vec::new(), scenario_rubric());

    let evaluation = service
        .score_job(raw(job("Senior Data Engineer", "Acme", "", "")))
        .expect("well-formed record");

    assert_eq!(evaluation.result.score, 20);
    assert!(evaluation.meets_threshold);
    assert!(!evaluation.auto_apply);
    assert_eq!(evaluation.tier, Some(PriorityTier::Relevant));
}

#[test]
fn score_job_rejects_malformed_records() {
    let (service, _log, _alerts) = build_service(Vec::new(), scenario_rubric());

    let result = service.score_job(RawJobRecord::default());

    match result {
        Err(SearchServiceError::Malformed(error)) => assert_eq!(error.field, "title"),
        other => panic!("expected malformed record error, got {other:?}"),
    }
}

#[test]
fn apply_records_an_entry_with_notes() {
    let (service, log, _alerts) = build_service(Vec::new(), scenario_rubric());

    let entry = service
        .apply(
            raw(senior_data_engineer()),
            Some("referred by a friend".to_string()),
        )
        .expect("apply succeeds");

    assert_eq!(entry.job.title, "Senior Data Engineer");
    let listed = service.applications().expect("list succeeds");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].notes.as_deref(), Some("referred by a friend"));
    assert_eq!(log.list().expect("log lists").len(), 1);
}

#[test]
fn cover_letter_delegates_to_the_writer() {
    let (service, _log, _alerts) = build_service(Vec::new(), scenario_rubric());

    let letter = service
        .cover_letter(raw(senior_data_engineer()), "resume text")
        .expect("draft succeeds");

    assert!(letter.contains("Netflix"));
    assert!(letter.contains("Senior Data Engineer"));
}

#[test]
fn patched_rubric_changes_subsequent_rankings() {
    let records = vec![raw(job("Rust Developer", "Acme", "tokio and axum", ""))];
    let (service, _log, _alerts) = build_service(records, scenario_rubric());

    let before = service.search("rust", 10).expect("search succeeds");
    assert!(before.ranked.is_empty());

    let patch = RubricPatch {
        title_keywords: Some(weights(&[("rust", 10)])),
        ..RubricPatch::default()
    };
    service.patch_rubric(&patch).expect("patch applies");

    let after = service.search("rust", 10).expect("search succeeds");
    assert_eq!(after.ranked.len(), 1);
    assert_eq!(after.ranked[0].result.score, 10);
}

#[test]
fn rank_batch_uses_one_rubric_snapshot() {
    let (service, _log, alerts) = build_service(Vec::new(), scenario_rubric());

    let outcome = service.rank_batch(vec![
        raw(senior_data_engineer()),
        RawJobRecord::default(),
    ]);

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);
    // Offline batches never page the notification channel.
    assert!(alerts.events().is_empty());
}

#[test]
fn blank_query_falls_back_to_the_priority_terms() {
    #[derive(Default)]
    struct CapturingFeed {
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl JobFeed for CapturingFeed {
        fn fetch(
            &self,
            query: &str,
            _limit: usize,
        ) -> Result<Vec<RawJobRecord>, crate::workflows::search::repository::FeedError> {
            self.seen
                .lock()
                .expect("query mutex poisoned")
                .push(query.to_string());
            Ok(Vec::new())
        }
    }

    let feed = Arc::new(CapturingFeed::default());
    let store = Arc::new(RubricStore::new(scenario_rubric()).expect("valid rubric"));
    let service = JobSearchService::new(
        feed.clone(),
        Arc::new(InMemoryApplicationLog::default()),
        Arc::new(InMemoryAlertPublisher::default()),
        Arc::new(StubLetterWriter),
        store,
    );

    service.search("   ", 5).expect("search succeeds");

    let seen = feed.seen.lock().expect("query mutex poisoned");
    assert_eq!(
        seen.as_slice(),
        &[crate::workflows::search::service::PRIORITY_QUERY.to_string()]
    );
}
