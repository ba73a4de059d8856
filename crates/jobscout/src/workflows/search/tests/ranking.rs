use super::common::*;
use crate::workflows::search::domain::{PriorityTier, RawJobRecord};
use crate::workflows::search::ranker::{rank, rank_priority_only, rank_raw};

#[test]
fn empty_batch_yields_empty_ranking() {
    let rubric = scenario_rubric();
    assert!(rank(&[], &rubric).is_empty());
}

#[test]
fn ranking_sorts_by_score_descending() {
    let rubric = scenario_rubric();
    let jobs = vec![
        job("Backend role", "Acme", "some kafka", "Remote"), // 7 + 8 = 15
        senior_data_engineer(),                              // 48
        job("Senior Data Engineer", "Acme", "", ""),         // 20
    ];

    let ranked = rank(&jobs, &rubric);

    let scores: Vec<_> = ranked.iter().map(|r| r.result.score).collect();
    assert_eq!(scores, vec![48, 20, 15]);
}

#[test]
fn ties_keep_input_order() {
    let rubric = scenario_rubric();
    let first = job("Senior Data Engineer", "First Corp", "", "");
    let second = job("Senior Data Engineer", "Second Corp", "", "");
    let jobs = vec![first.clone(), second.clone()];

    let ranked = rank(&jobs, &rubric);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].result.job.company, "First Corp");
    assert_eq!(ranked[1].result.job.company, "Second Corp");

    // Same batch, same order, every time.
    let again = rank(&jobs, &rubric);
    assert_eq!(ranked, again);
}

#[test]
fn results_below_min_threshold_are_dropped() {
    let rubric = scenario_rubric(); // min 8
    let jobs = vec![
        job("Backend role", "Netflix", "", ""), // company only: 5
        senior_data_engineer(),
    ];

    let ranked = rank(&jobs, &rubric);

    assert_eq!(ranked.len(), 1);
    assert!(ranked.iter().all(|r| r.result.score >= 8));
}

#[test]
fn excluded_jobs_never_surface() {
    let mut rubric = scenario_rubric();
    rubric.blacklist_keywords = phrases(&["junior"]);
    let jobs = vec![
        job("Junior Senior Data Engineer", "Netflix", "spark", "Remote"),
        senior_data_engineer(),
    ];

    let ranked = rank(&jobs, &rubric);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].result.job.title, "Senior Data Engineer");
}

#[test]
fn tiers_follow_the_auto_apply_threshold() {
    let rubric = scenario_rubric(); // auto 25
    let jobs = vec![
        senior_data_engineer(),                      // 48 -> high
        job("Senior Data Engineer", "Acme", "", ""), // 20 -> relevant
    ];

    let ranked = rank(&jobs, &rubric);

    assert_eq!(ranked[0].tier, PriorityTier::High);
    assert_eq!(ranked[1].tier, PriorityTier::Relevant);
}

#[test]
fn priority_only_raises_the_floor() {
    let rubric = scenario_rubric();
    let jobs = vec![
        senior_data_engineer(),                      // 48
        job("Senior Data Engineer", "Acme", "", ""), // 20, above min but below auto
    ];

    let ranked = rank_priority_only(&jobs, &rubric);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].tier, PriorityTier::High);
}

#[test]
fn malformed_records_are_skipped_and_reported() {
    let rubric = scenario_rubric();
    let records = vec![
        RawJobRecord {
            title: None,
            ..RawJobRecord::from(senior_data_engineer())
        },
        raw(senior_data_engineer()),
        RawJobRecord::default(),
    ];

    let outcome = rank_raw(records, &rubric);

    assert_eq!(outcome.ranked.len(), 1);
    assert_eq!(outcome.skipped.len(), 2);
    assert_eq!(outcome.skipped[0].index, 0);
    assert_eq!(outcome.skipped[0].error.field, "title");
    assert_eq!(outcome.skipped[1].index, 2);
}

#[test]
fn empty_string_fields_are_well_formed() {
    let rubric = scenario_rubric();
    let record = RawJobRecord {
        title: Some(String::new()),
        company: Some(String::new()),
        description: Some(String::new()),
        location: Some(String::new()),
        url: Some(String::new()),
        source_id: Some(String::new()),
    };

    let outcome = rank_raw(vec![record], &rubric);

    // Scores zero and falls under the threshold, but is not malformed.
    assert!(outcome.skipped.is_empty());
    assert!(outcome.ranked.is_empty());
}
