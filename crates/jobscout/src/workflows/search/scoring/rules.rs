use std::collections::BTreeMap;

use super::rubric::Rubric;
use crate::workflows::search::domain::{
    ExclusionReason, JobRecord, MatchedSignal, ScoreResult, SignalField,
};

/// Score one job against one rubric. Pure, total, deterministic.
///
/// Matching is case-insensitive substring matching throughout, so a short
/// phrase like "ai" also hits inside "air". That noise is a documented
/// property of the rubric model, not something this function papers over.
pub(crate) fn score_job(job: &JobRecord, rubric: &Rubric) -> ScoreResult {
    let title = job.title.to_lowercase();
    let description = job.description.to_lowercase();
    let company = job.company.to_lowercase();
    let location = job.location.to_lowercase();

    // Blacklist scans title and description and short-circuits everything
    // else, no matter how many points the job would otherwise collect.
    for phrase in &rubric.blacklist_keywords {
        if title.contains(phrase.as_str()) || description.contains(phrase.as_str()) {
            return excluded(
                job,
                ExclusionReason::Blacklisted {
                    phrase: phrase.clone(),
                },
            );
        }
    }

    if !rubric.required_keywords.is_empty() {
        let satisfied = rubric
            .required_keywords
            .iter()
            .any(|phrase| title.contains(phrase.as_str()) || description.contains(phrase.as_str()));
        if !satisfied {
            return excluded(job, ExclusionReason::MissingRequiredKeyword);
        }
    }

    let mut matched_signals = Vec::new();
    let mut score = 0i64;

    // Fixed evaluation order (title, description, company, location) with
    // each map walked in key order keeps matched_signals reproducible.
    tally(
        &mut matched_signals,
        &mut score,
        SignalField::Title,
        &title,
        &rubric.title_keywords,
    );
    tally(
        &mut matched_signals,
        &mut score,
        SignalField::Description,
        &description,
        &rubric.description_keywords,
    );
    tally(
        &mut matched_signals,
        &mut score,
        SignalField::Company,
        &company,
        &rubric.company_preferences,
    );
    tally(
        &mut matched_signals,
        &mut score,
        SignalField::Location,
        &location,
        &rubric.location_preferences,
    );

    ScoreResult {
        job: job.clone(),
        score,
        matched_signals,
        exclusion: None,
    }
}

fn excluded(job: &JobRecord, reason: ExclusionReason) -> ScoreResult {
    ScoreResult {
        job: job.clone(),
        score: 0,
        matched_signals: Vec::new(),
        exclusion: Some(reason),
    }
}

/// Add every matching phrase's weight once, regardless of how many times it
/// recurs in the field text.
fn tally(
    matched_signals: &mut Vec<MatchedSignal>,
    score: &mut i64,
    field: SignalField,
    haystack: &str,
    weights: &BTreeMap<String, i64>,
) {
    for (phrase, points) in weights {
        if haystack.contains(phrase.as_str()) {
            *score += points;
            matched_signals.push(MatchedSignal {
                field,
                phrase: phrase.clone(),
                points: *points,
            });
        }
    }
}
