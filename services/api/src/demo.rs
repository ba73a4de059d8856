use std::fs::File;

use jobscout::error::AppError;
use jobscout::workflows::search::{importer, ranker, RankOutcome, Rubric};

use crate::cli::RankArgs;
use crate::infra::read_rubric_file;

/// Offline ranking over a CSV export, printed for terminal use.
pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        jobs_csv,
        rubric,
        priority_only,
        explain,
    } = args;

    let rubric = match rubric {
        Some(path) => read_rubric_file(&path)?,
        None => Rubric::standard(),
    };

    let records = importer::parse_job_records(File::open(&jobs_csv)?)?;
    let total = records.len();

    let outcome = if priority_only {
        ranker::rank_raw_priority(records, &rubric)
    } else {
        ranker::rank_raw(records, &rubric)
    };

    render_outcome(&outcome, total, explain);
    Ok(())
}

fn render_outcome(outcome: &RankOutcome, total: usize, explain: bool) {
    println!(
        "Ranked {} of {} job(s); {} skipped as malformed",
        outcome.ranked.len(),
        total,
        outcome.skipped.len()
    );

    for (position, ranked) in outcome.ranked.iter().enumerate() {
        let job = &ranked.result.job;
        println!(
            "{:>3}. [{:>4}] {:8} {} @ {} ({})",
            position + 1,
            ranked.result.score,
            ranked.tier.label(),
            job.title,
            job.company,
            job.location
        );
        if explain {
            for signal in &ranked.result.matched_signals {
                println!(
                    "       {:+} {} \"{}\"",
                    signal.points,
                    signal.field.label(),
                    signal.phrase
                );
            }
        }
    }

    for skipped in &outcome.skipped {
        println!(
            "  skipped record #{}: missing field '{}'",
            skipped.index, skipped.error.field
        );
    }
}
