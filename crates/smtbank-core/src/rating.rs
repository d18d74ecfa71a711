//! Per-query difficulty ratings, one set per evaluation.
//!
//! The rating of a query in an evaluation is `1 - successful/considered`
//! over the solvers considered competent for its logic in that evaluation.
//! A solver is considered for a logic if it solved at least one
//! non-incremental benchmark of that logic; logics nobody solved anything
//! in produce no ratings at all.

use crate::model::NewRating;
use crate::storage::Store;
use tracing::{debug, info};

const RATING_BATCH: usize = 5000;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RatingSummary {
    pub rated_queries: usize,
    /// Logics skipped because no solver solved anything in them.
    pub skipped_logics: Vec<String>,
}

/// Recomputes all ratings for one evaluation. Existing rows are cleared
/// first so the pass is idempotent.
pub fn compute_ratings(store: &Store, evaluation: i64) -> anyhow::Result<RatingSummary> {
    store.clear_ratings(evaluation)?;

    let mut summary = RatingSummary::default();
    let mut batch: Vec<NewRating> = Vec::with_capacity(RATING_BATCH);

    for logic in store.result_logics(evaluation)? {
        let considered = store.considered_solvers(evaluation, &logic)?;
        if considered == 0 {
            debug!(evaluation, %logic, "no solver solved anything; skipping");
            summary.skipped_logics.push(logic);
            continue;
        }
        for (query, successful) in store.query_success_counts(evaluation, &logic)? {
            batch.push(NewRating {
                query,
                evaluation,
                rating: 1.0 - successful as f64 / considered as f64,
                considered_solvers: considered,
                successful_solvers: successful,
            });
            summary.rated_queries += 1;
            if batch.len() >= RATING_BATCH {
                store.insert_ratings(&batch)?;
                batch.clear();
            }
        }
    }
    if !batch.is_empty() {
        store.insert_ratings(&batch)?;
    }
    info!(
        evaluation,
        rated = summary.rated_queries,
        skipped_logics = summary.skipped_logics.len(),
        "rating computation finished"
    );
    Ok(summary)
}

/// Recomputes ratings for every evaluation in the database.
pub fn compute_all_ratings(store: &Store) -> anyhow::Result<usize> {
    let mut total = 0;
    for ev in store.evaluations()? {
        total += compute_ratings(store, ev.id)?.rated_queries;
    }
    Ok(total)
}
