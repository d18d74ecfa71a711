//! Status inference from accumulated solver answers.
//!
//! A query whose declared status is unknown gets an inferred status when
//! the historical record is unanimous enough: some answer of value v must
//! come from an evaluation where no solver answered the opposite, and v
//! must be corroborated by at least two distinct solvers overall. If both
//! sat and unsat pass that bar the record is contradictory; the query is
//! flagged and left unknown.

use crate::model::{QueryAnswer, Status};
use crate::storage::Store;
use tracing::{error, info};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InferenceSummary {
    /// Queries with declared status unknown that were examined.
    pub examined: usize,
    pub inferred_sat: usize,
    pub inferred_unsat: usize,
    /// Queries where both values triggered; left unknown.
    pub contradictions: Vec<i64>,
}

impl InferenceSummary {
    pub fn inferred(&self) -> usize {
        self.inferred_sat + self.inferred_unsat
    }
}

/// True when `value` is supported by the answers: at least one answer of
/// `value` whose evaluation contains no opposite answer, and at least two
/// distinct solvers producing `value` anywhere.
pub fn triggers(answers: &[QueryAnswer], value: Status) -> bool {
    let opposite = match value.opposite() {
        Some(op) => op,
        None => return false,
    };
    let clean = answers.iter().any(|a| {
        a.status == value
            && !answers
                .iter()
                .any(|b| b.evaluation == a.evaluation && b.status == opposite)
    });
    if !clean {
        return false;
    }
    let mut solvers: Vec<i64> = answers
        .iter()
        .filter(|a| a.status == value)
        .map(|a| a.solver)
        .collect();
    solvers.sort_unstable();
    solvers.dedup();
    solvers.len() >= 2
}

/// Recomputes the inferred status of every query with declared status
/// unknown. Always writes the column, clearing stale inferences, so the
/// pass is idempotent and safe to re-run after each ingestion.
pub fn infer_statuses(store: &Store) -> anyhow::Result<InferenceSummary> {
    let mut summary = InferenceSummary::default();
    for query in store.unknown_query_ids()? {
        summary.examined += 1;
        let answers = store.answers_for_query(query)?;
        let sat = triggers(&answers, Status::Sat);
        let unsat = triggers(&answers, Status::Unsat);
        let inferred = match (sat, unsat) {
            (true, true) => {
                error!(query, "contradictory solver record; leaving status unknown");
                summary.contradictions.push(query);
                None
            }
            (true, false) => {
                summary.inferred_sat += 1;
                Some(Status::Sat)
            }
            (false, true) => {
                summary.inferred_unsat += 1;
                Some(Status::Unsat)
            }
            (false, false) => None,
        };
        store.set_inferred_status(query, inferred)?;
    }
    info!(
        examined = summary.examined,
        sat = summary.inferred_sat,
        unsat = summary.inferred_unsat,
        contradictions = summary.contradictions.len(),
        "status inference finished"
    );
    Ok(summary)
}
