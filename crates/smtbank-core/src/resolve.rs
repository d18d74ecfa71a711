//! Identity resolution for historical result records.
//!
//! A record's (logic, family folder, relative path) triple is matched
//! against the canonical catalog by progressive narrowing: the relative
//! name drifts least across history, logics drift most (benchmarks get
//! reclassified), so the match starts from the filename alone and only
//! consults the logic as the last, most distrusted key. Every stage must
//! leave exactly one candidate for a match to be reported; anything
//! ambiguous is a miss, never a guess.

use crate::model::Candidate;
use crate::storage::Store;

/// Resolves a possibly-stale identity triple to a canonical benchmark id.
/// Returns `None` when no stage pins down a unique candidate; callers
/// count and log misses rather than fail, since historical data contains
/// withdrawn and corrupted benchmarks.
pub fn resolve_benchmark(
    store: &Store,
    is_incremental: Option<bool>,
    logic: &str,
    family_folder: &str,
    relative_path: &str,
) -> anyhow::Result<Option<i64>> {
    let candidates = store.candidates_by_filename(relative_path)?;
    if let Some(decision) = decided(&candidates) {
        return Ok(decision);
    }

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.family_folder == family_folder)
        .collect();
    if let Some(decision) = decided(&candidates) {
        return Ok(decision);
    }

    let candidates: Vec<Candidate> = match is_incremental {
        Some(flag) => candidates
            .into_iter()
            .filter(|c| c.is_incremental == flag)
            .collect(),
        None => candidates,
    };
    if let Some(decision) = decided(&candidates) {
        return Ok(decision);
    }

    let candidates: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.logic == logic)
        .collect();
    match candidates.as_slice() {
        [single] => Ok(Some(single.benchmark)),
        _ => Ok(None),
    }
}

/// A stage is decisive when it leaves exactly one candidate (match) or
/// none (miss — later stages only narrow, they cannot recover).
fn decided(candidates: &[Candidate]) -> Option<Option<i64>> {
    match candidates {
        [] => Some(None),
        [single] => Some(Some(single.benchmark)),
        _ => None,
    }
}

/// Resolves to the sole query of a non-incremental benchmark. Returns
/// `None` when the benchmark is incremental or does not have exactly one
/// query; incremental records must match by explicit query index.
pub fn resolve_query(
    store: &Store,
    is_incremental: Option<bool>,
    logic: &str,
    family_folder: &str,
    relative_path: &str,
) -> anyhow::Result<Option<i64>> {
    match resolve_benchmark(store, is_incremental, logic, family_folder, relative_path)? {
        Some(benchmark) => store.sole_query(benchmark),
        None => Ok(None),
    }
}

/// Resolves to the query at a 1-based ordinal within an incremental
/// benchmark (ordinals come from log-line order in the source records).
pub fn resolve_query_at(
    store: &Store,
    logic: &str,
    family_folder: &str,
    relative_path: &str,
    index: usize,
) -> anyhow::Result<Option<i64>> {
    match resolve_benchmark(store, Some(true), logic, family_folder, relative_path)? {
        Some(benchmark) => store.query_at(benchmark, index as i64),
        None => Ok(None),
    }
}
