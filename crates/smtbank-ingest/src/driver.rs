//! The ingestion driver: turns one evaluation's normalized records into
//! database rows. Roster first, results second; the evaluation row and
//! its solver-variant roster are committed before any result insert so a
//! crashed run never leaves results pointing at an uncommitted roster.

use crate::record::{LookupStats, ResultRecord};
use anyhow::Context;
use chrono::NaiveDate;
use smtbank_core::fixup;
use smtbank_core::model::NewResult;
use smtbank_core::registry::SolverRegistry;
use smtbank_core::resolve;
use smtbank_core::storage::Store;
use std::collections::HashMap;
use tracing::{debug, info};

const RESULT_BATCH: usize = 5000;

/// Ingests one evaluation. Unresolvable benchmarks and unrecognized
/// solver variants are dropped and counted, never fatal; the historical
/// archives reference withdrawn benchmarks and one-off solver entries.
pub fn ingest_evaluation(
    store: &Store,
    registry: &SolverRegistry,
    name: &str,
    date: Option<NaiveDate>,
    link: Option<&str>,
    records: &[ResultRecord],
) -> anyhow::Result<LookupStats> {
    let evaluation = store.create_evaluation(name, date, link)?;
    let roster = build_roster(store, registry, evaluation, records)?;
    info!(
        evaluation = name,
        variants = roster.len(),
        records = records.len(),
        "roster committed, ingesting results"
    );

    let mut stats = LookupStats::default();
    let mut batch: Vec<NewResult> = Vec::with_capacity(RESULT_BATCH);

    for rec in records {
        let (logic, family, filename) = fixup::fix(&rec.logic, &rec.family, &rec.name);
        let query = match rec.query_index {
            Some(idx) => resolve::resolve_query_at(store, &logic, &family, &filename, idx)?,
            None => {
                resolve::resolve_query(store, rec.is_incremental, &logic, &family, &filename)?
            }
        };
        let query = match query {
            Some(q) => {
                stats.record_hit(&logic, &family, &filename);
                q
            }
            None => {
                stats.record_miss(&logic, &family, &filename);
                continue;
            }
        };
        let variant = match roster.get(rec.solver.as_str()) {
            Some(v) => *v,
            None => {
                stats.unknown_solvers += 1;
                continue;
            }
        };
        batch.push(NewResult {
            evaluation,
            query,
            solver_variant: variant,
            status: rec.status,
            cpu_time: rec.cpu_time,
            wallclock_time: rec.wallclock_time,
        });
        if batch.len() >= RESULT_BATCH {
            store.insert_results(&batch)?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        store.insert_results(&batch)?;
    }

    stats.print(name);
    Ok(stats)
}

/// Registers every recognized variant spelling occurring in the records
/// under the evaluation and returns spelling -> variant id. Spellings the
/// registry does not know are left out; their records are dropped later.
fn build_roster<'a>(
    store: &Store,
    registry: &SolverRegistry,
    evaluation: i64,
    records: &'a [ResultRecord],
) -> anyhow::Result<HashMap<&'a str, i64>> {
    let mut roster = HashMap::new();
    for rec in records {
        let spelling = rec.solver.as_str();
        if roster.contains_key(spelling) {
            continue;
        }
        let spec = match registry.solver_for_variant(spelling) {
            Some(spec) => spec,
            None => {
                debug!(solver = spelling, "unrecognized solver variant");
                continue;
            }
        };
        let solver = store
            .solver_id(spec.name)?
            .with_context(|| format!("solver {} not installed; run init first", spec.name))?;
        let variant = store.insert_variant(spelling, solver, Some(evaluation))?;
        roster.insert(spelling, variant);
    }
    Ok(roster)
}
