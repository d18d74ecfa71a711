use smtbank_core::model::Status;
use std::collections::HashSet;

/// One normalized historical result, the common currency of all era
/// adapters. Identity is still the raw (logic, family, name) triple at
/// this point; resolution against the catalog happens in the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Solver variant name as spelled in the source.
    pub solver: String,
    pub logic: String,
    pub family: String,
    /// Path relative to the family folder.
    pub name: String,
    /// 1-based query ordinal for incremental sources; `None` selects the
    /// sole query of a non-incremental benchmark.
    pub query_index: Option<usize>,
    /// Track hint where the source encodes it. `None` for the early eras
    /// whose archives predate the incremental track.
    pub is_incremental: Option<bool>,
    pub status: Status,
    pub cpu_time: Option<f64>,
    pub wallclock_time: Option<f64>,
}

/// Resolution bookkeeping for one ingested evaluation. Misses are
/// expected (withdrawn and renamed benchmarks); the counts make them
/// visible without failing the run.
#[derive(Debug, Default, Clone)]
pub struct LookupStats {
    pub lookups: u64,
    pub lookup_failures: u64,
    pub benchmarks_seen: HashSet<(String, String, String)>,
    pub unknown_benchmarks: HashSet<(String, String, String)>,
    /// Records dropped because the solver variant is not on the roster.
    pub unknown_solvers: u64,
}

impl LookupStats {
    pub fn record_hit(&mut self, logic: &str, family: &str, name: &str) {
        self.lookups += 1;
        self.benchmarks_seen
            .insert((logic.into(), family.into(), name.into()));
    }

    pub fn record_miss(&mut self, logic: &str, family: &str, name: &str) {
        self.lookups += 1;
        self.lookup_failures += 1;
        let key = (logic.to_string(), family.to_string(), name.to_string());
        self.benchmarks_seen.insert(key.clone());
        self.unknown_benchmarks.insert(key);
    }

    pub fn print(&self, evaluation: &str) {
        eprintln!(
            "{evaluation}: {} lookups, {} failed; {} distinct benchmarks, {} unknown; {} records with unknown solvers dropped",
            self.lookups,
            self.lookup_failures,
            self.benchmarks_seen.len(),
            self.unknown_benchmarks.len(),
            self.unknown_solvers,
        );
    }
}
