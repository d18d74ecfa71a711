//! 2005-2006 scoreboard exports: one row per (division, benchmark,
//! solver) with a bare answer token. No timing columns, no expected
//! status, no track distinction.

use crate::adapters::split_family;
use crate::normalize::benchmark_status;
use crate::record::ResultRecord;

#[derive(Debug, Clone)]
pub struct ScoreboardRow {
    /// Division name; identical to the SMT-LIB logic in these years.
    pub division: String,
    /// Benchmark path relative to the division, `family/rest...`.
    pub benchmark: String,
    pub solver: String,
    pub answer: String,
}

impl ScoreboardRow {
    pub fn into_record(self) -> ResultRecord {
        let (family, name) = split_family(&self.benchmark);
        ResultRecord {
            solver: self.solver.clone(),
            logic: self.division.clone(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: None,
            // predates the incremental track; leave the flag open so the
            // resolver does not over-filter
            is_incremental: None,
            status: benchmark_status(&self.answer),
            cpu_time: None,
            wallclock_time: None,
        }
    }
}
