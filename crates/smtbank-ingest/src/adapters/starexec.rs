//! StarExec CSV exports: the 2014 positional layout and the named-column
//! layout used from 2015 on. The later layout prefixes benchmark paths
//! with the track directory; that is stripped here. Solver names pass
//! through verbatim, `-wrapped` suffix included, because the registry's
//! variant table records the literal submitted spellings.

use crate::adapters::split_family;
use crate::normalize::{benchmark_status, parse_time, reconcile};
use crate::record::ResultRecord;
use smtbank_core::model::Status;

const TRACK_PREFIX: &str = "track_single_query/";

/// 2014 layout: `benchmark,solver,configuration,status,cpu,wallclock`
/// with the benchmark cell holding `LOGIC/FAMILY/rest...`.
#[derive(Debug, Clone)]
pub struct PositionalRow {
    pub benchmark: String,
    pub solver: String,
    pub status: String,
    pub cpu_time: String,
    pub wallclock_time: String,
}

impl PositionalRow {
    pub fn into_record(self) -> ResultRecord {
        let (logic, rest) = split_family(&self.benchmark);
        let (family, name) = split_family(rest);
        ResultRecord {
            solver: self.solver.clone(),
            logic: logic.to_string(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: None,
            is_incremental: Some(false),
            status: benchmark_status(&self.status),
            cpu_time: parse_time(&self.cpu_time),
            wallclock_time: parse_time(&self.wallclock_time),
        }
    }
}

/// 2015+ layout, reduced to the columns the pipeline consumes.
#[derive(Debug, Clone)]
pub struct NamedRow {
    /// `track_single_query/LOGIC/FAMILY/rest...` in later years, bare
    /// `LOGIC/FAMILY/rest...` in earlier ones.
    pub benchmark: String,
    /// Verbatim submitted spelling, `-wrapped` suffix and all; the
    /// variant roster is keyed on these literal names.
    pub solver: String,
    pub result: String,
    /// `starexec-unknown` means no recorded expectation.
    pub expected: String,
    pub cpu_time: String,
    pub wallclock_time: String,
}

impl NamedRow {
    pub fn into_record(self) -> ResultRecord {
        let path = self
            .benchmark
            .strip_prefix(TRACK_PREFIX)
            .unwrap_or(&self.benchmark);
        let (logic, rest) = split_family(path);
        let (family, name) = split_family(rest);
        let expected = match self.expected.as_str() {
            "starexec-unknown" => Status::Unknown,
            other => benchmark_status(other),
        };
        ResultRecord {
            solver: self.solver.clone(),
            logic: logic.to_string(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: None,
            is_incremental: Some(false),
            status: reconcile(benchmark_status(&self.result), expected),
            cpu_time: parse_time(&self.cpu_time),
            wallclock_time: parse_time(&self.wallclock_time),
        }
    }
}
