use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A solver answer or declared benchmark status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Sat,
    Unsat,
    Unknown,
}

impl Status {
    pub fn parse(s: &str) -> Self {
        match s {
            "sat" => Status::Sat,
            "unsat" => Status::Unsat,
            _ => Status::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Sat => "sat",
            Status::Unsat => "unsat",
            Status::Unknown => "unknown",
        }
    }

    pub fn is_definite(&self) -> bool {
        !matches!(self, Status::Unknown)
    }

    pub fn opposite(&self) -> Option<Status> {
        match self {
            Status::Sat => Some(Status::Unsat),
            Status::Unsat => Some(Status::Sat),
            Status::Unknown => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Unknown
    }
}

/// Outcome of an external syntax/flow check run. Exit codes map to a
/// tri-state: tool-level errors (timeouts, crashes of the checker itself)
/// are indeterminate, not failures of the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Fail,
    Indeterminate,
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::Pass => "pass",
            CheckOutcome::Fail => "fail",
            CheckOutcome::Indeterminate => "indeterminate",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pass" => CheckOutcome::Pass,
            "fail" => CheckOutcome::Fail,
            _ => CheckOutcome::Indeterminate,
        }
    }
}

/// A named, dated collection of benchmark files sharing a source folder.
#[derive(Debug, Clone)]
pub struct FamilyRow {
    pub id: i64,
    pub name: String,
    pub folder_name: String,
    pub date: Option<NaiveDate>,
    /// Earliest evaluation date in which any benchmark of this family
    /// appeared. Derived in postprocessing, never set at ingest time.
    pub first_occurrence: Option<NaiveDate>,
    pub benchmark_count: i64,
}

#[derive(Debug, Clone)]
pub struct BenchmarkRow {
    pub id: i64,
    pub family: i64,
    pub logic: String,
    /// Relative path under the family folder. Not a perfect key across
    /// history; see the identity resolver.
    pub name: String,
    pub is_incremental: bool,
    pub size: Option<i64>,
    pub compressed_size: Option<i64>,
    pub license: Option<i64>,
    pub generated_by: Option<String>,
    pub generator: Option<String>,
    pub application: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub check_lenient: CheckOutcome,
    pub check_strict: CheckOutcome,
    pub query_count: i64,
}

#[derive(Debug, Clone)]
pub struct QueryRow {
    pub id: i64,
    pub benchmark: i64,
    /// 1-based ordinal within the benchmark file.
    pub idx: i64,
    pub normalized_size: Option<i64>,
    pub compressed_size: Option<i64>,
    pub define_fun_count: Option<i64>,
    pub max_term_depth: Option<i64>,
    pub num_sexps: Option<i64>,
    pub status: Status,
    /// Only ever set while `status` is unknown.
    pub inferred_status: Option<Status>,
}

#[derive(Debug, Clone)]
pub struct EvaluationRow {
    pub id: i64,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub link: Option<String>,
}

/// A result row ready for insertion; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewResult {
    pub evaluation: i64,
    pub query: i64,
    pub solver_variant: i64,
    pub status: Status,
    pub cpu_time: Option<f64>,
    pub wallclock_time: Option<f64>,
}

/// One persisted answer for a query, reduced to the fields the status
/// inference pass needs.
#[derive(Debug, Clone, Copy)]
pub struct QueryAnswer {
    pub evaluation: i64,
    pub solver: i64,
    pub status: Status,
}

#[derive(Debug, Clone)]
pub struct NewRating {
    pub query: i64,
    pub evaluation: i64,
    pub rating: f64,
    pub considered_solvers: i64,
    pub successful_solvers: i64,
}

#[derive(Debug, Clone)]
pub struct RatingRow {
    pub query: i64,
    pub evaluation: i64,
    pub rating: f64,
    pub considered_solvers: i64,
    pub successful_solvers: i64,
}

/// Candidate row examined by the identity resolver.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub benchmark: i64,
    pub family_folder: String,
    pub is_incremental: bool,
    pub logic: String,
}
