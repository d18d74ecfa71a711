//! 2007-2013 SMT-Exec job exports. These carry an expected-status column;
//! answers disagreeing with a definite expectation are recorded as
//! unknown.

use crate::adapters::split_family;
use crate::normalize::{benchmark_status, parse_time, reconcile};
use crate::record::ResultRecord;

#[derive(Debug, Clone)]
pub struct ExportRow {
    pub solver: String,
    pub logic: String,
    /// `family/rest...` relative to the logic directory.
    pub benchmark: String,
    pub answer: String,
    pub expected: String,
    pub cpu_time: String,
}

impl ExportRow {
    pub fn into_record(self) -> ResultRecord {
        let (family, name) = split_family(&self.benchmark);
        let status = reconcile(
            benchmark_status(&self.answer),
            benchmark_status(&self.expected),
        );
        ResultRecord {
            solver: self.solver.clone(),
            logic: self.logic.clone(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: None,
            is_incremental: None,
            status,
            cpu_time: parse_time(&self.cpu_time),
            wallclock_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smtbank_core::model::Status;

    fn row(answer: &str, expected: &str) -> ExportRow {
        ExportRow {
            solver: "Z3 2.0".into(),
            logic: "QF_LIA".into(),
            benchmark: "calypto/problem_13.smt2".into(),
            answer: answer.into(),
            expected: expected.into(),
            cpu_time: "12.7".into(),
        }
    }

    #[test]
    fn agreeing_answer_survives() {
        let rec = row("unsat", "unsat").into_record();
        assert_eq!(rec.status, Status::Unsat);
        assert_eq!(rec.cpu_time, Some(12.7));
    }

    #[test]
    fn disagreeing_answer_is_demoted() {
        let rec = row("sat", "unsat").into_record();
        assert_eq!(rec.status, Status::Unknown);
    }

    #[test]
    fn unknown_expectation_keeps_the_answer() {
        let rec = row("sat", "unknown").into_record();
        assert_eq!(rec.status, Status::Sat);
    }
}
