//! Normalization of raw answer tokens and timings.

use smtbank_core::model::Status;

/// Collapses a raw answer token to the three-valued status. The eras use
/// different no-answer sentinels (`-`, `starexec-unknown`, empty cells,
/// `timeout`); everything that is not literally sat or unsat is unknown.
pub fn benchmark_status(raw: &str) -> Status {
    match raw.trim() {
        "sat" => Status::Sat,
        "unsat" => Status::Unsat,
        _ => Status::Unknown,
    }
}

/// Applies the expected-status column carried by some eras: an answer
/// that disagrees with a definite expectation is recorded as unknown
/// rather than as a wrong definite answer.
pub fn reconcile(answer: Status, expected: Status) -> Status {
    if answer.is_definite() && expected.is_definite() && answer != expected {
        Status::Unknown
    } else {
        answer
    }
}

/// Parses a timing cell; malformed and negative values become `None`.
pub fn parse_time(raw: &str) -> Option<f64> {
    let t: f64 = raw.trim().parse().ok()?;
    if t.is_finite() && t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_collapse_to_unknown() {
        assert_eq!(benchmark_status("sat"), Status::Sat);
        assert_eq!(benchmark_status("unsat"), Status::Unsat);
        assert_eq!(benchmark_status("-"), Status::Unknown);
        assert_eq!(benchmark_status("starexec-unknown"), Status::Unknown);
        assert_eq!(benchmark_status(""), Status::Unknown);
        assert_eq!(benchmark_status("timeout"), Status::Unknown);
        assert_eq!(benchmark_status(" unsat "), Status::Unsat);
    }

    #[test]
    fn disagreement_with_expectation_is_unknown() {
        assert_eq!(reconcile(Status::Sat, Status::Unsat), Status::Unknown);
        assert_eq!(reconcile(Status::Unsat, Status::Sat), Status::Unknown);
        assert_eq!(reconcile(Status::Sat, Status::Sat), Status::Sat);
        // no expectation leaves the answer alone
        assert_eq!(reconcile(Status::Unsat, Status::Unknown), Status::Unsat);
        assert_eq!(reconcile(Status::Unknown, Status::Sat), Status::Unknown);
    }

    #[test]
    fn times_parse_or_vanish() {
        assert_eq!(parse_time("1.25"), Some(1.25));
        assert_eq!(parse_time(" 0 "), Some(0.0));
        assert_eq!(parse_time("n/a"), None);
        assert_eq!(parse_time("-3.0"), None);
        assert_eq!(parse_time("inf"), None);
    }
}
