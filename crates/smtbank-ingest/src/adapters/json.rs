//! 2018+ unified JSON dumps, published gzipped and covering every track
//! of a competition in one file. Only single-query entries feed the
//! result tables; other tracks use scoring schemes this pipeline does not
//! model.

use crate::adapters::split_family;
use crate::normalize::{benchmark_status, reconcile};
use crate::record::ResultRecord;
use anyhow::Context;
use flate2::read::GzDecoder;
use serde::Deserialize;
use smtbank_core::model::Status;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SINGLE_QUERY_TRACK: &str = "track_single_query";

#[derive(Debug, Deserialize)]
pub struct Dump {
    pub results: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    pub track: String,
    pub solver: String,
    /// `LOGIC/FAMILY/rest...`
    pub benchmark: String,
    pub result: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub cpu_time: Option<f64>,
    #[serde(default)]
    pub wallclock_time: Option<f64>,
}

impl Entry {
    fn into_record(self) -> ResultRecord {
        let (logic, rest) = split_family(&self.benchmark);
        let (family, name) = split_family(rest);
        let expected = self
            .expected
            .as_deref()
            .map(benchmark_status)
            .unwrap_or(Status::Unknown);
        ResultRecord {
            solver: self.solver.clone(),
            logic: logic.to_string(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: None,
            is_incremental: Some(false),
            status: reconcile(benchmark_status(&self.result), expected),
            cpu_time: self.cpu_time.filter(|t| t.is_finite() && *t >= 0.0),
            wallclock_time: self.wallclock_time.filter(|t| t.is_finite() && *t >= 0.0),
        }
    }
}

pub fn parse_dump(dump: Dump) -> Vec<ResultRecord> {
    dump.results
        .into_iter()
        .filter(|e| e.track == SINGLE_QUERY_TRACK)
        .map(Entry::into_record)
        .collect()
}

pub fn read_dump(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let file =
        File::open(path).with_context(|| format!("failed to open dump {}", path.display()))?;
    let reader = BufReader::new(GzDecoder::new(file));
    let dump: Dump = serde_json::from_reader(reader)
        .with_context(|| format!("malformed JSON dump {}", path.display()))?;
    Ok(parse_dump(dump))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_single_query_track_survives() {
        let dump: Dump = serde_json::from_str(
            r#"{"results": [
                {"track": "track_single_query", "solver": "Z3",
                 "benchmark": "QF_BV/sage/app1.smt2", "result": "sat",
                 "cpu_time": 1.5, "wallclock_time": 1.6},
                {"track": "track_incremental", "solver": "Z3",
                 "benchmark": "QF_BV/sage/app2.smt2", "result": "unsat"},
                {"track": "track_single_query", "solver": "CVC4",
                 "benchmark": "QF_BV/sage/app1.smt2", "result": "sat",
                 "expected": "unsat"}
            ]}"#,
        )
        .unwrap();
        let records = parse_dump(dump);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, Status::Sat);
        assert_eq!(records[0].family, "sage");
        // disagreement with the expected column is demoted
        assert_eq!(records[1].status, Status::Unknown);
    }

    #[test]
    fn gzipped_dumps_round_trip_from_disk() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2018.json.gz");
        let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        enc.write_all(
            br#"{"results": [{"track": "track_single_query", "solver": "Z3",
                "benchmark": "QF_LIA/calypto/problem_13.smt2", "result": "unsat"}]}"#,
        )
        .unwrap();
        enc.finish().unwrap();

        let records = read_dump(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].logic, "QF_LIA");
        assert_eq!(records[0].status, Status::Unsat);
    }
}
