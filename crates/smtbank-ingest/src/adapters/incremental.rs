//! 2024 incremental-track logs: jobs separated by literal `---` lines,
//! each job a run of `key=value` header lines followed by one answer line
//! per query in file order. Query ordinals are therefore positional.

use crate::adapters::split_family;
use crate::normalize::{benchmark_status, parse_time};
use crate::record::ResultRecord;
use anyhow::{bail, Context};
use std::path::Path;
use tracing::warn;

const BLOCK_SEPARATOR: &str = "---";

pub fn read_log(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read log {}", path.display()))?;
    parse_log(&raw)
}

pub fn parse_log(raw: &str) -> anyhow::Result<Vec<ResultRecord>> {
    let mut records = Vec::new();
    for (i, block) in raw.split(BLOCK_SEPARATOR).enumerate() {
        if block.trim().is_empty() {
            continue;
        }
        parse_block(block, &mut records)
            .with_context(|| format!("malformed log block {}", i + 1))?;
    }
    Ok(records)
}

fn parse_block(block: &str, records: &mut Vec<ResultRecord>) -> anyhow::Result<()> {
    let mut solver: Option<&str> = None;
    let mut benchmark: Option<&str> = None;
    let mut cpu_time: Option<f64> = None;
    let mut wallclock_time: Option<f64> = None;
    let mut answers: Vec<&str> = Vec::new();

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.split_once('=') {
            Some(("solver", v)) => solver = Some(v.trim()),
            Some(("benchmark", v)) => benchmark = Some(v.trim()),
            Some(("cpu", v)) => cpu_time = parse_time(v),
            Some(("wall", v)) => wallclock_time = parse_time(v),
            Some((key, _)) => warn!(key, "unknown header in log block"),
            None => answers.push(line),
        }
    }

    let solver = solver.context("block has no solver header")?;
    let benchmark = benchmark.context("block has no benchmark header")?;
    if answers.is_empty() {
        bail!("block for {benchmark} has no answer lines");
    }

    let path = benchmark
        .strip_prefix("incremental/")
        .unwrap_or(benchmark);
    let (logic, rest) = split_family(path);
    let (family, name) = split_family(rest);

    for (i, answer) in answers.iter().enumerate() {
        records.push(ResultRecord {
            solver: solver.to_string(),
            logic: logic.to_string(),
            family: family.to_string(),
            name: name.to_string(),
            query_index: Some(i + 1),
            is_incremental: Some(true),
            status: benchmark_status(answer),
            // job-level timings; the log does not attribute time per query
            cpu_time,
            wallclock_time,
        });
    }
    Ok(())
}
