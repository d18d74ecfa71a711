//! Thin file readers that turn each source format into raw rows for the
//! era adapters. The tabular archives are plain comma-separated text;
//! none of their cells ever contain commas or quoting, so a field split
//! is all the parsing they need.

use anyhow::{bail, Context};
use smtbank_core::config::SourceFormat;
use smtbank_ingest::adapters::{early, incremental, json, smtexec, starexec};
use smtbank_ingest::record::ResultRecord;
use std::path::Path;

pub fn read_records(format: SourceFormat, path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    match format {
        SourceFormat::Scoreboard => read_scoreboard(path),
        SourceFormat::SmtExec => read_smtexec(path),
        SourceFormat::CsvPositional => read_csv_positional(path),
        SourceFormat::CsvNamed => read_csv_named(path),
        SourceFormat::Json => json::read_dump(path),
        SourceFormat::IncrementalLog => incremental::read_log(path),
    }
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn fields<'a>(line: &'a str, expected: usize, path: &Path) -> anyhow::Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < expected {
        bail!(
            "{}: expected {} fields, got {}: {line}",
            path.display(),
            expected,
            fields.len()
        );
    }
    Ok(fields)
}

/// `division,benchmark,solver,answer`
fn read_scoreboard(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let mut out = Vec::new();
    for line in read_lines(path)? {
        let f = fields(&line, 4, path)?;
        out.push(
            early::ScoreboardRow {
                division: f[0].into(),
                benchmark: f[1].into(),
                solver: f[2].into(),
                answer: f[3].into(),
            }
            .into_record(),
        );
    }
    Ok(out)
}

/// `solver,logic,benchmark,answer,expected,cpu`
fn read_smtexec(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let mut out = Vec::new();
    for line in read_lines(path)? {
        let f = fields(&line, 6, path)?;
        out.push(
            smtexec::ExportRow {
                solver: f[0].into(),
                logic: f[1].into(),
                benchmark: f[2].into(),
                answer: f[3].into(),
                expected: f[4].into(),
                cpu_time: f[5].into(),
            }
            .into_record(),
        );
    }
    Ok(out)
}

/// `benchmark,solver,configuration,status,cpu,wallclock` with a header
/// line.
fn read_csv_positional(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let mut out = Vec::new();
    for line in read_lines(path)?.iter().skip(1) {
        let f = fields(line, 6, path)?;
        out.push(
            starexec::PositionalRow {
                benchmark: f[0].into(),
                solver: f[1].into(),
                status: f[3].into(),
                cpu_time: f[4].into(),
                wallclock_time: f[5].into(),
            }
            .into_record(),
        );
    }
    Ok(out)
}

/// Named-column layout; the header line names vary slightly across years
/// so columns are located case-insensitively.
fn read_csv_named(path: &Path) -> anyhow::Result<Vec<ResultRecord>> {
    let lines = read_lines(path)?;
    let mut it = lines.iter();
    let header = it.next().with_context(|| format!("{} is empty", path.display()))?;
    let columns: Vec<String> = header.split(',').map(|c| c.trim().to_lowercase()).collect();
    let col = |name: &str| -> anyhow::Result<usize> {
        columns
            .iter()
            .position(|c| c == name)
            .with_context(|| format!("{}: no {name} column", path.display()))
    };
    let benchmark = col("benchmark")?;
    let solver = col("solver")?;
    let result = col("result")?;
    // the expected column is absent in some years
    let expected = columns.iter().position(|c| c == "expected");
    let cpu = col("cpu time")?;
    let wallclock = col("wallclock time")?;
    let width = 1 + [Some(benchmark), Some(solver), Some(result), expected, Some(cpu), Some(wallclock)]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0);

    let mut out = Vec::new();
    for line in it {
        let f = fields(line, width, path)?;
        out.push(
            starexec::NamedRow {
                benchmark: f[benchmark].into(),
                solver: f[solver].into(),
                result: f[result].into(),
                expected: expected.map(|i| f[i]).unwrap_or("starexec-unknown").into(),
                cpu_time: f[cpu].into(),
                wallclock_time: f[wallclock].into(),
            }
            .into_record(),
        );
    }
    Ok(out)
}
