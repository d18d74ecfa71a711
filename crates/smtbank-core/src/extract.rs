//! Interfaces to the external benchmark tooling: the feature-extraction
//! tool (one JSON array per benchmark file) and the syntax/flow checker
//! (exit-code tri-state). Both are black boxes invoked as subprocesses.

use crate::model::{CheckOutcome, Status};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

/// Exit code the checker uses for tool-level errors (its own timeouts or
/// crashes); mapped to indeterminate rather than fail.
pub const CHECKER_TOOL_ERROR: i32 = 2;

/// Fixed symbol table the extractor's per-query frequency vectors are
/// indexed against.
pub const SYMBOL_TABLE: &[&str] = &[
    "=", "distinct", "and", "or", "not", "=>", "xor", "ite", "let", "forall", "exists", "+", "-",
    "*", "/", "div", "mod", "abs", "<=", "<", ">=", ">", "to_real", "to_int", "is_int", "select",
    "store", "concat", "extract", "bvnot", "bvand", "bvor", "bvneg", "bvadd", "bvmul", "bvudiv",
    "bvurem", "bvshl", "bvlshr", "bvult", "fp.abs", "fp.neg", "fp.add", "fp.sub", "fp.mul",
    "fp.div", "fp.eq", "fp.lt", "fp.isNaN", "str.++", "str.len", "str.at", "str.contains",
    "str.prefixof", "str.suffixof", "str.indexof", "str.replace", "str.to_re", "str.in_re",
    "re.++", "re.union", "re.*",
];

/// Whole-benchmark metadata: the last element of the extractor's output
/// array.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkMeta {
    pub logic: String,
    #[serde(rename = "isIncremental", default)]
    pub is_incremental: bool,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(rename = "compressedSize", default)]
    pub compressed_size: Option<i64>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(rename = "generatedBy", default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub generator: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "queryCount")]
    pub query_count: usize,
    /// Free-text annotation naming the solvers this benchmark was
    /// generated for.
    #[serde(rename = "targetSolvers", default)]
    pub target_solvers: Option<String>,
}

/// Per-query metadata: one element per query, preceding the benchmark
/// metadata in the extractor's output array.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryMeta {
    #[serde(default)]
    pub status: Status,
    #[serde(rename = "normalizedSize", default)]
    pub normalized_size: Option<i64>,
    #[serde(rename = "compressedSize", default)]
    pub compressed_size: Option<i64>,
    #[serde(rename = "defineFunCount", default)]
    pub define_fun_count: Option<i64>,
    #[serde(rename = "maxTermDepth", default)]
    pub max_term_depth: Option<i64>,
    #[serde(rename = "numSexps", default)]
    pub num_sexps: Option<i64>,
    /// Indexed against [`SYMBOL_TABLE`].
    #[serde(rename = "symbolFrequency", default)]
    pub symbol_frequency: Vec<i64>,
}

#[derive(Debug, Clone)]
pub struct ExtractorOutput {
    pub queries: Vec<QueryMeta>,
    pub benchmark: BenchmarkMeta,
}

/// Parses the extractor's JSON output. A missing `category` is fatal for
/// the benchmark (but not for the batch); so is a query-count mismatch.
pub fn parse_extractor_output(raw: &str) -> anyhow::Result<ExtractorOutput> {
    let mut values: Vec<serde_json::Value> =
        serde_json::from_str(raw).context("extractor output is not a JSON array")?;
    if values.len() < 2 {
        bail!("extractor output has {} elements, expected at least 2", values.len());
    }
    let meta = values.pop().unwrap_or_default();
    let benchmark: BenchmarkMeta =
        serde_json::from_value(meta).context("malformed benchmark metadata")?;
    if benchmark.category.is_none() {
        bail!("benchmark metadata is missing the required category field");
    }
    let mut queries = Vec::with_capacity(values.len());
    for v in values {
        queries.push(serde_json::from_value(v).context("malformed query metadata")?);
    }
    if queries.len() != benchmark.query_count {
        bail!(
            "query count mismatch: metadata says {}, output has {}",
            benchmark.query_count,
            queries.len()
        );
    }
    Ok(ExtractorOutput { queries, benchmark })
}

/// Runs the feature extractor on one benchmark file.
pub fn run_extractor(tool: &str, benchmark: &Path) -> anyhow::Result<ExtractorOutput> {
    let output = Command::new(tool)
        .arg(benchmark)
        .output()
        .with_context(|| format!("failed to run extractor {tool}"))?;
    if !output.status.success() {
        bail!(
            "extractor failed on {}: {}",
            benchmark.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    let raw = String::from_utf8(output.stdout).context("extractor output is not UTF-8")?;
    parse_extractor_output(&raw)
}

/// Runs the syntax/flow checker on one benchmark file and maps its exit
/// code to the tri-state outcome.
pub fn run_checker(tool: &str, benchmark: &Path, strict: bool) -> anyhow::Result<CheckOutcome> {
    let mut cmd = Command::new(tool);
    if strict {
        cmd.arg("--strict");
    }
    let status = cmd
        .arg(benchmark)
        .status()
        .with_context(|| format!("failed to run checker {tool}"))?;
    Ok(check_outcome_from_exit(status.code()))
}

pub fn check_outcome_from_exit(code: Option<i32>) -> CheckOutcome {
    match code {
        Some(0) => CheckOutcome::Pass,
        Some(CHECKER_TOOL_ERROR) | None => CheckOutcome::Indeterminate,
        Some(_) => CheckOutcome::Fail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"[
        {"status": "unsat", "maxTermDepth": 7, "numSexps": 120,
         "defineFunCount": 2, "symbolFrequency": [3, 0, 14]},
        {"logic": "QF_LIA", "isIncremental": false, "size": 2048,
         "compressedSize": 512, "license": "CC-BY-4.0",
         "category": "industrial", "queryCount": 1}
    ]"#;

    #[test]
    fn parses_queries_and_benchmark_metadata() {
        let out = parse_extractor_output(GOOD).unwrap();
        assert_eq!(out.queries.len(), 1);
        assert_eq!(out.queries[0].status, Status::Unsat);
        assert_eq!(out.queries[0].max_term_depth, Some(7));
        assert_eq!(out.benchmark.logic, "QF_LIA");
        assert_eq!(out.benchmark.category.as_deref(), Some("industrial"));
    }

    #[test]
    fn missing_category_is_fatal() {
        let raw = r#"[
            {"status": "sat"},
            {"logic": "QF_LIA", "queryCount": 1}
        ]"#;
        let err = parse_extractor_output(raw).unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn query_count_mismatch_is_fatal() {
        let raw = r#"[
            {"status": "sat"},
            {"logic": "QF_LIA", "category": "crafted", "queryCount": 3}
        ]"#;
        assert!(parse_extractor_output(raw).is_err());
    }

    #[test]
    fn checker_exit_codes_map_to_tri_state() {
        assert_eq!(check_outcome_from_exit(Some(0)), CheckOutcome::Pass);
        assert_eq!(check_outcome_from_exit(Some(1)), CheckOutcome::Fail);
        assert_eq!(check_outcome_from_exit(Some(2)), CheckOutcome::Indeterminate);
        // killed by signal
        assert_eq!(check_outcome_from_exit(None), CheckOutcome::Indeterminate);
    }
}
