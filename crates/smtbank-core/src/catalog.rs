//! The canonical catalog of benchmarks and queries, populated once per
//! benchmark file from the feature extractor's output.

use crate::extract::{ExtractorOutput, SYMBOL_TABLE};
use crate::model::CheckOutcome;
use crate::registry::{match_target_solvers, SolverRegistry};
use crate::storage::store::date_to_sql;
use crate::storage::Store;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use regex::Regex;
use rusqlite::{params, OptionalExtension};
use std::sync::OnceLock;
use tracing::warn;

/// Location of a benchmark inside the corpus tree:
/// `{non-incremental|incremental}/LOGIC/FAMILYFOLDER/rest...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkLocation {
    pub is_incremental: bool,
    pub logic: String,
    pub family_folder: String,
    /// Relative path under the family folder.
    pub name: String,
}

pub fn parse_benchmark_path(relative: &str) -> anyhow::Result<BenchmarkLocation> {
    let mut parts = relative.split('/');
    let track = parts.next().unwrap_or_default();
    let is_incremental = match track {
        "incremental" => true,
        "non-incremental" => false,
        other => bail!("unexpected track component {other:?} in {relative}"),
    };
    let logic = parts
        .next()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing logic component in {relative}"))?;
    let family_folder = parts
        .next()
        .filter(|s| !s.is_empty())
        .with_context(|| format!("missing family component in {relative}"))?;
    let name = parts.collect::<Vec<_>>().join("/");
    if name.is_empty() {
        bail!("missing benchmark name in {relative}");
    }
    Ok(BenchmarkLocation {
        is_incremental,
        logic: logic.into(),
        family_folder: family_folder.into(),
        name,
    })
}

/// Parses the family folder naming conventions `yyyymmdd-NAME`,
/// `yyyy-NAME` and bare `NAME`. Invalid dates fall back to the bare form.
pub fn parse_family_folder(folder: &str) -> (Option<NaiveDate>, &str) {
    static FULL_DATE: OnceLock<Regex> = OnceLock::new();
    static YEAR_ONLY: OnceLock<Regex> = OnceLock::new();
    let full = FULL_DATE.get_or_init(|| Regex::new(r"^(\d{4})(\d{2})(\d{2})-(.*)$").unwrap());
    if let Some(caps) = full.captures(folder) {
        let y: i32 = caps[1].parse().unwrap_or(0);
        let m: u32 = caps[2].parse().unwrap_or(0);
        let d: u32 = caps[3].parse().unwrap_or(0);
        match NaiveDate::from_ymd_opt(y, m, d) {
            Some(date) => return (Some(date), caps.get(4).map_or(folder, |m| m.as_str())),
            None => return (None, folder),
        }
    }
    let year_only = YEAR_ONLY.get_or_init(|| Regex::new(r"^(\d{4})-(.*)$").unwrap());
    if let Some(caps) = year_only.captures(folder) {
        let y: i32 = caps[1].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(y, 1, 1) {
            return (Some(date), caps.get(2).map_or(folder, |m| m.as_str()));
        }
    }
    (None, folder)
}

/// Static license table; `GPL` occurs without a version in some benchmark
/// headers, and one family embeds the full CMU SoSy Lab text.
const LICENSES: &[(&str, &str, &str)] = &[
    (
        "Creative Commons Attribution 4.0 International",
        "https://creativecommons.org/licenses/by/4.0/",
        "CC-BY-4.0",
    ),
    (
        "Creative Commons Attribution Share Alike 4.0 International",
        "https://creativecommons.org/licenses/by-sa/4.0/",
        "CC-BY-SA-4.0",
    ),
    (
        "Creative Commons Attribution Non Commercial 4.0 International",
        "https://creativecommons.org/licenses/by-nc/4.0/",
        "CC-BY-NC-4.0",
    ),
    (
        "Creative Commons Zero v1.0 Universal",
        "https://creativecommons.org/publicdomain/zero/1.0/",
        "CC0-1.0",
    ),
    (
        "GNU General Public License v2.0 or later",
        "https://www.gnu.org/licenses/gpl-2.0.html",
        "GPL-2.0-or-later",
    ),
    (
        "GNU General Public License v3.0 or later",
        "https://www.gnu.org/licenses/gpl-3.0.html",
        "GPL-3.0-or-later",
    ),
    (
        "Apache License 2.0",
        "https://www.apache.org/licenses/LICENSE-2.0",
        "Apache-2.0",
    ),
    ("ISC License", "https://www.isc.org/licenses/", "ISC"),
    ("MIT License", "https://opensource.org/license/mit/", "MIT"),
    ("GNU General Public License Unknown Version", "", ""),
    ("CMU SoSy Lab", "", ""),
];

pub fn install_licenses(store: &Store) -> anyhow::Result<()> {
    let conn = store.lock();
    let mut stmt =
        conn.prepare("INSERT INTO Licenses(name, link, spdxIdentifier) VALUES (?1, ?2, ?3)")?;
    for (name, link, spdx) in LICENSES {
        stmt.execute(params![name, link, spdx])?;
    }
    Ok(())
}

pub fn install_symbols(store: &Store) -> anyhow::Result<()> {
    let conn = store.lock();
    let mut stmt = conn.prepare("INSERT INTO Symbols(name) VALUES (?1)")?;
    for name in SYMBOL_TABLE {
        stmt.execute(params![name])?;
    }
    Ok(())
}

/// Inserts one benchmark with its queries, symbol counts and target-solver
/// annotations, creating the owning family lazily. Everything happens in
/// one transaction so an interrupted run never leaves a family without its
/// referencing benchmark.
pub fn add_benchmark(
    store: &Store,
    registry: &SolverRegistry,
    relative_path: &str,
    extraction: &ExtractorOutput,
    check_lenient: CheckOutcome,
    check_strict: CheckOutcome,
) -> anyhow::Result<i64> {
    let loc = parse_benchmark_path(relative_path)?;
    let meta = &extraction.benchmark;
    let category = meta
        .category
        .as_deref()
        .context("benchmark metadata is missing the required category field")?;
    if meta.logic != loc.logic {
        warn!(
            path = %relative_path,
            declared = %meta.logic,
            "benchmark declares a different logic than its path; using the path"
        );
    }

    let mut conn = store.lock();
    let tx = conn.transaction()?;

    let family: i64 = match tx
        .query_row(
            "SELECT id FROM Families WHERE folderName = ?1",
            params![loc.family_folder],
            |row| row.get(0),
        )
        .optional()?
    {
        Some(id) => id,
        None => {
            let (date, name) = parse_family_folder(&loc.family_folder);
            tx.execute(
                "INSERT INTO Families(name, folderName, date, benchmarkCount) VALUES (?1, ?2, ?3, 0)",
                params![name, loc.family_folder, date_to_sql(date)],
            )?;
            tx.last_insert_rowid()
        }
    };

    let license: Option<i64> = match &meta.license {
        Some(name) => {
            let existing: Option<i64> = tx
                .query_row(
                    "SELECT id FROM Licenses WHERE name = ?1 OR spdxIdentifier = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?;
            match existing {
                Some(id) => Some(id),
                None => {
                    tx.execute(
                        "INSERT INTO Licenses(name, link, spdxIdentifier) VALUES (?1, '', '')",
                        params![name],
                    )?;
                    Some(tx.last_insert_rowid())
                }
            }
        }
        None => None,
    };

    tx.execute(
        "INSERT INTO Benchmarks(
            family, logic, name, isIncremental, size, compressedSize, license,
            generatedBy, generator, application, description, category,
            checkLenient, checkStrict, queryCount
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            family,
            loc.logic,
            loc.name,
            loc.is_incremental,
            meta.size,
            meta.compressed_size,
            license,
            meta.generated_by,
            meta.generator,
            meta.application,
            meta.description,
            category,
            check_lenient.as_str(),
            check_strict.as_str(),
            extraction.queries.len() as i64,
        ],
    )?;
    let benchmark = tx.last_insert_rowid();

    let targets = meta
        .target_solvers
        .as_deref()
        .map(|a| match_target_solvers(registry, a))
        .unwrap_or_default();

    for (i, q) in extraction.queries.iter().enumerate() {
        tx.execute(
            "INSERT INTO Queries(
                benchmark, idx, normalizedSize, compressedSize, defineFunCount,
                maxTermDepth, numSexps, status
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                benchmark,
                (i + 1) as i64,
                q.normalized_size,
                q.compressed_size,
                q.define_fun_count,
                q.max_term_depth,
                q.num_sexps,
                q.status.as_str(),
            ],
        )?;
        let query = tx.last_insert_rowid();

        for (sym_idx, count) in q.symbol_frequency.iter().enumerate() {
            if *count == 0 || sym_idx >= SYMBOL_TABLE.len() {
                continue;
            }
            tx.execute(
                "INSERT INTO SymbolCounts(symbol, query, count)
                 SELECT id, ?2, ?3 FROM Symbols WHERE name = ?1",
                params![SYMBOL_TABLE[sym_idx], query, count],
            )?;
        }

        for spec in &targets {
            tx.execute(
                "INSERT INTO TargetSolvers(query, solver)
                 SELECT ?2, id FROM Solvers WHERE name = ?1",
                params![spec.name, query],
            )?;
        }
    }

    tx.commit()?;
    Ok(benchmark)
}

/// Recomputes the derived family columns: benchmark counts and the
/// earliest evaluation date any of the family's benchmarks appeared in.
pub fn derive_family_stats(store: &Store) -> anyhow::Result<()> {
    let conn = store.lock();
    conn.execute(
        "UPDATE Families SET benchmarkCount =
            (SELECT COUNT(*) FROM Benchmarks WHERE Benchmarks.family = Families.id)",
        [],
    )?;
    conn.execute(
        "UPDATE Families SET firstOccurrence =
            (SELECT MIN(ev.date)
             FROM Evaluations ev
             JOIN Results res ON res.evaluation = ev.id
             JOIN Queries q ON res.query = q.id
             JOIN Benchmarks b ON q.benchmark = b.id
             WHERE b.family = Families.id)",
        [],
    )?;
    Ok(())
}
