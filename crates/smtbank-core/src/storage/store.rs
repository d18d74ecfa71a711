use crate::model::{
    BenchmarkRow, Candidate, CheckOutcome, EvaluationRow, FamilyRow, NewRating, NewResult,
    QueryAnswer, QueryRow, RatingRow, Status,
};
use anyhow::Context;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path).context("failed to open sqlite db")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        // The whole pipeline is re-runnable from the source archives, so
        // durability can be relaxed; readers must never block on ingestion.
        conn.pragma_update(None, "synchronous", "OFF")?;
        conn.busy_timeout(Duration::from_secs(30))?;
        configure(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        configure(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> anyhow::Result<()> {
        let conn = self.lock();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // evaluations

    pub fn create_evaluation(
        &self,
        name: &str,
        date: Option<NaiveDate>,
        link: Option<&str>,
    ) -> anyhow::Result<i64> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO Evaluations(name, date, link) VALUES (?1, ?2, ?3)",
            params![name, date_to_sql(date), link],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn evaluations(&self) -> anyhow::Result<Vec<EvaluationRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, name, date, link FROM Evaluations ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(EvaluationRow {
                id: row.get(0)?,
                name: row.get(1)?,
                date: date_from_sql(row.get(2)?),
                link: row.get(3)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    // solvers and variants

    pub fn insert_solver(&self, name: &str, link: Option<&str>) -> anyhow::Result<i64> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO Solvers(name, link) VALUES (?1, ?2)",
            params![name, link],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn solver_id(&self, name: &str) -> anyhow::Result<Option<i64>> {
        let conn = self.lock();
        let id = conn
            .query_row(
                "SELECT id FROM Solvers WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    pub fn insert_variant(
        &self,
        full_name: &str,
        solver: i64,
        evaluation: Option<i64>,
    ) -> anyhow::Result<i64> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO SolverVariants(fullName, solver, evaluation) VALUES (?1, ?2, ?3)",
            params![full_name, solver, evaluation],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Looks up a solver variant in one evaluation's roster. Results are
    /// only ever recorded for variants found here.
    pub fn variant_in_evaluation(
        &self,
        evaluation: i64,
        full_name: &str,
    ) -> anyhow::Result<Option<i64>> {
        let conn = self.lock();
        let id = conn
            .query_row(
                "SELECT id FROM SolverVariants WHERE evaluation = ?1 AND fullName = ?2",
                params![evaluation, full_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    // benchmarks and queries

    pub fn benchmark(&self, id: i64) -> anyhow::Result<Option<BenchmarkRow>> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT id, family, logic, name, isIncremental, size, compressedSize,
                        license, generatedBy, generator, application, description,
                        category, checkLenient, checkStrict, queryCount
                 FROM Benchmarks WHERE id = ?1",
                params![id],
                |row| {
                    Ok(BenchmarkRow {
                        id: row.get(0)?,
                        family: row.get(1)?,
                        logic: row.get(2)?,
                        name: row.get(3)?,
                        is_incremental: row.get(4)?,
                        size: row.get(5)?,
                        compressed_size: row.get(6)?,
                        license: row.get(7)?,
                        generated_by: row.get(8)?,
                        generator: row.get(9)?,
                        application: row.get(10)?,
                        description: row.get(11)?,
                        category: row.get(12)?,
                        check_lenient: CheckOutcome::parse(&row.get::<_, String>(13)?),
                        check_strict: CheckOutcome::parse(&row.get::<_, String>(14)?),
                        query_count: row.get(15)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    pub fn queries_for_benchmark(&self, benchmark: i64) -> anyhow::Result<Vec<QueryRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT id, benchmark, idx, normalizedSize, compressedSize, defineFunCount,
                    maxTermDepth, numSexps, status, inferredStatus
             FROM Queries WHERE benchmark = ?1 ORDER BY idx",
        )?;
        let rows = stmt.query_map(params![benchmark], |row| {
            Ok(QueryRow {
                id: row.get(0)?,
                benchmark: row.get(1)?,
                idx: row.get(2)?,
                normalized_size: row.get(3)?,
                compressed_size: row.get(4)?,
                define_fun_count: row.get(5)?,
                max_term_depth: row.get(6)?,
                num_sexps: row.get(7)?,
                status: Status::parse(&row.get::<_, String>(8)?),
                inferred_status: row
                    .get::<_, Option<String>>(9)?
                    .map(|s| Status::parse(&s)),
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    // identity resolution

    /// All catalog entries whose relative name matches, joined with the
    /// owning family folder. Stage 1 of the resolver; later stages narrow
    /// this list in memory.
    pub fn candidates_by_filename(&self, name: &str) -> anyhow::Result<Vec<Candidate>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT b.id, f.folderName, b.isIncremental, b.logic
             FROM Benchmarks b
             JOIN Families f ON b.family = f.id
             WHERE b.name = ?1",
        )?;
        let rows = stmt.query_map(params![name], |row| {
            Ok(Candidate {
                benchmark: row.get(0)?,
                family_folder: row.get(1)?,
                is_incremental: row.get(2)?,
                logic: row.get(3)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// The single query of a non-incremental benchmark, if it has exactly
    /// one. Incremental benchmarks need explicit index matching instead.
    pub fn sole_query(&self, benchmark: i64) -> anyhow::Result<Option<i64>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT q.id FROM Queries q
             JOIN Benchmarks b ON q.benchmark = b.id
             WHERE q.benchmark = ?1 AND b.isIncremental = 0",
        )?;
        let rows = stmt.query_map(params![benchmark], |row| row.get::<_, i64>(0))?;
        let mut ids = Vec::new();
        for r in rows {
            ids.push(r?);
        }
        if ids.len() == 1 {
            Ok(Some(ids[0]))
        } else {
            Ok(None)
        }
    }

    pub fn query_at(&self, benchmark: i64, idx: i64) -> anyhow::Result<Option<i64>> {
        let conn = self.lock();
        let id = conn
            .query_row(
                "SELECT id FROM Queries WHERE benchmark = ?1 AND idx = ?2",
                params![benchmark, idx],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    // results

    /// Inserts a batch of results in one transaction. The referenced
    /// evaluation and variants must already be committed.
    pub fn insert_results(&self, results: &[NewResult]) -> anyhow::Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Results(evaluation, query, solverVariant, status, cpuTime, wallclockTime)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in results {
                stmt.execute(params![
                    r.evaluation,
                    r.query,
                    r.solver_variant,
                    r.status.as_str(),
                    r.cpu_time,
                    r.wallclock_time,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn result_count(&self, evaluation: i64) -> anyhow::Result<i64> {
        let conn = self.lock();
        let n = conn.query_row(
            "SELECT COUNT(*) FROM Results WHERE evaluation = ?1",
            params![evaluation],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    // status inference

    pub fn unknown_query_ids(&self) -> anyhow::Result<Vec<i64>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id FROM Queries WHERE status = 'unknown' ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn answers_for_query(&self, query: i64) -> anyhow::Result<Vec<QueryAnswer>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT res.evaluation, sv.solver, res.status
             FROM Results res
             JOIN SolverVariants sv ON res.solverVariant = sv.id
             WHERE res.query = ?1",
        )?;
        let rows = stmt.query_map(params![query], |row| {
            Ok(QueryAnswer {
                evaluation: row.get(0)?,
                solver: row.get(1)?,
                status: Status::parse(&row.get::<_, String>(2)?),
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn set_inferred_status(&self, query: i64, status: Option<Status>) -> anyhow::Result<()> {
        let conn = self.lock();
        conn.execute(
            "UPDATE Queries SET inferredStatus = ?1 WHERE id = ?2",
            params![status.map(|s| s.as_str()), query],
        )?;
        Ok(())
    }

    /// Declared and inferred status of one query.
    pub fn query_statuses(&self, query: i64) -> anyhow::Result<(Status, Option<Status>)> {
        let conn = self.lock();
        let (status, inferred): (String, Option<String>) = conn.query_row(
            "SELECT status, inferredStatus FROM Queries WHERE id = ?1",
            params![query],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok((Status::parse(&status), inferred.map(|s| Status::parse(&s))))
    }

    // ratings

    /// Logics with at least one result on a non-incremental benchmark in
    /// the given evaluation.
    pub fn result_logics(&self, evaluation: i64) -> anyhow::Result<Vec<String>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT b.logic
             FROM Results res
             JOIN Queries q ON res.query = q.id
             JOIN Benchmarks b ON q.benchmark = b.id
             WHERE res.evaluation = ?1 AND b.isIncremental = 0
             ORDER BY b.logic",
        )?;
        let rows = stmt.query_map(params![evaluation], |row| row.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Distinct solvers that solved at least one non-incremental benchmark
    /// of the logic in the evaluation.
    pub fn considered_solvers(&self, evaluation: i64, logic: &str) -> anyhow::Result<i64> {
        let conn = self.lock();
        let n = conn.query_row(
            "SELECT COUNT(DISTINCT sv.solver)
             FROM Results res
             JOIN SolverVariants sv ON res.solverVariant = sv.id
             JOIN Queries q ON res.query = q.id
             JOIN Benchmarks b ON q.benchmark = b.id
             WHERE res.evaluation = ?1 AND b.logic = ?2
               AND b.isIncremental = 0
               AND res.status IN ('sat', 'unsat')",
            params![evaluation, logic],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// Per query with at least one result in the evaluation: the number of
    /// distinct solvers that answered sat or unsat for it.
    pub fn query_success_counts(
        &self,
        evaluation: i64,
        logic: &str,
    ) -> anyhow::Result<Vec<(i64, i64)>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT res.query,
                    COUNT(DISTINCT CASE WHEN res.status IN ('sat', 'unsat')
                                        THEN sv.solver END)
             FROM Results res
             JOIN SolverVariants sv ON res.solverVariant = sv.id
             JOIN Queries q ON res.query = q.id
             JOIN Benchmarks b ON q.benchmark = b.id
             WHERE res.evaluation = ?1 AND b.logic = ?2 AND b.isIncremental = 0
             GROUP BY res.query
             ORDER BY res.query",
        )?;
        let rows = stmt.query_map(params![evaluation, logic], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn clear_ratings(&self, evaluation: i64) -> anyhow::Result<()> {
        let conn = self.lock();
        conn.execute(
            "DELETE FROM Ratings WHERE evaluation = ?1",
            params![evaluation],
        )?;
        Ok(())
    }

    pub fn insert_ratings(&self, ratings: &[NewRating]) -> anyhow::Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Ratings(query, evaluation, rating, consideredSolvers, successfulSolvers)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for r in ratings {
                stmt.execute(params![
                    r.query,
                    r.evaluation,
                    r.rating,
                    r.considered_solvers,
                    r.successful_solvers,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn ratings_for_evaluation(&self, evaluation: i64) -> anyhow::Result<Vec<RatingRow>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT query, evaluation, rating, consideredSolvers, successfulSolvers
             FROM Ratings WHERE evaluation = ?1 ORDER BY query",
        )?;
        let rows = stmt.query_map(params![evaluation], |row| {
            Ok(RatingRow {
                query: row.get(0)?,
                evaluation: row.get(1)?,
                rating: row.get(2)?,
                considered_solvers: row.get(3)?,
                successful_solvers: row.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    // families

    pub fn family_by_folder(&self, folder: &str) -> anyhow::Result<Option<FamilyRow>> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT id, name, folderName, date, firstOccurrence, benchmarkCount
                 FROM Families WHERE folderName = ?1",
                params![folder],
                |row| {
                    Ok(FamilyRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        folder_name: row.get(2)?,
                        date: date_from_sql(row.get(3)?),
                        first_occurrence: date_from_sql(row.get(4)?),
                        benchmark_count: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }
}

fn configure(conn: &Connection) -> anyhow::Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

pub(crate) fn date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.to_string())
}

pub(crate) fn date_from_sql(raw: Option<String>) -> Option<NaiveDate> {
    raw.and_then(|s| s.parse().ok())
}
