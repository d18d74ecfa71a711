use clap::{Parser, Subcommand};
use smtbank_core::errors::ConfigError;
use smtbank_core::registry::SolverRegistry;
use smtbank_core::storage::Store;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod readers;

#[derive(Parser)]
#[command(
    name = "smtbank",
    version,
    about = "Curator for the SMT benchmark and competition-results database"
)]
struct Cli {
    #[arg(long, env = "SMTBANK_LOG", default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database with its schema and static tables.
    Init(InitArgs),
    /// Catalog every .smt2 file under a corpus root.
    Populate(PopulateArgs),
    /// Catalog a single benchmark file.
    AddBenchmark(AddBenchmarkArgs),
    /// Ingest the evaluations listed in the pipeline config.
    Ingest(IngestArgs),
    /// Infer statuses, compute ratings and derive family statistics.
    Postprocess(PostprocessArgs),
}

#[derive(Parser)]
struct InitArgs {
    #[arg(long, default_value = "smtbank.sqlite")]
    db: PathBuf,
    /// Also write a sample pipeline config next to the database.
    #[arg(long)]
    sample_config: bool,
}

#[derive(Parser)]
struct PopulateArgs {
    #[arg(long, default_value = "smtbank.sqlite")]
    db: PathBuf,
    /// Corpus root containing the non-incremental/ and incremental/ trees.
    #[arg(long)]
    benchmarks: PathBuf,
    #[arg(long, default_value = "smtbank-extract")]
    extractor: String,
    #[arg(long, default_value = "smtbank-check")]
    checker: String,
}

#[derive(Parser)]
struct AddBenchmarkArgs {
    #[arg(long, default_value = "smtbank.sqlite")]
    db: PathBuf,
    /// Corpus root the file's catalog path is computed against.
    #[arg(long)]
    benchmarks: PathBuf,
    file: PathBuf,
    #[arg(long, default_value = "smtbank-extract")]
    extractor: String,
    #[arg(long, default_value = "smtbank-check")]
    checker: String,
}

#[derive(Parser)]
struct IngestArgs {
    #[arg(long, default_value = "smtbank.yaml")]
    config: PathBuf,
}

#[derive(Parser)]
struct PostprocessArgs {
    #[arg(long, default_value = "smtbank.sqlite")]
    db: PathBuf,
}

mod exit_codes {
    pub const OK: i32 = 0;
    pub const DATA_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let code = match dispatch(cli.cmd) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            if e.is::<ConfigError>() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::DATA_FAILED
            }
        }
    };
    std::process::exit(code);
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cmd: Command) -> anyhow::Result<i32> {
    match cmd {
        Command::Init(args) => cmd_init(args),
        Command::Populate(args) => cmd_populate(args),
        Command::AddBenchmark(args) => cmd_add_benchmark(args),
        Command::Ingest(args) => cmd_ingest(args),
        Command::Postprocess(args) => cmd_postprocess(args),
    }
}

fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    ensure_parent_dir(&args.db)?;
    let store = Store::open(&args.db)?;
    store.init_schema()?;
    smtbank_core::catalog::install_licenses(&store)?;
    smtbank_core::catalog::install_symbols(&store)?;
    smtbank_core::logic::install_all(&store)?;
    SolverRegistry::new().install(&store)?;
    eprintln!("created {}", args.db.display());

    if args.sample_config {
        let config = args
            .db
            .parent()
            .unwrap_or(Path::new("."))
            .join("smtbank.yaml");
        if config.exists() {
            eprintln!("note: {} already exists", config.display());
        } else {
            smtbank_core::config::write_sample_config(&config).map_err(anyhow::Error::new)?;
            eprintln!("created {}", config.display());
        }
    }
    Ok(exit_codes::OK)
}

fn cmd_populate(args: PopulateArgs) -> anyhow::Result<i32> {
    let store = Store::open(&args.db)?;
    let registry = SolverRegistry::new();
    let mut files = Vec::new();
    collect_benchmarks(&args.benchmarks, &mut files)?;
    files.sort();
    info!(count = files.len(), "cataloging benchmark files");

    let mut failures = 0usize;
    for file in &files {
        if let Err(e) = catalog_one(&store, &registry, &args.benchmarks, file, &args.extractor, &args.checker)
        {
            error!(file = %file.display(), "failed to catalog: {e:#}");
            failures += 1;
        }
    }
    eprintln!(
        "cataloged {} of {} benchmarks ({failures} failed)",
        files.len() - failures,
        files.len()
    );
    Ok(if failures == 0 {
        exit_codes::OK
    } else {
        exit_codes::DATA_FAILED
    })
}

fn cmd_add_benchmark(args: AddBenchmarkArgs) -> anyhow::Result<i32> {
    let store = Store::open(&args.db)?;
    let registry = SolverRegistry::new();
    let id = catalog_one(
        &store,
        &registry,
        &args.benchmarks,
        &args.file,
        &args.extractor,
        &args.checker,
    )?;
    eprintln!("cataloged {} as benchmark {id}", args.file.display());
    Ok(exit_codes::OK)
}

fn catalog_one(
    store: &Store,
    registry: &SolverRegistry,
    root: &Path,
    file: &Path,
    extractor: &str,
    checker: &str,
) -> anyhow::Result<i64> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| anyhow::anyhow!("{} is not under {}", file.display(), root.display()))?
        .to_string_lossy()
        .replace('\\', "/");
    let extraction = smtbank_core::extract::run_extractor(extractor, file)?;
    let lenient = smtbank_core::extract::run_checker(checker, file, false)?;
    let strict = smtbank_core::extract::run_checker(checker, file, true)?;
    smtbank_core::catalog::add_benchmark(store, registry, &relative, &extraction, lenient, strict)
}

fn cmd_ingest(args: IngestArgs) -> anyhow::Result<i32> {
    let cfg = smtbank_core::config::load_config(&args.config).map_err(anyhow::Error::new)?;
    let store = Store::open(&cfg.database)?;
    let registry = SolverRegistry::new();

    for source in &cfg.evaluations {
        info!(evaluation = %source.name, path = %source.path.display(), "ingesting");
        let records = readers::read_records(source.format, &source.path)?;
        smtbank_ingest::driver::ingest_evaluation(
            &store,
            &registry,
            &source.name,
            source.date,
            source.link.as_deref(),
            &records,
        )?;
    }
    Ok(exit_codes::OK)
}

fn cmd_postprocess(args: PostprocessArgs) -> anyhow::Result<i32> {
    let store = Store::open(&args.db)?;
    let summary = smtbank_core::infer::infer_statuses(&store)?;
    eprintln!(
        "inferred {} statuses ({} contradictions)",
        summary.inferred(),
        summary.contradictions.len()
    );
    let rated = smtbank_core::rating::compute_all_ratings(&store)?;
    eprintln!("computed {rated} ratings");
    smtbank_core::catalog::derive_family_stats(&store)?;
    eprintln!("family statistics updated");
    Ok(exit_codes::OK)
}

fn collect_benchmarks(root: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(root)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", root.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_benchmarks(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "smt2") {
            out.push(path);
        }
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
