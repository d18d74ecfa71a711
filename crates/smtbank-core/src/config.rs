use crate::errors::ConfigError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Raw-record layouts the ingestion driver knows how to read. One per era
/// of the competition's publishing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// 2005-2006 HTML scoreboard exports, one file per logic division.
    Scoreboard,
    /// 2007-2013 SMT-Exec job exports with expected-status columns.
    SmtExec,
    /// 2014 StarExec CSV with positional columns.
    CsvPositional,
    /// 2015-2023 StarExec CSV with named columns.
    CsvNamed,
    /// 2018 gzipped JSON dump covering several tracks.
    Json,
    /// 2024 incremental-track logs, one `---`-delimited block per job.
    IncrementalLog,
}

/// One evaluation to ingest: where its raw records live and how to read
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSource {
    pub name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub link: Option<String>,
    pub format: SourceFormat,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub version: u32,
    pub database: PathBuf,
    #[serde(default)]
    pub evaluations: Vec<EvaluationSource>,
}

pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError(format!("failed to read config {}: {}", path.display(), e)))?;

    let cfg: PipelineConfig = serde_yaml::from_str(&raw)
        .map_err(|e| ConfigError(format!("failed to parse YAML: {}", e)))?;

    // Allow 0 for configs written before the field existed.
    if cfg.version != 0 && cfg.version != SUPPORTED_CONFIG_VERSION {
        return Err(ConfigError(format!(
            "unsupported config version {} (supported: 0, {})",
            cfg.version, SUPPORTED_CONFIG_VERSION
        )));
    }

    if cfg.evaluations.is_empty() {
        return Err(ConfigError("config lists no evaluations".into()));
    }

    Ok(normalize_paths(cfg, path))
}

/// Relative paths in the config are resolved against the config file's
/// directory, not the working directory.
fn normalize_paths(mut cfg: PipelineConfig, config_path: &Path) -> PipelineConfig {
    let base = config_path.parent().unwrap_or(Path::new("."));
    if cfg.database.is_relative() {
        cfg.database = base.join(&cfg.database);
    }
    for ev in &mut cfg.evaluations {
        if ev.path.is_relative() {
            ev.path = base.join(&ev.path);
        }
    }
    cfg
}

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(
        path,
        r#"version: 1
database: smtbank.sqlite
evaluations:
  - name: SMT-COMP 2014
    date: 2014-06-01
    link: https://smt-comp.github.io/2014/
    format: csv-positional
    path: raw/2014.csv
  - name: SMT-COMP 2024 incremental
    date: 2024-07-01
    format: incremental-log
    path: raw/2024-incremental.txt
"#,
    )
    .map_err(|e| ConfigError(format!("failed to write sample config: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smtbank.yaml");
        write_sample_config(&path).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.evaluations.len(), 2);
        assert_eq!(cfg.evaluations[0].format, SourceFormat::CsvPositional);
        assert_eq!(
            cfg.evaluations[0].date,
            NaiveDate::from_ymd_opt(2014, 6, 1)
        );
        // relative paths are anchored at the config directory
        assert!(cfg.database.starts_with(dir.path()));
        assert!(cfg.evaluations[1].path.starts_with(dir.path()));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smtbank.yaml");
        std::fs::write(
            &path,
            "version: 7\ndatabase: db.sqlite\nevaluations:\n  - name: x\n    format: json\n    path: x.json.gz\n",
        )
        .unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config version"));
    }

    #[test]
    fn empty_evaluation_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smtbank.yaml");
        std::fs::write(&path, "version: 1\ndatabase: db.sqlite\nevaluations: []\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
