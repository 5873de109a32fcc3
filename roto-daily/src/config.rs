// Configuration loading and parsing (roto.toml).

use chrono::Weekday;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE: &str = "roto.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// roto.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the whole roto.toml file.
#[derive(Debug, Clone, Deserialize)]
struct RotoFile {
    league: LeagueSection,
    paths: PathsConfig,
    teams: TeamsConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    name: String,
    period_start_weekday: String,
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub name: String,
    /// Scoring periods begin on this weekday; roster snapshots are keyed by it.
    pub period_start: Weekday,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Persisted day stats, league snapshots and free-agent files.
    pub data_dir: String,
    /// Raw box-score dumps from the retrieval step, one directory per date.
    pub raw_dir: String,
    pub report_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsConfig {
    /// JSON list of tracked team abbreviations, relative to `data_dir`.
    pub abbreviations_file: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub paths: PathsConfig,
    pub teams: TeamsConfig,
}

impl Config {
    pub fn data_dir(&self) -> &Path {
        Path::new(&self.paths.data_dir)
    }

    pub fn raw_dir(&self) -> &Path {
        Path::new(&self.paths.raw_dir)
    }

    pub fn report_dir(&self) -> &Path {
        Path::new(&self.paths.report_dir)
    }

    pub fn abbreviations_path(&self) -> PathBuf {
        self.data_dir().join(&self.teams.abbreviations_file)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/roto.toml` relative to `base_dir`.
///
/// Does not copy the default file; `load_config()` does that first.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let file: RotoFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let period_start = file
        .league
        .period_start_weekday
        .parse::<Weekday>()
        .map_err(|_| ConfigError::ValidationError {
            field: "league.period_start_weekday".into(),
            message: format!(
                "`{}` is not a weekday",
                file.league.period_start_weekday
            ),
        })?;

    let config = Config {
        league: LeagueConfig {
            name: file.league.name,
            period_start,
        },
        paths: file.paths,
        teams: file.teams,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/roto.toml` into `config/` unless a config file is
/// already there. Returns whether a copy was made.
pub fn ensure_config_file(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(false);
    }

    let default = base_dir.join("defaults").join(CONFIG_FILE);
    if !default.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither {} nor {} found; run from the crate root",
                default.display(),
                target.display()
            ),
        });
    }

    let copy = || -> std::io::Result<()> {
        std::fs::create_dir_all(base_dir.join("config"))?;
        std::fs::copy(&default, &target)?;
        Ok(())
    };
    copy().map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {}: {e}", default.display()),
    })?;
    Ok(true)
}

/// Load config relative to the current working directory, copying the
/// default file into `config/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let required: &[(&str, &str)] = &[
        ("paths.data_dir", config.paths.data_dir.as_str()),
        ("paths.raw_dir", config.paths.raw_dir.as_str()),
        ("paths.report_dir", config.paths.report_dir.as_str()),
        ("teams.abbreviations_file", config.teams.abbreviations_file.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
