use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use crate::error::Result;
use crate::models::{FilterParams, MonthSelection};

/// Dataset used when neither the command line nor the last run names one.
pub const DEFAULT_DATA_FILE: &str = "Frete Retorno.xlsx";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Return-freight timing dashboard
#[derive(Parser, Debug, Clone)]
#[command(
    name = "frete-retorno",
    about = "Return-freight timing dashboard: lags, dwell bands and volume trends",
    version
)]
pub struct Settings {
    /// Input table (.csv, .xlsx, .xlsm, .xls or .ods)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Demand year to analyse (defaults to the most recent year in the data)
    #[arg(long)]
    pub year: Option<i32>,

    /// Demand month: 'all' or 1-12
    #[arg(long, default_value = "all")]
    pub month: MonthSelection,

    /// Keep only this client (repeatable)
    #[arg(long = "client")]
    pub clients: Vec<String>,

    /// Keep only this region (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// Output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Print the available years, months, clients and regions, then exit
    #[arg(long)]
    pub list_options: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.frete-retorno/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.frete-retorno/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".frete-retorno").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and fill in defaults.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return Self::resolve_defaults(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins. Year, clients and regions are never restored: they
        // only make sense for the dataset they were chosen against.
        if settings.file.is_none() {
            settings.file = last.file;
        }
        if !is_arg_explicitly_set(&matches, "month") {
            if let Some(v) = last.month {
                settings.month = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "format") {
            if let Some(v) = last.format {
                settings.format = v;
            }
        }

        Self::resolve_defaults(settings)
    }

    /// Remember `file`, `month` and `format` for the next run.
    ///
    /// Called once the dataset has loaded, so a mistyped `--file` is never
    /// remembered. Does nothing after `--clear`.
    pub fn save_last_used(&self) -> Result<()> {
        self.save_last_used_to(&LastUsedParams::config_path())
    }

    /// [`Settings::save_last_used`] with an explicit config path.
    pub fn save_last_used_to(&self, config_path: &std::path::Path) -> Result<()> {
        if self.clear {
            return Ok(());
        }
        LastUsedParams::from(self).save_to(config_path)
    }

    /// Fill in the default data file and apply the `--debug` flag.
    fn resolve_defaults(mut settings: Settings) -> Settings {
        if settings.file.is_none() {
            settings.file = Some(PathBuf::from(DEFAULT_DATA_FILE));
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Filter parameters for `year`, taking month, clients and regions from
    /// the command line.
    pub fn filter_params(&self, year: i32) -> FilterParams {
        FilterParams {
            year,
            month: self.month,
            clients: self.clients.clone(),
            regions: self.regions.clone(),
        }
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            file: s.file.clone(),
            month: Some(s.month),
            format: Some(s.format.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
