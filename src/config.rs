//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.logreports.toml` files.

use crate::report::{ReportKind, ReportSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".logreports.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Log source settings.
    #[serde(default)]
    pub host: HostConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Pretty-print response JSON.
    #[serde(default)]
    pub pretty: bool,
}

/// Where the harness host reads logs from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Log file or directory.
    #[serde(default)]
    pub logs_path: Option<PathBuf>,

    /// Show a progress bar while loading log directories.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            logs_path: None,
            show_progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Report tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report run when --report is not given.
    #[serde(default = "default_report")]
    pub default_report: String,

    /// Days of history the daily report looks back.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Rows kept in top-N breakdowns.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Client modal size keyword.
    #[serde(default = "default_modal_size")]
    pub modal_size: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_report: default_report(),
            lookback_days: default_lookback_days(),
            top_n: default_top_n(),
            modal_size: default_modal_size(),
        }
    }
}

fn default_report() -> String {
    ReportKind::DailyLogs.as_str().to_string()
}

fn default_lookback_days() -> i64 {
    14
}

fn default_top_n() -> usize {
    5
}

fn default_modal_size() -> String {
    crate::ui::DEFAULT_MODAL_SIZE.to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(report) = args.report {
            self.report.default_report = report.as_str().to_string();
        }
        if let Some(days) = args.lookback_days {
            self.report.lookback_days = days;
        }
        if let Some(top) = args.top {
            self.report.top_n = top;
        }
        if let Some(ref size) = args.modal_size {
            self.report.modal_size = size.clone();
        }

        if let Some(ref logs) = args.logs {
            self.host.logs_path = Some(logs.clone());
        }
        if args.quiet {
            self.host.show_progress = false;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.pretty {
            self.general.pretty = true;
        }
    }

    /// The report to run, falling back to the daily report on unknown names.
    pub fn report_kind(&self) -> ReportKind {
        match self.report.default_report.parse() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("{}, using {}", e, ReportKind::default());
                ReportKind::default()
            }
        }
    }

    /// Settings handed to the report plugins.
    ///
    /// Negative lookbacks are treated as zero.
    pub fn settings(&self) -> ReportSettings {
        if self.report.lookback_days < 0 {
            warn!(
                "lookback_days = {} is negative, using 0",
                self.report.lookback_days
            );
        }

        ReportSettings {
            lookback_days: self.report.lookback_days.max(0),
            top_n: self.report.top_n.max(1),
            modal_size: self.report.modal_size.clone(),
        }
    }

    /// Log level: `quiet` wins, then `general.verbose` (set by --verbose too).
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
