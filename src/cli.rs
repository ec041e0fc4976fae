//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::report::ReportKind;
use clap::Parser;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// LogReports - run the log report plugins against local log files
///
/// Plays the host platform's role: loads log records from JSON files,
/// builds the report request, invokes a report and prints the UI JSON.
///
/// Examples:
///   logreports --logs ./logs --from 1709251200 --to 1709337599
///   logreports --report top-flooders --logs logs.jsonl --request req.json
///   logreports --report daily-logs --about
///   logreports --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Report to run
    ///
    /// Defaults to the config file's default_report, then daily-logs.
    #[arg(short, long, value_name = "REPORT")]
    pub report: Option<ReportKind>,

    /// Print the report metadata instead of creating it
    #[arg(long)]
    pub about: bool,

    /// Log file or directory of .json/.jsonl log files
    #[arg(short, long, value_name = "PATH", env = "LOGREPORTS_LOGS")]
    pub logs: Option<PathBuf>,

    /// JSON request file ("-" reads standard input)
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Range start in epoch seconds (overrides the request file)
    #[arg(long, value_name = "EPOCH", allow_hyphen_values = true)]
    pub from: Option<i64>,

    /// Range end in epoch seconds (overrides the request file)
    #[arg(long, value_name = "EPOCH", allow_hyphen_values = true)]
    pub to: Option<i64>,

    /// Group filter (overrides the request file)
    #[arg(short, long, value_name = "MASK")]
    pub group: Option<String>,

    /// Output file for the response JSON (standard output if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pretty-print the response JSON
    #[arg(long)]
    pub pretty: bool,

    /// Days of history the daily report looks back
    #[arg(long, value_name = "DAYS")]
    pub lookback_days: Option<i64>,

    /// Number of source IPs listed before folding into "Other"
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Modal size keyword sent to the client
    #[arg(long, value_name = "SIZE")]
    pub modal_size: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .logreports.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .logreports.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err("--from must not be after --to".to_string());
            }
        }

        if let Some(top) = self.top {
            if top == 0 {
                return Err("Top count must be at least 1".to_string());
            }
        }

        if let Some(days) = self.lookback_days {
            if days < 0 {
                return Err("Lookback days cannot be negative".to_string());
            }
        }

        if let Some(ref size) = self.modal_size {
            if size.trim().is_empty() {
                return Err("Modal size cannot be empty".to_string());
            }
        }

        // Validate request file if provided
        if let Some(ref request) = self.request {
            if request.as_os_str() != "-" && !request.is_file() {
                return Err(format!("Request file does not exist: {}", request.display()));
            }
        }

        // Metadata queries never touch the logs
        if self.about {
            return Ok(());
        }

        if let Some(ref logs) = self.logs {
            if !logs.exists() {
                return Err(format!("Log path does not exist: {}", logs.display()));
            }
        }

        Ok(())
    }

    /// Apply --from/--to/--group on top of a request object.
    pub fn apply_overrides(&self, request: &mut Map<String, Value>) {
        if let Some(from) = self.from {
            request.insert("from".to_string(), Value::from(from));
        }
        if let Some(to) = self.to {
            request.insert("to".to_string(), Value::from(to));
        }
        if let Some(ref group) = self.group {
            request.insert("group".to_string(), Value::from(group.clone()));
        }
    }
}
