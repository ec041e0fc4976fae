//! File-backed log source.
//!
//! Reads host log records from a JSON array file (`.json`), a JSON-lines
//! file (`.jsonl`), or every such file below a directory.

use crate::error::HostError;
use crate::host::{LogQuery, ServerInterface};
use crate::models::ServerLog;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions recognised as log files.
const LOG_EXTENSIONS: &[&str] = &["json", "jsonl"];

/// Host implementation reading logs from disk on every query.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    root: PathBuf,
    show_progress: bool,
}

impl FileLogSource {
    /// Create a source for a file or directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let root = path.into();
        if !root.exists() {
            return Err(HostError::NotFound(root));
        }
        Ok(Self {
            root,
            show_progress: false,
        })
    }

    /// Show a progress bar while reading many files.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Log files this source reads, in path order.
    pub fn files(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_log_file(p))
            .collect()
    }

    fn progress_bar(&self, len: usize) -> Option<ProgressBar> {
        if !self.show_progress || len < 2 {
            return None;
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| LOG_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Parse the records of one file.
pub fn read_log_file(path: &Path) -> Result<Vec<ServerLog>, HostError> {
    let content = fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_lines = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false);

    if !is_lines {
        return serde_json::from_str(&content).map_err(|source| HostError::Parse {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        });
    }

    let mut logs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let log = serde_json::from_str(line).map_err(|source| HostError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        logs.push(log);
    }

    Ok(logs)
}

impl ServerInterface for FileLogSource {
    fn get_logs(&self, query: &LogQuery, out: &mut Vec<ServerLog>) -> Result<(), HostError> {
        if query.from > query.to {
            return Err(HostError::InvalidQuery(format!(
                "range start {} is after end {}",
                query.from, query.to
            )));
        }

        let files = self.files();
        debug!("Reading {} log file(s) under {}", files.len(), self.root.display());

        let progress = self.progress_bar(files.len());
        let before = out.len();

        for path in &files {
            if let Some(ref pb) = progress {
                pb.set_message(path.display().to_string());
            }

            let records = match read_log_file(path) {
                Ok(records) => records,
                Err(e) => {
                    if let Some(ref pb) = progress {
                        pb.abandon();
                    }
                    return Err(e);
                }
            };
            out.extend(records.into_iter().filter(|log| query.matches(log)));

            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        info!(
            "Loaded {} matching log(s) from {}",
            out.len() - before,
            self.root.display()
        );
        Ok(())
    }
}
