//! Host platform seam.
//!
//! Reports never store or fetch logs themselves; they ask the host through
//! [`ServerInterface`]. The harness ships a file-backed host and an
//! in-memory one.

pub mod file_source;

pub use file_source::FileLogSource;

use crate::analysis::parse_log_time;
use crate::error::HostError;
use crate::models::{LogType, ServerLog};

/// Log retrieval parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Inclusive start, epoch seconds.
    pub from: i64,
    /// Inclusive end, epoch seconds.
    pub to: i64,
    /// Only records of this type.
    pub log_type: Option<LogType>,
    /// Only records whose message contains this text.
    pub filter: Option<String>,
}

impl LogQuery {
    /// Query over a time range with no other filter.
    pub fn range(from: i64, to: i64) -> Self {
        Self {
            from,
            to,
            log_type: None,
            filter: None,
        }
    }

    /// Whether `log` satisfies every condition of this query.
    ///
    /// Records whose time cannot be parsed never match.
    pub fn matches(&self, log: &ServerLog) -> bool {
        let in_range = parse_log_time(&log.time)
            .map(|t| t >= self.from && t <= self.to)
            .unwrap_or(false);
        if !in_range {
            return false;
        }

        if let Some(ref log_type) = self.log_type {
            if log.kind() != *log_type {
                return false;
            }
        }

        match self.filter.as_deref() {
            Some(needle) if !needle.is_empty() => log.message.contains(needle),
            _ => true,
        }
    }
}

/// Operations the host exposes to report plugins.
pub trait ServerInterface {
    /// Append the logs matching `query` to `out`, in host order.
    ///
    /// On failure, records appended before the error stay in `out`.
    fn get_logs(&self, query: &LogQuery, out: &mut Vec<ServerLog>) -> Result<(), HostError>;
}

/// Host backed by a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSource {
    logs: Vec<ServerLog>,
}

impl MemoryLogSource {
    pub fn new(logs: Vec<ServerLog>) -> Self {
        Self { logs }
    }
}

impl ServerInterface for MemoryLogSource {
    fn get_logs(&self, query: &LogQuery, out: &mut Vec<ServerLog>) -> Result<(), HostError> {
        if query.from > query.to {
            return Err(HostError::InvalidQuery(format!(
                "range start {} is after end {}",
                query.from, query.to
            )));
        }

        out.extend(self.logs.iter().filter(|log| query.matches(log)).cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(time: &str, log_type: &str, message: &str) -> ServerLog {
        ServerLog {
            time: time.to_string(),
            log_type: log_type.to_string(),
            ip: String::new(),
            message: message.to_string(),
        }
    }

    // 2024-03-01 00:00:00 UTC
    const DAY: i64 = 1_709_251_200;

    #[test]
    fn test_query_range_is_inclusive() {
        let query = LogQuery::range(DAY, DAY + 3_600);

        assert!(query.matches(&log("2024-03-01 00:00:00", "INFO", "")));
        assert!(query.matches(&log("2024-03-01 01:00:00", "INFO", "")));
        assert!(!query.matches(&log("2024-03-01 01:00:01", "INFO", "")));
        assert!(!query.matches(&log("not a time", "INFO", "")));
    }

    #[test]
    fn test_query_type_and_text_filters() {
        let mut query = LogQuery::range(DAY, DAY + 86_400);
        query.log_type = Some(LogType::Request);
        query.filter = Some("login".to_string());

        assert!(query.matches(&log("2024-03-01 10:00:00", "REQUEST", "login ok")));
        assert!(!query.matches(&log("2024-03-01 10:00:00", "INFO", "login ok")));
        assert!(!query.matches(&log("2024-03-01 10:00:00", "REQUEST", "logout")));

        query.filter = Some(String::new());
        assert!(query.matches(&log("2024-03-01 10:00:00", "REQUEST", "logout")));
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryLogSource::new(vec![
            log("2024-02-29 23:59:59", "INFO", ""),
            log("2024-03-01 10:00:00", "INFO", ""),
        ]);

        let mut out = Vec::new();
        source
            .get_logs(&LogQuery::range(DAY, DAY + 86_400), &mut out)
            .unwrap();
        assert_eq!(out.len(), 1);

        let err = source.get_logs(&LogQuery::range(DAY, DAY - 1), &mut out);
        assert!(matches!(err, Err(HostError::InvalidQuery(_))));
    }
}
