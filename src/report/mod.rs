//! Report plugins and their entry points.

pub mod daily_logs;
pub mod generator;
pub mod plugin;
pub mod top_flooders;

pub use daily_logs::DailyLogsReport;
pub use generator::*;
pub use plugin::{ReportContext, ReportPlugin, ReportSettings};
pub use top_flooders::TopFloodersReport;

use crate::error::ReportError;
use std::fmt;
use std::str::FromStr;

/// Reports shipped in this family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportKind {
    /// Journal activity per day (default)
    #[default]
    DailyLogs,
    /// Busiest source IPs over a range
    TopFlooders,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::DailyLogs => "daily-logs",
            ReportKind::TopFlooders => "top-flooders",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "daily-logs" | "daily" => Ok(ReportKind::DailyLogs),
            "top-flooders" | "flooders" => Ok(ReportKind::TopFlooders),
            _ => Err(ReportError::UnknownReport(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_from_str() {
        assert_eq!("daily-logs".parse::<ReportKind>().unwrap(), ReportKind::DailyLogs);
        assert_eq!("DAILY_LOGS".parse::<ReportKind>().unwrap(), ReportKind::DailyLogs);
        assert_eq!("flooders".parse::<ReportKind>().unwrap(), ReportKind::TopFlooders);
        assert!("weekly".parse::<ReportKind>().is_err());
        assert_eq!(ReportKind::TopFlooders.to_string(), "top-flooders");
    }
}
