//! Data models for the report plugins.
//!
//! This module contains the flat records exchanged with the host
//! (log entries, requests, report metadata) and the intermediate
//! aggregation rows used to build charts and tables.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Kind of a log record as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogType {
    /// Platform lifecycle messages.
    System,
    /// Regular informational messages.
    Info,
    /// Client request/connection logs.
    Request,
    /// Stop-out events.
    StopOut,
    /// Any type the reports do not break out separately.
    Other(String),
}

impl LogType {
    /// Returns the host string for this type.
    pub fn as_str(&self) -> &str {
        match self {
            LogType::System => "SYSTEM",
            LogType::Info => "INFO",
            LogType::Request => "REQUEST",
            LogType::StopOut => "STOP_OUT",
            LogType::Other(s) => s,
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for LogType {
    fn from(s: &str) -> Self {
        match s {
            "SYSTEM" => LogType::System,
            "INFO" => LogType::Info,
            "REQUEST" => LogType::Request,
            "STOP_OUT" => LogType::StopOut,
            other => LogType::Other(other.to_string()),
        }
    }
}

/// A single log record returned by the host.
///
/// Fields are kept exactly as the host produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerLog {
    /// Timestamp string, usually `YYYY-MM-DD HH:MM:SS`.
    pub time: String,
    /// Log type string (`SYSTEM`, `INFO`, ...).
    #[serde(rename = "type")]
    pub log_type: String,
    /// Source IP address, may be empty.
    #[serde(default)]
    pub ip: String,
    /// Free-form message.
    #[serde(default)]
    pub message: String,
}

impl ServerLog {
    /// Parsed type of this record.
    pub fn kind(&self) -> LogType {
        LogType::from(self.log_type.as_str())
    }
}

/// Per-day log counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCountPoint {
    pub date: String,
    pub system: u64,
    pub info: u64,
    pub request: u64,
    pub stop_out: u64,
    pub total: u64,
}

impl LogCountPoint {
    /// Creates an empty point for the given day.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Counts one record of the given type.
    pub fn record(&mut self, kind: &LogType) {
        match kind {
            LogType::System => self.system += 1,
            LogType::Info => self.info += 1,
            LogType::Request => self.request += 1,
            LogType::StopOut => self.stop_out += 1,
            LogType::Other(_) => {}
        }
        self.total += 1;
    }
}

/// One row of a top-N breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlooderShare {
    /// Source IP, or `Other` for the rollup row.
    pub ip: String,
    /// Number of records attributed to this row.
    pub count: u64,
    /// Share of the grand total, in percent.
    pub percent: f64,
}

/// Parameters of a report request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Start of the range, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// End of the range, epoch seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
    /// Group filter as typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ReportRequest {
    /// Reads a request from the host JSON.
    ///
    /// Fields with the wrong JSON type are ignored rather than rejected.
    pub fn from_json(value: &Value) -> Self {
        let number = |key: &str| {
            value.get(key).and_then(|v| {
                v.as_i64()
                    .or_else(|| v.as_f64().map(|f| f.trunc() as i64))
            })
        };

        Self {
            from: number("from"),
            to: number("to"),
            group: value
                .get("group")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Report category code understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Reports over a whole day for a group of accounts.
    DailyGroup,
    /// Reports over an arbitrary time range.
    Range,
}

impl ReportType {
    /// Numeric code sent to the host.
    pub fn code(self) -> u8 {
        match self {
            ReportType::DailyGroup => 1,
            ReportType::Range => 2,
        }
    }
}

impl Serialize for ReportType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Metadata answered to the host's "about" query.
#[derive(Debug, Clone, Serialize)]
pub struct ReportInfo {
    pub version: u32,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_log_type_from_str() {
        assert_eq!(LogType::from("SYSTEM"), LogType::System);
        assert_eq!(LogType::from("INFO"), LogType::Info);
        assert_eq!(LogType::from("REQUEST"), LogType::Request);
        assert_eq!(LogType::from("STOP_OUT"), LogType::StopOut);
        assert_eq!(LogType::from("info"), LogType::Other("info".to_string()));
        assert_eq!(LogType::from("ERROR").as_str(), "ERROR");
    }

    #[test]
    fn test_count_point_record() {
        let mut point = LogCountPoint::new("2024-03-01");
        point.record(&LogType::System);
        point.record(&LogType::StopOut);
        point.record(&LogType::Other("ERROR".to_string()));

        assert_eq!(point.system, 1);
        assert_eq!(point.stop_out, 1);
        assert_eq!(point.info, 0);
        assert_eq!(point.total, 3);
    }

    #[test]
    fn test_server_log_host_field_names() {
        let log: ServerLog = serde_json::from_value(json!({
            "time": "2024-03-01 10:00:00",
            "type": "INFO",
            "ip": "10.0.0.1",
            "message": "hello"
        }))
        .unwrap();

        assert_eq!(log.kind(), LogType::Info);
        assert_eq!(serde_json::to_value(&log).unwrap()["type"], "INFO");

        let bare: ServerLog =
            serde_json::from_value(json!({"time": "2024-03-01", "type": "SYSTEM"})).unwrap();
        assert!(bare.ip.is_empty());
    }

    #[test]
    fn test_request_from_json() {
        let request = ReportRequest::from_json(&json!({
            "from": 1_700_000_000,
            "to": 1_700_086_400.0,
            "group": "demo\\*"
        }));
        assert_eq!(request.from, Some(1_700_000_000));
        assert_eq!(request.to, Some(1_700_086_400));
        assert_eq!(request.group.as_deref(), Some("demo\\*"));
    }

    #[test]
    fn test_request_ignores_wrong_types() {
        let request = ReportRequest::from_json(&json!({
            "from": "yesterday",
            "group": 7
        }));
        assert_eq!(request, ReportRequest::default());
    }

    #[test]
    fn test_report_info_serialization() {
        let info = ReportInfo {
            version: 1,
            name: "Test".to_string(),
            description: "Desc".to_string(),
            report_type: ReportType::DailyGroup,
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["type"], 1);
        assert_eq!(value["version"], 1);
        assert_eq!(value["name"], "Test");
    }
}
