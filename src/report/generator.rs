//! Report entry points.
//!
//! The host calls [`about_report`] to list a report and [`create_report`]
//! to render it. Both return the JSON the host hands to the client.

use crate::error::{ReportError, Result};
use crate::host::ServerInterface;
use crate::models::ReportRequest;
use crate::report::daily_logs::DailyLogsReport;
use crate::report::plugin::{ReportPlugin, ReportSettings};
use crate::report::top_flooders::TopFloodersReport;
use crate::report::ReportKind;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

/// Get the plugin implementing a report.
pub fn plugin_for(kind: ReportKind) -> Box<dyn ReportPlugin> {
    match kind {
        ReportKind::DailyLogs => Box::new(DailyLogsReport),
        ReportKind::TopFlooders => Box::new(TopFloodersReport),
    }
}

/// Metadata response for the host's "about" query.
pub fn about_report(kind: ReportKind) -> Result<Value> {
    serde_json::to_value(plugin_for(kind).info()).map_err(Into::into)
}

/// Render a report for a JSON request.
///
/// The request must be a JSON object; unknown or mistyped fields are ignored.
pub fn create_report(
    kind: ReportKind,
    request: &Value,
    host: &dyn ServerInterface,
    settings: &ReportSettings,
) -> Result<Value> {
    if !request.is_object() {
        return Err(ReportError::InvalidRequest(
            "request must be a JSON object".to_string(),
        ));
    }

    let request = ReportRequest::from_json(request);
    debug!("Creating {} for {:?}", kind, request);

    Ok(plugin_for(kind).create(&request, host, settings, Utc::now().timestamp()))
}

/// Parse request text as received from the host.
pub fn parse_request(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(text).map_err(Into::into)
}

/// Serialize a response for the host.
pub fn generate_json_response(response: &Value, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(response).map_err(Into::into)
    } else {
        serde_json::to_string(response).map_err(Into::into)
    }
}
