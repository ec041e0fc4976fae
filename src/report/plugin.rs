//! Report plugin contract.

use crate::analysis::{format_timestamp, start_of_day};
use crate::host::{LogQuery, ServerInterface};
use crate::models::{ReportInfo, ReportRequest, ServerLog};
use crate::ui::{create_ui, ModalOptions, Node, DEFAULT_MODAL_SIZE};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

/// Tunables shared by all reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Days of history the daily report looks back before `from`.
    pub lookback_days: i64,
    /// Rows kept before folding into `Other`.
    pub top_n: usize,
    /// Client modal size keyword.
    pub modal_size: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            lookback_days: 14,
            top_n: 5,
            modal_size: DEFAULT_MODAL_SIZE.to_string(),
        }
    }
}

/// Resolved parameters of one report call.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Requested start, epoch seconds.
    pub from: i64,
    /// Requested end, epoch seconds.
    pub to: i64,
    /// Group filter from the request, if any.
    pub group: Option<&'a str>,
    pub settings: &'a ReportSettings,
}

impl<'a> ReportContext<'a> {
    /// Resolve a request against the current time.
    ///
    /// A missing `to` means now; a missing `from` means the start of the
    /// day containing `to`.
    pub fn resolve(request: &'a ReportRequest, settings: &'a ReportSettings, now: i64) -> Self {
        let to = request.to.unwrap_or(now);
        let from = request.from.unwrap_or_else(|| start_of_day(to));

        Self {
            from,
            to,
            group: request.group.as_deref().filter(|g| !g.is_empty()),
            settings,
        }
    }

    /// Human-readable period line, mentioning the group when present.
    pub fn period_label(&self, from: i64) -> String {
        let mut label = format!(
            "Period: {} - {} (UTC)",
            format_timestamp(from),
            format_timestamp(self.to)
        );
        if let Some(group) = self.group {
            label.push_str(&format!(", group: {}", group));
        }
        label
    }
}

/// A report the host can ask about and create.
pub trait ReportPlugin {
    /// Metadata for the host's "about" query.
    fn info(&self) -> ReportInfo;

    /// Prefix for diagnostics emitted by this report.
    fn tag(&self) -> &'static str;

    /// Host query for a resolved request.
    fn query(&self, ctx: &ReportContext<'_>) -> LogQuery;

    /// Build the report body from the logs the host returned.
    fn build(&self, ctx: &ReportContext<'_>, logs: &[ServerLog]) -> Node;

    /// Run the whole report: query the host, aggregate, wrap in the modal.
    ///
    /// Host failures are logged and the report is built from whatever the
    /// host returned before failing.
    fn create(
        &self,
        request: &ReportRequest,
        host: &dyn ServerInterface,
        settings: &ReportSettings,
        now: i64,
    ) -> Value {
        let start = Instant::now();
        let ctx = ReportContext::resolve(request, settings, now);
        let query = self.query(&ctx);
        debug!("[{}] query: {:?}", self.tag(), query);

        let mut logs = Vec::new();
        if let Err(e) = host.get_logs(&query, &mut logs) {
            error!("[{}]: {}", self.tag(), e);
        }
        info!("[{}] logs size: {}", self.tag(), logs.len());

        let body = self.build(&ctx, &logs);
        let options = ModalOptions::new(self.info().name).with_size(settings.modal_size.clone());
        let response = create_ui(&body, &options);

        debug!(
            "[{}] built in {:.1}ms",
            self.tag(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        response
    }
}
