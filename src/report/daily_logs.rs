//! Daily Logs report: platform journal activity per day.

use crate::analysis::{daily_chart_data, daily_log_counts, lookback_start, totals_by_type};
use crate::host::LogQuery;
use crate::models::{LogCountPoint, ReportInfo, ReportType, ServerLog};
use crate::report::plugin::{ReportContext, ReportPlugin};
use crate::report::top_flooders::flooders_section;
use crate::ui::{chart, div, h1, h2, p, simple_table, text, ChartKind, Node, Series};

const DAILY_SERIES: &[(&str, &str)] = &[
    ("system", "System"),
    ("info", "Info"),
    ("request", "Request"),
    ("stop_out", "Stop out"),
];

fn count_row(point: &LogCountPoint) -> Vec<String> {
    vec![
        point.date.clone(),
        point.system.to_string(),
        point.info.to_string(),
        point.request.to_string(),
        point.stop_out.to_string(),
        point.total.to_string(),
    ]
}

/// Report counting journal records per day and type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyLogsReport;

impl DailyLogsReport {
    fn window_start(&self, ctx: &ReportContext<'_>) -> i64 {
        lookback_start(ctx.from, ctx.settings.lookback_days.max(0))
    }
}

impl ReportPlugin for DailyLogsReport {
    fn info(&self) -> ReportInfo {
        ReportInfo {
            version: 1,
            name: "Daily Logs report".to_string(),
            description: "Shows platform operation statistics for a specified day, including \
                the number of regular and error messages in the journal, critical errors, \
                and connection logs."
                .to_string(),
            report_type: ReportType::DailyGroup,
        }
    }

    fn tag(&self) -> &'static str {
        "DailyLogsReportInterface"
    }

    fn query(&self, ctx: &ReportContext<'_>) -> LogQuery {
        LogQuery::range(self.window_start(ctx), ctx.to)
    }

    fn build(&self, ctx: &ReportContext<'_>, logs: &[ServerLog]) -> Node {
        let mut children = vec![
            h1(vec![text("Daily Logs Report")]),
            p(vec![text(ctx.period_label(self.window_start(ctx)))]),
        ];

        let points = daily_log_counts(logs);
        if points.is_empty() {
            children.push(p(vec![text("No logs found for this period.")]));
            return div(children);
        }

        let series: Vec<Series> = DAILY_SERIES
            .iter()
            .map(|(key, label)| Series::new(key, label))
            .collect();

        children.push(h2(vec![text("Logs by day")]));
        children.push(
            chart(ChartKind::Bar, "day", &series, daily_chart_data(&points))
                .with_prop("stacked", true),
        );

        let mut rows: Vec<Vec<String>> = points.iter().map(count_row).collect();
        rows.push(count_row(&totals_by_type(&points)));

        children.push(h2(vec![text("Daily breakdown")]));
        children.push(simple_table(
            &["Day", "System", "Info", "Request", "Stop out", "Total"],
            rows,
        ));

        children.extend(flooders_section(logs, ctx.settings.top_n));
        div(children)
    }
}
