//! Top Flooders report: which source IPs produce the most logs.

use crate::analysis::{flooders_chart_data, format_percent, top_flooders};
use crate::host::LogQuery;
use crate::models::{FlooderShare, ReportInfo, ReportType, ServerLog};
use crate::report::plugin::{ReportContext, ReportPlugin};
use crate::ui::{chart, div, h1, h2, p, simple_table, text, ChartKind, Node, Series};

/// Table rows for a top-N breakdown.
fn share_rows(shares: &[FlooderShare]) -> Vec<Vec<String>> {
    shares
        .iter()
        .map(|s| {
            vec![
                s.ip.clone(),
                s.count.to_string(),
                format_percent(s.percent),
            ]
        })
        .collect()
}

/// Heading, pie chart and table for the busiest source IPs.
///
/// Shared with the daily report.
pub fn flooders_section(logs: &[ServerLog], top_n: usize) -> Vec<Node> {
    let shares = top_flooders(logs, top_n);

    let mut nodes = vec![h2(vec![text(format!("Top {} source IPs", top_n))])];

    if shares.is_empty() {
        nodes.push(p(vec![text("No logs with a source IP in this period.")]));
        return nodes;
    }

    nodes.push(chart(
        ChartKind::Pie,
        "name",
        &[Series::new("value", "Logs")],
        flooders_chart_data(&shares),
    ));
    nodes.push(simple_table(&["IP", "Logs", "Share, %"], share_rows(&shares)));
    nodes
}

/// Report ranking source IPs by log volume over the requested range.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopFloodersReport;

impl ReportPlugin for TopFloodersReport {
    fn info(&self) -> ReportInfo {
        ReportInfo {
            version: 1,
            name: "Top Flooders report".to_string(),
            description: "Shows the source IP addresses that produced the most journal \
                records over the selected period, with their share of the total."
                .to_string(),
            report_type: ReportType::Range,
        }
    }

    fn tag(&self) -> &'static str {
        "TopFloodersReportInterface"
    }

    fn query(&self, ctx: &ReportContext<'_>) -> LogQuery {
        LogQuery::range(ctx.from, ctx.to)
    }

    fn build(&self, ctx: &ReportContext<'_>, logs: &[ServerLog]) -> Node {
        let mut children = vec![
            h1(vec![text("Top Flooders Report")]),
            p(vec![text(ctx.period_label(ctx.from))]),
        ];
        children.extend(flooders_section(logs, ctx.settings.top_n));
        div(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;
    use crate::host::{MemoryLogSource, ServerInterface};
    use crate::models::ReportRequest;
    use crate::report::plugin::ReportSettings;

    // 2024-03-01 00:00:00 UTC
    const DAY: i64 = 1_709_251_200;

    fn request_log(ip: &str) -> ServerLog {
        ServerLog {
            time: "2024-03-01 10:00:00".to_string(),
            log_type: "REQUEST".to_string(),
            ip: ip.to_string(),
            message: "connect".to_string(),
        }
    }

    fn request() -> ReportRequest {
        ReportRequest {
            from: Some(DAY),
            to: Some(DAY + 86_399),
            group: None,
        }
    }

    #[test]
    fn test_table_and_chart_present() {
        let logs: Vec<ServerLog> = ["10.0.0.1", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
            .iter()
            .map(|ip| request_log(ip))
            .collect();
        let host = MemoryLogSource::new(logs);
        let settings = ReportSettings {
            top_n: 2,
            ..ReportSettings::default()
        };

        let response = TopFloodersReport.create(&request(), &host, &settings, DAY);
        let body = &response["ui"]["modal"]["content"][0];
        let node: Node = serde_json::from_value(body.clone()).unwrap();

        let pie = node.find("Chart").unwrap();
        assert_eq!(pie.props["chartType"], "pie");
        assert_eq!(pie.props["data"].as_array().map(Vec::len), Some(3));

        let table = node.find("table").unwrap().text_content();
        assert!(table.contains("10.0.0.1250.00"));
        assert!(table.contains("Other125.00"));
    }

    #[test]
    fn test_empty_period() {
        let host = MemoryLogSource::default();
        let response =
            TopFloodersReport.create(&request(), &host, &ReportSettings::default(), DAY);
        let node: Node =
            serde_json::from_value(response["ui"]["modal"]["content"][0].clone()).unwrap();

        assert!(node.find("Chart").is_none());
        assert!(node.text_content().contains("No logs with a source IP"));
    }

    struct FailingHost;

    impl ServerInterface for FailingHost {
        fn get_logs(&self, _: &LogQuery, out: &mut Vec<ServerLog>) -> Result<(), HostError> {
            out.push(request_log("10.0.0.9"));
            Err(HostError::InvalidQuery("boom".to_string()))
        }
    }

    #[test]
    fn test_host_failure_keeps_partial_data() {
        let response =
            TopFloodersReport.create(&request(), &FailingHost, &ReportSettings::default(), DAY);
        let node: Node =
            serde_json::from_value(response["ui"]["modal"]["content"][0].clone()).unwrap();

        assert!(node.text_content().contains("10.0.0.9"));
    }
}
