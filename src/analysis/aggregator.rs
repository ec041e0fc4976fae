//! Log aggregation and statistics.
//!
//! Buckets logs by day and by source IP and converts the results into
//! chart rows.

use crate::analysis::time::{extract_date, is_valid_ip_address, truncate_double};
use crate::models::{FlooderShare, LogCountPoint, ServerLog};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

/// Label of the rollup row in top-N breakdowns.
pub const OTHER_LABEL: &str = "Other";

/// Count logs per day and type, sorted by date.
pub fn daily_log_counts(logs: &[ServerLog]) -> Vec<LogCountPoint> {
    let mut by_day: BTreeMap<String, LogCountPoint> = BTreeMap::new();

    for log in logs {
        let day = extract_date(&log.time);
        by_day
            .entry(day.to_string())
            .or_insert_with(|| LogCountPoint::new(day))
            .record(&log.kind());
    }

    // BTreeMap iterates in lexicographic key order
    by_day.into_values().collect()
}

/// Sum all days into a single row labelled `Total`.
pub fn totals_by_type(points: &[LogCountPoint]) -> LogCountPoint {
    points
        .iter()
        .fold(LogCountPoint::new("Total"), |mut acc, point| {
            acc.system += point.system;
            acc.info += point.info;
            acc.request += point.request;
            acc.stop_out += point.stop_out;
            acc.total += point.total;
            acc
        })
}

/// Convert daily counters into chart rows.
///
/// Counts are emitted as JSON doubles, which is what the client charts expect.
pub fn daily_chart_data(points: &[LogCountPoint]) -> Vec<Value> {
    points
        .iter()
        .map(|point| {
            json!({
                "day": point.date,
                "system": point.system as f64,
                "info": point.info as f64,
                "request": point.request as f64,
                "stop_out": point.stop_out as f64,
                "total": point.total as f64,
            })
        })
        .collect()
}

/// Count logs per source IP.
///
/// Records without a valid IP address are not attributed to anyone.
pub fn count_by_ip(logs: &[ServerLog]) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();

    for log in logs {
        let ip = log.ip.trim();
        if !is_valid_ip_address(ip) {
            continue;
        }
        *counts.entry(ip.to_string()).or_default() += 1;
    }

    counts
}

/// Get the `n` busiest source IPs, folding the rest into an `Other` row.
///
/// Ties are ordered by IP so the output is stable. Returns an empty list
/// when no record carries a valid IP.
pub fn top_flooders(logs: &[ServerLog], n: usize) -> Vec<FlooderShare> {
    let counts = count_by_ip(logs);
    let total: u64 = counts.values().sum();

    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let share = |count: u64| count as f64 / total as f64 * 100.0;

    let rest: u64 = ranked.iter().skip(n).map(|(_, count)| count).sum();
    ranked.truncate(n);

    let mut shares: Vec<FlooderShare> = ranked
        .into_iter()
        .map(|(ip, count)| FlooderShare {
            ip,
            count,
            percent: share(count),
        })
        .collect();

    if rest > 0 {
        shares.push(FlooderShare {
            ip: OTHER_LABEL.to_string(),
            count: rest,
            percent: share(rest),
        });
    }

    shares
}

/// Convert a top-N breakdown into pie chart rows.
pub fn flooders_chart_data(shares: &[FlooderShare]) -> Vec<Value> {
    shares
        .iter()
        .map(|share| {
            json!({
                "name": share.ip,
                "value": share.count as f64,
                "percent": truncate_double(share.percent, 2),
            })
        })
        .collect()
}
