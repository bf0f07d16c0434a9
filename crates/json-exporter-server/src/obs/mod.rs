//! In-process metric storage and Prometheus text rendering.
//!
//! - `registry`: labeled gauges written by scrapers (the exported data).
//! - `metrics`: the exporter's own counters and histograms.

pub mod metrics;
pub mod registry;

pub use metrics::ExporterMetrics;
pub use registry::GaugeRegistry;

/// Escape a label value for the text exposition format.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape HELP text (quotes are left alone).
pub(crate) fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Render `k="v",...` from sorted pairs.
pub(crate) fn label_str(key: &[(String, String)]) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Sorted, owned series key.
pub(crate) fn series_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}
