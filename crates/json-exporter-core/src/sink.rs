//! Destination of scraped observations.

use std::collections::BTreeMap;

/// Resolved label set. Ordered so series keys are deterministic.
pub type Labels = BTreeMap<String, String>;

/// Labeled gauge storage written by scrapers.
///
/// Implementations must make each `set` an independent, atomic per-series
/// update: scrapes running concurrently share one sink and never coordinate.
pub trait MetricSink: Send + Sync {
    fn set(&self, name: &str, labels: &Labels, value: f64);
}

/// Series name emitted for one named value of an object metric.
pub fn composite_name(metric: &str, value: &str) -> String {
    format!("{metric}_{value}")
}
