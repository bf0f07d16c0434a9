use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use json_exporter_core::error::{JsonExporterError, Result};
use json_exporter_core::{MetricConfig, MetricKind};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

impl ExporterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(JsonExporterError::UnsupportedVersion);
        }
        if self.metrics.is_empty() {
            return Err(JsonExporterError::BadConfig("metrics must not be empty".into()));
        }

        self.exporter.validate()?;

        let mut series = HashSet::new();
        for m in &self.metrics {
            validate_metric(m)?;
            for name in m.series_names() {
                if !series.insert(name.clone()) {
                    return Err(JsonExporterError::BadConfig(format!(
                        "duplicate series name: {name}"
                    )));
                }
            }
        }
        Ok(())
    }
}

// Paths are not compiled here: a bad path disables only its own metric.
fn validate_metric(m: &MetricConfig) -> Result<()> {
    if !is_metric_name(&m.name) {
        return Err(JsonExporterError::BadConfig(format!(
            "invalid metric name: {:?}",
            m.name
        )));
    }
    for label in m.labels.keys() {
        if !is_label_name(label) {
            return Err(JsonExporterError::BadConfig(format!(
                "metric {}: invalid label name: {label:?}",
                m.name
            )));
        }
    }
    match m.kind {
        MetricKind::Object if m.values.is_empty() => Err(JsonExporterError::BadConfig(format!(
            "metric {}: object metrics need at least one value",
            m.name
        ))),
        MetricKind::Value if !m.values.is_empty() => Err(JsonExporterError::BadConfig(format!(
            "metric {}: values are only allowed on object metrics",
            m.name
        ))),
        MetricKind::Object => {
            for value in m.values.keys() {
                if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                    return Err(JsonExporterError::BadConfig(format!(
                        "metric {}: invalid value name: {value:?}",
                        m.name
                    )));
                }
            }
            Ok(())
        }
        MetricKind::Value => Ok(()),
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_scrape_interval_ms")]
    pub scrape_interval_ms: u64,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Fail startup on any path syntax error instead of disabling the metric.
    #[serde(default)]
    pub strict_paths: bool,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            scrape_interval_ms: default_scrape_interval_ms(),
            timeout_ms: default_timeout_ms(),
            strict_paths: false,
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        if !(1000..=3_600_000).contains(&self.scrape_interval_ms) {
            return Err(JsonExporterError::BadConfig(
                "exporter.scrape_interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        if !(100..=120_000).contains(&self.timeout_ms) {
            return Err(JsonExporterError::BadConfig(
                "exporter.timeout_ms must be between 100 and 120000".into(),
            ));
        }
        if self.timeout_ms >= self.scrape_interval_ms {
            return Err(JsonExporterError::BadConfig(
                "exporter.timeout_ms must be less than scrape_interval_ms".into(),
            ));
        }
        Ok(())
    }

    pub fn scrape_interval(&self) -> Duration {
        Duration::from_millis(self.scrape_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:7979".into()
}
fn default_scrape_interval_ms() -> u64 {
    60000
}
fn default_timeout_ms() -> u64 {
    10000
}
