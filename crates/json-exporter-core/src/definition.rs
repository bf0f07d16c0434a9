//! Metric definitions as they appear in configuration.
//!
//! A label or value entry that starts with `$` is a path expression evaluated
//! per scrape; anything else is a literal copied verbatim.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Extraction mode of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// One scalar at `path`, one series.
    #[default]
    Value,
    /// Object/array instances at `path`, one series per named value.
    Object,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Value => "value",
            MetricKind::Object => "object",
        }
    }
}

/// One configured metric.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricConfig {
    pub name: String,

    #[serde(rename = "type", default)]
    pub kind: MetricKind,

    #[serde(default)]
    pub help: String,

    pub path: String,

    #[serde(default)]
    pub labels: BTreeMap<String, Literal>,

    /// Named values (object metrics only).
    #[serde(default)]
    pub values: BTreeMap<String, Literal>,
}

impl MetricConfig {
    /// Help text, falling back to the metric name.
    pub fn help_text(&self) -> &str {
        if self.help.is_empty() {
            &self.name
        } else {
            &self.help
        }
    }

    /// Every series name this definition emits.
    pub fn series_names(&self) -> Vec<String> {
        match self.kind {
            MetricKind::Value => vec![self.name.clone()],
            MetricKind::Object => self
                .values
                .keys()
                .map(|v| crate::sink::composite_name(&self.name, v))
                .collect(),
        }
    }
}

/// Scalar literal from configuration.
///
/// YAML lets users write `active: 1` or `env: beta`; both are kept in their
/// textual form and interpreted later.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    pub fn text(&self) -> String {
        match self {
            Literal::Text(s) => s.clone(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => f.to_string(),
            Literal::Bool(b) => b.to_string(),
        }
    }

    /// Path expression, if this literal is one.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Literal::Text(s) if is_path_expr(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Entries starting with `$` are path expressions.
pub fn is_path_expr(s: &str) -> bool {
    s.starts_with('$')
}
