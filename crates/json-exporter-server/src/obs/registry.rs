//! Labeled gauge storage for scraped series.
//!
//! One family per series name, one `f64` per label set (stored as bits in an
//! `AtomicU64`). Writes are independent per series, so any number of scrapes
//! may write concurrently while `/metrics` renders.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use json_exporter_core::{Labels, MetricSink};

use super::{escape_help, label_str};

#[derive(Default)]
struct GaugeFamily {
    help: String,
    series: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl GaugeFamily {
    fn new(help: &str) -> Self {
        Self {
            help: help.to_string(),
            series: DashMap::new(),
        }
    }

    fn set(&self, labels: &Labels, value: f64) {
        // BTreeMap iteration is already sorted.
        let key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .store(value.to_bits(), Ordering::Relaxed);
    }
}

#[derive(Default)]
pub struct GaugeRegistry {
    families: DashMap<String, GaugeFamily>,
}

impl GaugeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a series up front so HELP/TYPE render before its first value.
    pub fn register(&self, name: &str, help: &str) {
        self.families
            .entry(name.to_string())
            .or_insert_with(|| GaugeFamily::new(help));
    }

    pub fn get(&self, name: &str, labels: &Labels) -> Option<f64> {
        let family = self.families.get(name)?;
        let key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        let bits = family.series.get(&key)?.load(Ordering::Relaxed);
        Some(f64::from_bits(bits))
    }

    /// Number of label sets stored under `name`.
    pub fn series_count(&self, name: &str) -> usize {
        self.families.get(name).map(|f| f.series.len()).unwrap_or(0)
    }

    /// Render every family in text exposition format, sorted by name then labels.
    pub fn render(&self, out: &mut String) {
        let mut names: Vec<String> = self.families.iter().map(|f| f.key().clone()).collect();
        names.sort();

        for name in names {
            let Some(family) = self.families.get(&name) else {
                continue;
            };
            if !family.help.is_empty() {
                let _ = writeln!(out, "# HELP {} {}", name, escape_help(&family.help));
            }
            let _ = writeln!(out, "# TYPE {name} gauge");

            let mut rows: Vec<(String, f64)> = family
                .series
                .iter()
                .map(|r| (label_str(r.key()), f64::from_bits(r.value().load(Ordering::Relaxed))))
                .collect();
            rows.sort_by(|a, b| a.0.cmp(&b.0));

            for (labels, value) in rows {
                if labels.is_empty() {
                    let _ = writeln!(out, "{} {}", name, format_value(value));
                } else {
                    let _ = writeln!(out, "{}{{{}}} {}", name, labels, format_value(value));
                }
            }
        }
    }
}

impl MetricSink for GaugeRegistry {
    fn set(&self, name: &str, labels: &Labels, value: f64) {
        if let Some(family) = self.families.get(name) {
            family.set(labels, value);
            return;
        }
        tracing::debug!(metric=%name, "creating unregistered series");
        self.families
            .entry(name.to_string())
            .or_default()
            .set(labels, value);
    }
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}
