//! Extractors built from metric definitions.
//!
//! Only two kinds exist, chosen when the definition is built:
//! - [`ValueScraper`]: first match of `path` is the measurement.
//! - [`ObjectScraper`]: every match of `path` is an instance; labels and named
//!   values are resolved relative to each instance.
//!
//! Building compiles every path in the definition. Scraping never fails on a
//! single field: problems are logged with the metric name and path, and the
//! rest of the scrape goes on.

pub mod object;
pub mod value;

use std::collections::BTreeMap;

use crate::coerce::CoerceError;
use crate::definition::{Literal, MetricConfig, MetricKind};
use crate::error::Result;
use crate::path::{CompiledPath, Document};
use crate::sink::MetricSink;

pub use object::ObjectScraper;
pub use value::ValueScraper;

/// Static literal or per-scrape path lookup.
#[derive(Debug, Clone)]
pub enum Field {
    Static(String),
    Dynamic(CompiledPath),
}

impl Field {
    fn compile(literal: &Literal) -> Result<Self> {
        match literal.as_path() {
            Some(expr) => Ok(Field::Dynamic(CompiledPath::compile(expr)?)),
            None => Ok(Field::Static(literal.text())),
        }
    }
}

fn compile_fields(raw: &BTreeMap<String, Literal>) -> Result<Vec<(String, Field)>> {
    let mut out = Vec::with_capacity(raw.len());
    for (name, literal) in raw {
        out.push((name.clone(), Field::compile(literal)?));
    }
    Ok(out)
}

/// A built extractor for one metric definition.
#[derive(Debug, Clone)]
pub enum JsonScraper {
    Value(ValueScraper),
    Object(ObjectScraper),
}

impl JsonScraper {
    /// Compile every path of `config`. A syntax error rejects this metric only.
    pub fn build(config: &MetricConfig) -> Result<Self> {
        match config.kind {
            MetricKind::Value => ValueScraper::new(config).map(JsonScraper::Value),
            MetricKind::Object => ObjectScraper::new(config).map(JsonScraper::Object),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            JsonScraper::Value(s) => s.name(),
            JsonScraper::Object(s) => s.name(),
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            JsonScraper::Value(_) => MetricKind::Value,
            JsonScraper::Object(_) => MetricKind::Object,
        }
    }

    /// `(series name, help)` for every series this scraper writes.
    pub fn series(&self) -> Vec<(String, String)> {
        match self {
            JsonScraper::Value(s) => s.series(),
            JsonScraper::Object(s) => s.series(),
        }
    }

    /// Parse `data` and scrape it. Fails only if `data` is not JSON.
    pub fn scrape(&self, data: &[u8], sink: &dyn MetricSink) -> Result<()> {
        let doc = Document::parse(data)?;
        self.scrape_document(&doc, sink);
        Ok(())
    }

    /// Scrape an already-parsed document.
    pub fn scrape_document(&self, doc: &Document, sink: &dyn MetricSink) {
        match self {
            JsonScraper::Value(s) => s.scrape(doc, sink),
            JsonScraper::Object(s) => s.scrape(doc, sink),
        }
    }
}

fn log_coerce_failure(metric: &str, path: &str, err: &CoerceError) {
    match err {
        // The evaluator only reports numbers that are numeric text.
        CoerceError::InvalidNumber(raw) => {
            tracing::error!(metric=%metric, path=%path, value=%raw, "could not parse numerical value as float");
        }
        CoerceError::NotScalar(kind) => {
            tracing::warn!(metric=%metric, path=%path, kind=%kind, "skipping non-numerical result");
        }
        CoerceError::NotNumericString(raw) | CoerceError::Unquotable(raw) => {
            tracing::warn!(metric=%metric, path=%path, value=%raw, "string value is not a number");
        }
    }
}
