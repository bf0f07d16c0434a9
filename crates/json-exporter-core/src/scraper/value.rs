//! Scalar extraction: one path, one series.

use crate::coerce::coerce;
use crate::definition::MetricConfig;
use crate::error::Result;
use crate::path::{CompiledPath, Document};
use crate::sink::{Labels, MetricSink};

use super::{compile_fields, log_coerce_failure, Field};

/// Emits the first match of `path` under the metric's static labels.
#[derive(Debug, Clone)]
pub struct ValueScraper {
    name: String,
    help: String,
    path: CompiledPath,
    labels: Labels,
}

impl ValueScraper {
    pub fn new(config: &MetricConfig) -> Result<Self> {
        let path = CompiledPath::compile(&config.path)?;

        let mut labels = Labels::new();
        for (name, field) in compile_fields(&config.labels)? {
            match field {
                Field::Static(v) => {
                    labels.insert(name, v);
                }
                Field::Dynamic(p) => {
                    tracing::warn!(metric=%config.name, label=%name, path=%p, "dynamic labels are ignored for value metrics");
                }
            }
        }

        Ok(Self {
            name: config.name.clone(),
            help: config.help_text().to_string(),
            path,
            labels,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> Vec<(String, String)> {
        vec![(self.name.clone(), self.help.clone())]
    }

    pub fn scrape(&self, doc: &Document, sink: &dyn MetricSink) {
        let mut matches = self.path.evaluate(doc.root());

        // Absent fields are normal for optional upstream data.
        let Some(first) = matches.next() else {
            tracing::debug!(metric=%self.name, path=%self.path, "no match");
            return;
        };

        let ignored = matches.count();
        if ignored > 0 {
            tracing::warn!(metric=%self.name, path=%self.path, ignored, "ignoring non-first values");
        }

        match coerce(&first) {
            Ok(value) => {
                tracing::debug!(metric=%self.name, labels=?self.labels, value, "metric updated");
                sink.set(&self.name, &self.labels, value);
            }
            Err(e) => log_coerce_failure(&self.name, self.path.as_str(), &e),
        }
    }
}
