//! Structured extraction: each match of the target path is an instance with
//! its own labels and named values.

use crate::coerce::{coerce, coerce_literal};
use crate::definition::MetricConfig;
use crate::error::Result;
use crate::path::{CompiledPath, Document, TypedResult};
use crate::sink::{composite_name, Labels, MetricSink};

use super::{compile_fields, log_coerce_failure, Field};

#[derive(Debug, Clone)]
struct NamedValue {
    name: String,
    series: String,
    field: Field,
}

/// Emits `<metric>_<value>` for every (instance, named value) pair that resolves.
#[derive(Debug, Clone)]
pub struct ObjectScraper {
    name: String,
    help: String,
    path: CompiledPath,
    labels: Vec<(String, Field)>,
    values: Vec<NamedValue>,
}

impl ObjectScraper {
    pub fn new(config: &MetricConfig) -> Result<Self> {
        let path = CompiledPath::compile(&config.path)?;
        let labels = compile_fields(&config.labels)?;
        let values = compile_fields(&config.values)?
            .into_iter()
            .map(|(name, field)| NamedValue {
                series: composite_name(&config.name, &name),
                name,
                field,
            })
            .collect();

        Ok(Self {
            name: config.name.clone(),
            help: config.help_text().to_string(),
            path,
            labels,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .map(|v| (v.series.clone(), self.help.clone()))
            .collect()
    }

    pub fn scrape(&self, doc: &Document, sink: &dyn MetricSink) {
        for instance in self.path.evaluate(doc.root()) {
            if !instance.kind().is_structural() {
                tracing::warn!(metric=%self.name, path=%self.path, value=%instance.raw(), "skipping non-structural result");
                continue;
            }

            let labels = self.resolve_labels(&instance);

            for value in &self.values {
                let Some(v) = self.resolve_value(value, &instance) else {
                    continue;
                };
                tracing::debug!(metric=%value.series, labels=?labels, value=v, "metric updated");
                sink.set(&value.series, &labels, v);
            }
        }
    }

    /// Static labels first, then dynamic ones, so a dynamic label wins a name clash.
    fn resolve_labels(&self, instance: &TypedResult<'_>) -> Labels {
        let mut labels = Labels::new();
        for (name, field) in &self.labels {
            if let Field::Static(v) = field {
                labels.insert(name.clone(), v.clone());
            }
        }

        for (name, field) in &self.labels {
            let Field::Dynamic(path) = field else {
                continue;
            };
            match path.first(instance.node()) {
                Some(found) => {
                    labels.insert(name.clone(), found.label_text());
                }
                None => {
                    tracing::warn!(metric=%self.name, label=%name, path=%path, instance=%instance.raw(), "could not find value for label path");
                }
            }
        }
        labels
    }

    fn resolve_value(&self, value: &NamedValue, instance: &TypedResult<'_>) -> Option<f64> {
        match &value.field {
            Field::Static(literal) => match coerce_literal(literal) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::error!(metric=%self.name, value_name=%value.name, error=%e, "could not use configured value as float");
                    None
                }
            },
            Field::Dynamic(path) => {
                let Some(found) = path.first(instance.node()) else {
                    tracing::warn!(metric=%self.name, value_name=%value.name, path=%path, instance=%instance.raw(), "could not find value for value path");
                    return None;
                };
                match coerce(&found) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        log_coerce_failure(&value.series, path.as_str(), &e);
                        None
                    }
                }
            }
        }
    }
}
