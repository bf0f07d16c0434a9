//! Shared application state for the exporter.
//!
//! Built once at startup: every configured metric is compiled into a scraper
//! and its series are registered. A metric whose paths do not compile is
//! disabled on its own unless `exporter.strict_paths` is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use json_exporter_core::error::{JsonExporterError, Result};
use json_exporter_core::JsonScraper;

use crate::config::ExporterConfig;
use crate::obs::{ExporterMetrics, GaugeRegistry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ExporterConfig,
    scrapers: Vec<JsonScraper>,
    registry: GaugeRegistry,
    metrics: ExporterMetrics,
    ready: AtomicBool,
}

impl AppState {
    pub fn new(cfg: ExporterConfig) -> Result<Self> {
        let mut scrapers = Vec::with_capacity(cfg.metrics.len());
        let mut skipped: u64 = 0;

        for m in &cfg.metrics {
            match JsonScraper::build(m) {
                Ok(s) => scrapers.push(s),
                Err(e) => {
                    tracing::error!(metric=%m.name, error=%e, "metric disabled");
                    if cfg.exporter.strict_paths {
                        return Err(e);
                    }
                    skipped += 1;
                }
            }
        }

        if scrapers.is_empty() {
            return Err(JsonExporterError::BadConfig(
                "no configured metric could be built".into(),
            ));
        }

        let registry = GaugeRegistry::new();
        for s in &scrapers {
            for (name, help) in s.series() {
                registry.register(&name, &help);
            }
        }

        let metrics = ExporterMetrics::default();
        metrics.set_metrics_skipped(skipped);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                scrapers,
                registry,
                metrics,
                ready: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ExporterConfig {
        &self.inner.cfg
    }

    pub fn scrapers(&self) -> &[JsonScraper] {
        &self.inner.scrapers
    }

    pub fn registry(&self) -> &GaugeRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    /// True once a poll has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.inner.ready.load(Ordering::Relaxed)
    }

    pub fn mark_ready(&self) {
        self.inner.ready.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    /// Scraped series followed by self-metrics.
    pub fn render_metrics(&self) -> String {
        let mut out = String::new();
        self.inner.registry.render(&mut out);
        self.inner.metrics.render(&mut out);
        out
    }
}
