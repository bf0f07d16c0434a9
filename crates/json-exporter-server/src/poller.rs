//! Poll loop: fetch, parse once, run every scraper.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use json_exporter_core::error::Result;
use json_exporter_core::Document;

use crate::app_state::AppState;
use crate::source::DocumentSource;

pub struct Poller {
    state: AppState,
    source: Arc<dyn DocumentSource>,
}

impl Poller {
    pub fn new(state: AppState, source: Arc<dyn DocumentSource>) -> Self {
        Self { state, source }
    }

    /// One fetch + scrape cycle, recorded in self-metrics.
    ///
    /// A failed fetch or malformed body leaves previously exported series as they were.
    pub async fn poll_once(&self) -> Result<()> {
        let started = Instant::now();
        let res = self.cycle().await;

        let metrics = self.state.metrics();
        metrics.scrape_duration.observe(&[], started.elapsed());
        match &res {
            Ok(()) => {
                metrics.scrapes.inc(&[("outcome", "ok")]);
                self.state.mark_ready();
            }
            Err(e) => {
                metrics.scrapes.inc(&[("outcome", "error")]);
                metrics.scrape_errors.inc(&[("reason", e.code().as_str())]);
                tracing::warn!(source=%self.source.describe(), error=%e, "scrape failed");
            }
        }
        res
    }

    async fn cycle(&self) -> Result<()> {
        let body = self.source.fetch().await?;
        let doc = Document::parse(&body)?;

        let registry = self.state.registry();
        for scraper in self.state.scrapers() {
            scraper.scrape_document(&doc, registry);
        }
        tracing::debug!(source=%self.source.describe(), metrics=self.state.scrapers().len(), "scrape complete");
        Ok(())
    }

    /// Poll on the configured interval until `shutdown` flips to true.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.state.cfg().exporter.scrape_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Errors are already logged and counted.
                    let _ = self.poll_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("poller stopped");
    }
}
