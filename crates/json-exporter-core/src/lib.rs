//! json-exporter core: the JSON-to-metric mapping engine.
//!
//! This crate turns declarative metric definitions (a target path, labels and
//! optional named values) into observations written to a [`MetricSink`]. It
//! carries no transport or runtime dependencies: fetching the document and
//! storing the resulting series belong to the caller.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A malformed document
//! is reported as `JsonExporterError`; every per-field problem (missing match,
//! wrong type, unparseable number) is logged and skipped so one bad field never
//! stops the rest of a scrape.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod coerce;
pub mod definition;
pub mod error;
pub mod path;
pub mod scraper;
pub mod sink;

/// Shared result type.
pub use error::{JsonExporterError, Result};

pub use definition::{MetricConfig, MetricKind};
pub use path::{CompiledPath, Document, ResultKind, TypedResult};
pub use scraper::JsonScraper;
pub use sink::{composite_name, Labels, MetricSink};
