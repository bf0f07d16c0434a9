//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "json-exporter", version, about = "Export values from a JSON endpoint as Prometheus metrics")]
pub struct Cli {
    /// URL of the JSON document to poll.
    pub endpoint: String,

    /// YAML config file with the metric definitions.
    pub config: PathBuf,

    /// Listen address, overrides `exporter.listen`.
    #[arg(long, env = "JSON_EXPORTER_LISTEN")]
    pub listen: Option<String>,
}
