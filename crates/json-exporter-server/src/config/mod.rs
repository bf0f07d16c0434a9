//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use json_exporter_core::error::{JsonExporterError, Result};

pub use schema::{ExporterConfig, ExporterSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<ExporterConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        JsonExporterError::BadConfig(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ExporterConfig> {
    let cfg: ExporterConfig = serde_yaml::from_str(s)
        .map_err(|e| JsonExporterError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
