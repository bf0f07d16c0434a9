//! Where scraped documents come from.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use json_exporter_core::error::{JsonExporterError, Result};

/// A JSON document provider polled once per cycle.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Human-readable origin, for logs.
    fn describe(&self) -> &str;
    async fn fetch(&self) -> Result<Bytes>;
}

/// HTTP GET against a fixed endpoint.
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("json-exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JsonExporterError::Internal(format!("http client build failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn describe(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self) -> Result<Bytes> {
        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| JsonExporterError::Fetch(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(JsonExporterError::Fetch(format!(
                "unexpected status {status} from {}",
                self.endpoint
            )));
        }

        resp.bytes()
            .await
            .map_err(|e| JsonExporterError::Fetch(e.to_string()))
    }
}
