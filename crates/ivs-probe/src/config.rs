//! Probe configuration.

use std::time::Duration;

use ivs_model::fields;
use serde::{Deserialize, Serialize};

/// Settings for the reachability stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Maximum probes in flight (values below 1 are treated as 1).
    pub concurrency: usize,
    /// Per-probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Status codes that count as reachable.
    pub success_statuses: Vec<u16>,
    /// Fields whose canonical name contains this marker are probed.
    pub url_marker: String,
    /// URL-bearing fields that are never probed.
    pub exempt_fields: Vec<String>,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: 20,
            timeout_ms: 1500,
            success_statuses: vec![200, 301, 302],
            url_marker: "url".to_string(),
            exempt_fields: vec![fields::CERT_URL_1.to_string()],
            user_agent: concat!("ivs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Whether a canonical field is probed.
    pub fn is_url_field(&self, field: &str) -> bool {
        field.contains(&self.url_marker) && !self.exempt_fields.iter().any(|f| f == field)
    }
}
