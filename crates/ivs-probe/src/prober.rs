//! The probe seam and its HTTP implementation.

use std::future::Future;

use ivs_model::ProbeOutcome;
use reqwest::Client;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::config::ProbeConfig;

/// Errors building a prober.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Checks a single URL.
///
/// Implementations never fail: every transport problem is reported as
/// [`ProbeOutcome::Failed`].
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = ProbeOutcome> + Send;
}

/// `HEAD` prober backed by `reqwest`.
///
/// Redirects are not followed, so 301 and 302 responses are observed as-is
/// and judged against the configured success statuses.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::none())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ProbeError::Client)?;
        Ok(Self { client })
    }
}

impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.head(url).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                tracing::trace!(url, status, "Probe answered");
                ProbeOutcome::Status(status)
            }
            Err(err) => {
                let reason = failure_reason(&err);
                tracing::trace!(url, reason = %reason, "Probe failed");
                ProbeOutcome::Failed(reason)
            }
        }
    }
}

fn failure_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "timeout".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else if err.is_builder() {
        "invalid url".to_string()
    } else {
        err.to_string()
    }
}
