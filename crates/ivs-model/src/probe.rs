//! URL probe results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a URL-bearing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrlStatus {
    NotProvided,
    Working,
    NotWorking,
}

impl UrlStatus {
    pub const fn all() -> &'static [Self] {
        &[Self::NotProvided, Self::Working, Self::NotWorking]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotProvided => "NOT_PROVIDED",
            Self::Working => "WORKING",
            Self::NotWorking => "NOT_WORKING",
        }
    }
}

impl fmt::Display for UrlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single network probe observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// The server answered with this status code.
    Status(u16),
    /// No response: timeout, connection failure, or a malformed URL.
    Failed(String),
}

/// Result for one (row, URL column) target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlProbeResult {
    /// `None` when the cell was empty.
    pub url: Option<String>,
    pub status: UrlStatus,
    pub http_status: Option<u16>,
    pub reason: Option<String>,
}

impl UrlProbeResult {
    pub fn not_provided() -> Self {
        Self {
            url: None,
            status: UrlStatus::NotProvided,
            http_status: None,
            reason: None,
        }
    }

    /// Classify a probe outcome against the accepted success statuses.
    pub fn classify(url: String, outcome: ProbeOutcome, success_statuses: &[u16]) -> Self {
        match outcome {
            ProbeOutcome::Status(code) if success_statuses.contains(&code) => Self {
                url: Some(url),
                status: UrlStatus::Working,
                http_status: Some(code),
                reason: None,
            },
            ProbeOutcome::Status(code) => Self {
                url: Some(url),
                status: UrlStatus::NotWorking,
                http_status: Some(code),
                reason: None,
            },
            ProbeOutcome::Failed(reason) => Self {
                url: Some(url),
                status: UrlStatus::NotWorking,
                http_status: None,
                reason: Some(reason),
            },
        }
    }
}
