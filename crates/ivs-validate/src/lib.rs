//! Validation engine for supplier diamond inventory tables.
//!
//! A run reconciles supplier headers onto canonical fields, runs the field
//! checks, probes media links and aggregates everything into one ordered
//! [`ValidationReport`]:
//!
//! 1. Mandatory presence
//! 2. Numeric sign and bounds
//! 3. Value membership
//! 4. URL reachability
//! 5. Missing cut grade
//! 6. Price consistency
//! 7. Certificate link format
//!
//! Checks never mutate the table and never fail on bad cell data; every
//! defect becomes an [`Issue`](ivs_model::Issue).

mod aggregate;
pub mod checks;
mod column_reader;
mod config;
mod counters;
mod engine;
mod error;
mod reconcile;
mod report;

pub use aggregate::aggregate;
pub use checks::{StageIssues, run_field_checks};
pub use column_reader::ColumnReader;
pub use config::{CertificateRule, CheckConfig, EngineConfig, FieldBounds, PriceFields};
pub use counters::IssueCounters;
pub use engine::{Engine, EngineOptions};
pub use error::{ConfigError, Result};
pub use reconcile::reconcile;
pub use report::ValidationReport;
