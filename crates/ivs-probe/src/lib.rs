//! Resource reachability checks for URL-bearing inventory fields.
//!
//! The [`Probe`] trait is the network seam: [`HttpProber`] issues real `HEAD`
//! requests, tests substitute scripted probes. [`check_reachability`] fans
//! probes out with bounded concurrency and joins them all before returning.

mod config;
mod prober;
mod reachability;

pub use config::ProbeConfig;
pub use prober::{HttpProber, Probe, ProbeError};
pub use reachability::{
    ProbedTarget, ReachabilityReport, UrlTarget, check_reachability, collect_targets, url_fields,
};
