//! Data model for supplier inventory validation.
//!
//! - [`RawTable`]: the supplier table as loaded, in source column order
//! - [`ReconciledTable`]: columns mapped to [`CanonicalField`]s plus the unknown remainder
//! - [`Issue`]: one structured defect, classified by [`IssueKind`]
//! - [`UrlProbeResult`]: classification of one URL-bearing cell

pub mod fields;
mod issue;
mod probe;
mod table;
mod value;

pub use issue::{Category, Issue, IssueKind, NumericClass, Stage};
pub use probe::{ProbeOutcome, UrlProbeResult, UrlStatus};
pub use table::{
    CanonicalField, RawColumn, RawTable, ReconciledColumn, ReconciledTable, source_row_number,
};
pub use value::{RawValue, format_numeric};
