//! Rule model for supplier inventory validation.
//!
//! A rule table supplies two record sets:
//!
//! - **Columns**: canonical field name and comma-separated header synonyms
//! - **Values**: field, base accepted value and comma-separated variations,
//!   where `any` accepts every non-empty value
//!
//! The table is either a workbook with `Columns` and `Values` sheets or a
//! directory holding `Columns.csv` and `Values.csv`.
//!
//! # Example
//!
//! ```rust,ignore
//! use ivs_rules::load_rule_set;
//!
//! let rules = load_rule_set("headers.xlsx".as_ref())?;
//! let field = rules.headers.lookup("Stock #");
//! ```

mod error;
mod header;
mod sheet;
mod value;

use std::path::Path;
use std::time::Instant;

pub use error::{Result, RulesError};
pub use header::{HeaderRuleRow, HeaderRules, SynonymCollision, header_rows};
pub use sheet::{COLUMNS_SHEET, RuleSheet, RuleSource, VALUES_SHEET, WORKBOOK_EXTENSIONS};
pub use value::{ValueRule, ValueRuleRow, ValueRules, WILDCARD_TOKEN, value_rows};

/// Rule table looked up when none is given.
pub const DEFAULT_RULES_FILE: &str = "headers.xlsx";

/// Immutable rules for one or more validation runs.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub headers: HeaderRules,
    pub values: ValueRules,
}

impl RuleSet {
    pub fn from_rows(header_rows: &[HeaderRuleRow], value_rows: &[ValueRuleRow]) -> Self {
        Self {
            headers: HeaderRules::build(header_rows),
            values: ValueRules::build(value_rows),
        }
    }
}

/// Load a rule set from a workbook or a CSV directory.
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let start = Instant::now();
    let source = RuleSource::detect(path)?;

    let columns = source.read_sheet(COLUMNS_SHEET)?;
    let values = source.read_sheet(VALUES_SHEET)?;
    let rules = RuleSet::from_rows(&header_rows(&columns)?, &value_rows(&values)?);

    tracing::info!(
        path = %path.display(),
        fields = rules.headers.fields().len(),
        synonyms = rules.headers.len(),
        value_rules = rules.values.len(),
        collisions = rules.headers.collisions().len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Loaded rule table"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
