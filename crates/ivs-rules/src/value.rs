//! Value allow-list rules.

use std::collections::{BTreeSet, HashMap};

use ivs_common::{normalize_header, normalize_value};
use ivs_model::CanonicalField;

use crate::error::Result;
use crate::sheet::RuleSheet;

/// Sentinel base value or variation that accepts any non-empty value.
pub const WILDCARD_TOKEN: &str = "any";

/// One row of the `Values` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRuleRow {
    pub value_type: String,
    pub base_value: String,
    /// Comma-separated variations.
    pub value_variations: String,
}

impl ValueRuleRow {
    pub fn new(
        value_type: impl Into<String>,
        base_value: impl Into<String>,
        value_variations: impl Into<String>,
    ) -> Self {
        Self {
            value_type: value_type.into(),
            base_value: base_value.into(),
            value_variations: value_variations.into(),
        }
    }
}

/// Read value rule rows from a `Values` sheet.
pub fn value_rows(sheet: &RuleSheet) -> Result<Vec<ValueRuleRow>> {
    let type_idx = sheet.required_column("Value Type")?;
    let base_idx = sheet.required_column("Base Value")?;
    let variations_idx = sheet.required_column("Value Variations")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| {
            ValueRuleRow::new(
                RuleSheet::cell(row, type_idx),
                RuleSheet::cell(row, base_idx),
                RuleSheet::cell(row, variations_idx),
            )
        })
        .collect())
}

/// Accepted values for one canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValueRule {
    /// Any non-empty value is accepted.
    Wildcard,
    /// Only these normalized values are accepted.
    Accepted(BTreeSet<String>),
    #[default]
    Empty,
}

impl ValueRule {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Membership test for an already-normalized value.
    pub fn accepts(&self, key: &str) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Accepted(set) => set.contains(key),
            Self::Empty => false,
        }
    }

    /// Number of accepted values; zero for a wildcard.
    pub fn accepted_count(&self) -> usize {
        match self {
            Self::Accepted(set) => set.len(),
            Self::Wildcard | Self::Empty => 0,
        }
    }

    fn add(&mut self, value: &str) {
        if self.is_wildcard() {
            return;
        }
        if is_wildcard_token(value) {
            *self = Self::Wildcard;
            return;
        }
        let Some(key) = normalize_value(value) else {
            return;
        };
        match self {
            Self::Accepted(set) => {
                set.insert(key);
            }
            _ => *self = Self::Accepted(BTreeSet::from([key])),
        }
    }
}

fn is_wildcard_token(value: &str) -> bool {
    normalize_header(value).as_deref() == Some(WILDCARD_TOKEN)
}

/// Canonical field to value rule map.
#[derive(Debug, Clone, Default)]
pub struct ValueRules {
    rules: HashMap<CanonicalField, ValueRule>,
}

impl ValueRules {
    /// Build from `Values` rows.
    ///
    /// Base values and variations are unioned per field. The `any` sentinel
    /// turns the field into a wildcard and later values for it are ignored.
    pub fn build(rows: &[ValueRuleRow]) -> Self {
        let mut rules: HashMap<CanonicalField, ValueRule> = HashMap::new();
        for row in rows {
            let Some(key) = normalize_header(&row.value_type) else {
                tracing::debug!(value_type = %row.value_type, "Skipping value rule without a type");
                continue;
            };
            let rule = rules.entry(CanonicalField::new(key)).or_default();
            rule.add(&row.base_value);
            for variation in row.value_variations.split(',') {
                rule.add(variation);
            }
        }
        tracing::debug!(
            fields = rules.len(),
            wildcards = rules.values().filter(|r| r.is_wildcard()).count(),
            "Built value rules"
        );
        Self { rules }
    }

    pub fn get(&self, field: &CanonicalField) -> Option<&ValueRule> {
        self.rules.get(field)
    }

    /// Fields with a value rule, sorted by name.
    pub fn fields(&self) -> Vec<&CanonicalField> {
        let mut fields: Vec<_> = self.rules.keys().collect();
        fields.sort();
        fields
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
