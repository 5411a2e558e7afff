//! Header synonym rules.

use std::collections::HashMap;

use ivs_common::normalize_header;
use ivs_model::CanonicalField;

use crate::error::Result;
use crate::sheet::RuleSheet;

/// One row of the `Columns` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRuleRow {
    pub column_name: String,
    /// Comma-separated synonyms.
    pub column_values: String,
}

impl HeaderRuleRow {
    pub fn new(column_name: impl Into<String>, column_values: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_values: column_values.into(),
        }
    }
}

/// Read header rule rows from a `Columns` sheet.
pub fn header_rows(sheet: &RuleSheet) -> Result<Vec<HeaderRuleRow>> {
    let name_idx = sheet.required_column("Column Name")?;
    let values_idx = sheet.required_column("Column Values")?;
    Ok(sheet
        .rows
        .iter()
        .map(|row| {
            HeaderRuleRow::new(
                RuleSheet::cell(row, name_idx),
                RuleSheet::cell(row, values_idx),
            )
        })
        .collect())
}

/// A synonym registered to more than one canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymCollision {
    pub synonym: String,
    pub previous: CanonicalField,
    pub current: CanonicalField,
}

/// Normalized synonym to canonical field map.
///
/// A synonym registered twice keeps its last registration.
#[derive(Debug, Clone, Default)]
pub struct HeaderRules {
    synonyms: HashMap<String, CanonicalField>,
    fields: Vec<CanonicalField>,
    collisions: Vec<SynonymCollision>,
}

impl HeaderRules {
    /// Build the synonym map from `Columns` rows.
    pub fn build(rows: &[HeaderRuleRow]) -> Self {
        let mut rules = Self::default();
        for row in rows {
            let Some(key) = normalize_header(&row.column_name) else {
                tracing::debug!(column_name = %row.column_name, "Skipping header rule without a name");
                continue;
            };
            let field = CanonicalField::new(key.clone());
            if !rules.fields.contains(&field) {
                rules.fields.push(field.clone());
            }
            rules.register(key, &field);
            for synonym in row.column_values.split(',').filter_map(normalize_header) {
                rules.register(synonym, &field);
            }
        }
        tracing::debug!(
            fields = rules.fields.len(),
            synonyms = rules.synonyms.len(),
            "Built header rules"
        );
        rules
    }

    fn register(&mut self, synonym: String, field: &CanonicalField) {
        if let Some(previous) = self.synonyms.insert(synonym.clone(), field.clone())
            && previous != *field
        {
            tracing::warn!(
                synonym = %synonym,
                previous = %previous,
                current = %field,
                "Header synonym registered to more than one field, last one wins"
            );
            self.collisions.push(SynonymCollision {
                synonym,
                previous,
                current: field.clone(),
            });
        }
    }

    /// Canonical field for a supplier header, normalizing it first.
    pub fn lookup(&self, header: &str) -> Option<&CanonicalField> {
        normalize_header(header).and_then(|key| self.synonyms.get(&key))
    }

    /// Canonical fields in declaration order.
    pub fn fields(&self) -> &[CanonicalField] {
        &self.fields
    }

    /// Number of distinct synonyms (including the canonical name) resolving to a field.
    pub fn synonym_count(&self, field: &CanonicalField) -> usize {
        self.synonyms.values().filter(|f| *f == field).count()
    }

    pub fn collisions(&self) -> &[SynonymCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}
