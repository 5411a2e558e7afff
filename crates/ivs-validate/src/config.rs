//! Engine configuration.
//!
//! Every setting has a default, and a TOML file may override any subset:
//!
//! ```toml
//! [checks]
//! mandatory_fields = ["stock_num", "shape", "color"]
//!
//! [[checks.bounds]]
//! field = "carat"
//! min = 0.1
//! max = 15.0
//!
//! [probe]
//! concurrency = 8
//! timeout_ms = 2000
//! ```

use std::path::Path;

use ivs_model::fields;
use ivs_probe::ProbeConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Closed interval a numeric field must fall in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldBounds {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

impl FieldBounds {
    pub fn new(field: &str, min: f64, max: f64) -> Self {
        Self {
            field: field.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Operands of the price consistency check besides weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceFields {
    pub unit_price: String,
    pub total_price: String,
}

impl Default for PriceFields {
    fn default() -> Self {
        Self {
            unit_price: fields::PRICE_PER_CARAT.to_string(),
            total_price: fields::TOTAL_SALES_PRICE.to_string(),
        }
    }
}

/// Certificate link format rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificateRule {
    pub field: String,
    /// Accepted path suffixes, compared case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for CertificateRule {
    fn default() -> Self {
        Self {
            field: fields::CERT_URL_1.to_string(),
            extensions: vec![".pdf".to_string()],
        }
    }
}

/// Field checker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Field used to label rows in reports.
    pub stock_field: String,
    pub mandatory_fields: Vec<String>,
    /// Sign-checked as weights; the first present one is the price check's weight.
    pub weight_fields: Vec<String>,
    /// Sign-checked as prices.
    pub price_fields: Vec<String>,
    pub bounds: Vec<FieldBounds>,
    pub price: PriceFields,
    /// First present one is checked for empty cells.
    pub cut_grade_fields: Vec<String>,
    pub certificate: CertificateRule,
}

impl Default for CheckConfig {
    fn default() -> Self {
        let owned = |names: &[&str]| names.iter().copied().map(String::from).collect::<Vec<_>>();
        Self {
            stock_field: fields::STOCK_NUM.to_string(),
            mandatory_fields: owned(&[
                fields::STOCK_NUM,
                fields::SHAPE,
                fields::COLOR,
                fields::CLARITY,
                fields::LAB,
                fields::IMAGE_URL_1,
                fields::VIDEO_URL_1,
                fields::CERT_URL_1,
            ]),
            weight_fields: owned(&[fields::CARAT, fields::WEIGHT, fields::CARAT_WEIGHT]),
            price_fields: owned(&[fields::PRICE_PER_CARAT, fields::TOTAL_SALES_PRICE]),
            bounds: vec![
                FieldBounds::new(fields::CARAT, 0.05, 20.0),
                FieldBounds::new(fields::WEIGHT, 0.05, 20.0),
                FieldBounds::new(fields::CARAT_WEIGHT, 0.05, 20.0),
                FieldBounds::new(fields::TABLE, 40.0, 90.0),
                FieldBounds::new(fields::DEPTH, 40.0, 90.0),
            ],
            price: PriceFields::default(),
            cut_grade_fields: owned(&[fields::CUT_GRADE, fields::CUT]),
            certificate: CertificateRule::default(),
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub checks: CheckConfig,
    pub probe: ProbeConfig,
}

impl EngineConfig {
    /// Parse a TOML document; `origin` is only used in errors.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Reject settings no check could run with.
    pub fn validate(&self) -> Result<()> {
        if self.checks.stock_field.trim().is_empty() {
            return Err(ConfigError::Empty {
                key: "checks.stock_field",
            });
        }
        for bounds in &self.checks.bounds {
            if !bounds.min.is_finite() || !bounds.max.is_finite() || bounds.min > bounds.max {
                return Err(ConfigError::InvalidBounds {
                    field: bounds.field.clone(),
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}
