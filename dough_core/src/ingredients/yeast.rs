//! Yeast types, expressed relative to fresh (compressed) yeast.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A yeast product and its strength relative to fresh yeast.
///
/// `factor` converts a fresh-yeast mass into this product's mass:
/// instant yeast at 0.33 means a third of the fresh amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YeastType {
    pub id: String,
    pub label: String,
    pub description: String,
    pub factor: f64,
}

impl YeastType {
    /// Convert a fresh-yeast equivalent (g) into grams of this yeast
    pub fn from_fresh(&self, fresh_g: f64) -> f64 {
        fresh_g * self.factor
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(CalcError::invalid_table(
                "yeasts",
                format!("'{}' factor must be positive, got {}", self.id, self.factor),
            ));
        }
        Ok(())
    }
}

/// Built-in yeast types
pub(crate) fn builtin_yeasts() -> Vec<YeastType> {
    vec![
        YeastType {
            id: "fresh".to_string(),
            label: "Fresh Yeast".to_string(),
            description: "Standard reference - soft, perishable blocks".to_string(),
            factor: 1.0,
        },
        YeastType {
            id: "active_dry".to_string(),
            label: "Active Dry".to_string(),
            description: "40% of fresh yeast amount - needs warm water activation".to_string(),
            factor: 0.4,
        },
        YeastType {
            id: "instant".to_string(),
            label: "Instant".to_string(),
            description: "33% of fresh yeast amount - mix directly into flour".to_string(),
            factor: 0.33,
        },
    ]
}
