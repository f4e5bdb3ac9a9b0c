//! Poolish ferment options
//!
//! A poolish ferments on a fixed schedule before the final dough is mixed, so
//! its yeast dose comes from this table rather than the temperature/time model.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A poolish fermentation length and its fresh-yeast dose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolishFermentOption {
    pub id: String,
    pub label: String,
    pub description: String,
    pub hours: u32,
    /// Fresh yeast per 100 g of poolish flour
    pub fresh_yeast_per_100g: f64,
}

impl PoolishFermentOption {
    /// Fresh yeast (g) for the given poolish flour mass
    pub fn fresh_yeast_for(&self, poolish_flour_g: f64) -> f64 {
        poolish_flour_g * (self.fresh_yeast_per_100g / 100.0)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.hours == 0 {
            return Err(CalcError::invalid_table(
                "poolish_options",
                format!("'{}' duration must be at least one hour", self.id),
            ));
        }
        if !self.fresh_yeast_per_100g.is_finite() || self.fresh_yeast_per_100g <= 0.0 {
            return Err(CalcError::invalid_table(
                "poolish_options",
                format!("'{}' yeast dosage must be positive", self.id),
            ));
        }
        Ok(())
    }
}

/// Built-in poolish options. Longer ferments take less yeast.
pub(crate) fn builtin_poolish_options() -> Vec<PoolishFermentOption> {
    vec![
        PoolishFermentOption {
            id: "8h".to_string(),
            label: "8 hours".to_string(),
            description: "Overnight at room temp".to_string(),
            hours: 8,
            fresh_yeast_per_100g: 0.1,
        },
        PoolishFermentOption {
            id: "12h".to_string(),
            label: "12 hours".to_string(),
            description: "Evening to morning".to_string(),
            hours: 12,
            fresh_yeast_per_100g: 0.05,
        },
        PoolishFermentOption {
            id: "16h".to_string(),
            label: "16 hours".to_string(),
            description: "Long slow ferment, max flavor".to_string(),
            hours: 16,
            fresh_yeast_per_100g: 0.02,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dosage_decreases_with_duration() {
        let options = builtin_poolish_options();
        for pair in options.windows(2) {
            assert!(pair[0].hours < pair[1].hours);
            assert!(pair[0].fresh_yeast_per_100g > pair[1].fresh_yeast_per_100g);
        }
    }

    #[test]
    fn test_fresh_yeast_for() {
        let twelve = &builtin_poolish_options()[1];
        // 400 g flour × 0.05 / 100 = 0.2 g
        assert!((twelve.fresh_yeast_for(400.0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_hours_rejected() {
        let mut option = builtin_poolish_options()[0].clone();
        option.hours = 0;
        assert!(option.validate().is_err());
    }

    #[test]
    fn test_non_finite_dosage_rejected() {
        let mut option = builtin_poolish_options()[0].clone();
        option.fresh_yeast_per_100g = f64::INFINITY;
        assert!(option.validate().is_err());
        option.fresh_yeast_per_100g = f64::NAN;
        assert!(option.validate().is_err());
    }
}
