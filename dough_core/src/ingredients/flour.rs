//! Flour presets
//!
//! Each preset describes a commercial flour class: protein content, W index,
//! the hydration window it handles well and how long it can ferment.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Qualitative gluten strength, derived from protein content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlourStrength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl FlourStrength {
    /// All strength classes, weakest first
    pub const ALL: [FlourStrength; 4] = [
        FlourStrength::Weak,
        FlourStrength::Medium,
        FlourStrength::Strong,
        FlourStrength::VeryStrong,
    ];

    /// Multiplier applied to kneading durations.
    ///
    /// Stronger flour needs longer mechanical development.
    pub fn kneading_multiplier(&self) -> f64 {
        match self {
            FlourStrength::Weak => 0.6,
            FlourStrength::Medium => 0.8,
            FlourStrength::Strong => 1.0,
            FlourStrength::VeryStrong => 1.2,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FlourStrength::Weak => "Weak",
            FlourStrength::Medium => "Medium",
            FlourStrength::Strong => "Strong",
            FlourStrength::VeryStrong => "Very Strong",
        }
    }
}

impl std::fmt::Display for FlourStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A flour class and its working limits.
///
/// ## TOML Example
///
/// ```toml
/// [[flours]]
/// id = "bread_pizza"
/// label = "Bread / Pizza"
/// description = "Strong, great for Neapolitan"
/// protein_pct = 12.5
/// w_range = [280, 320]
/// strength = "strong"
/// hydration_range = [60.0, 72.0]
/// max_ferment_hours = 48
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlourPreset {
    /// Stable identifier referenced by `ParameterSet::flour_preset`
    pub id: String,
    pub label: String,
    pub description: String,
    /// Protein content in percent
    pub protein_pct: f64,
    /// Alveograph W index range `[min, max]`
    pub w_range: [u32; 2],
    pub strength: FlourStrength,
    /// Recommended hydration window in percent, `[min, max]`
    pub hydration_range: [f64; 2],
    /// Longest recommended total fermentation, whole hours
    pub max_ferment_hours: u32,
}

impl FlourPreset {
    pub fn hydration_min(&self) -> f64 {
        self.hydration_range[0]
    }

    pub fn hydration_max(&self) -> f64 {
        self.hydration_range[1]
    }

    /// Clamp a hydration percentage into this preset's window
    pub fn clamp_hydration(&self, hydration_pct: f64) -> f64 {
        hydration_pct.clamp(self.hydration_min(), self.hydration_max())
    }

    /// Clamp total ferment hours into `MIN_FERMENT_HOURS..=max_ferment_hours`
    pub fn clamp_ferment_hours(&self, hours: u32) -> u32 {
        hours.clamp(crate::params::MIN_FERMENT_HOURS, self.max_ferment_hours)
    }

    /// Picker caption, e.g. `~12.5% protein · W280–320`
    pub fn caption(&self) -> String {
        format!(
            "~{}% protein · W{}–{}",
            self.protein_pct, self.w_range[0], self.w_range[1]
        )
    }

    /// Check internal consistency of the preset
    pub fn validate(&self) -> CalcResult<()> {
        if !self.hydration_range.iter().all(|pct| pct.is_finite()) {
            return Err(CalcError::invalid_table(
                "flours",
                format!("'{}' hydration range must be finite numbers", self.id),
            ));
        }
        if !self.protein_pct.is_finite() || self.protein_pct <= 0.0 {
            return Err(CalcError::invalid_table(
                "flours",
                format!("'{}' protein must be positive, got {}", self.id, self.protein_pct),
            ));
        }
        if self.hydration_min() > self.hydration_max() {
            return Err(CalcError::invalid_table(
                "flours",
                format!(
                    "'{}' hydration range [{}, {}] has min above max",
                    self.id,
                    self.hydration_min(),
                    self.hydration_max()
                ),
            ));
        }
        if self.w_range[0] > self.w_range[1] {
            return Err(CalcError::invalid_table(
                "flours",
                format!("'{}' W range has min above max", self.id),
            ));
        }
        if self.hydration_min() <= 0.0 {
            return Err(CalcError::invalid_table(
                "flours",
                format!("'{}' hydration must be positive", self.id),
            ));
        }
        if self.max_ferment_hours < crate::params::MIN_FERMENT_HOURS {
            return Err(CalcError::invalid_table(
                "flours",
                format!(
                    "'{}' max ferment of {}h is below the {}h minimum",
                    self.id,
                    self.max_ferment_hours,
                    crate::params::MIN_FERMENT_HOURS
                ),
            ));
        }
        Ok(())
    }
}

/// Built-in flour presets
pub(crate) fn builtin_flours() -> Vec<FlourPreset> {
    vec![
        FlourPreset {
            id: "pastry".to_string(),
            label: "Pastry / Cake".to_string(),
            description: "Delicate, low gluten".to_string(),
            protein_pct: 9.0,
            w_range: [130, 170],
            strength: FlourStrength::Weak,
            hydration_range: [50.0, 58.0],
            max_ferment_hours: 8,
        },
        FlourPreset {
            id: "allpurpose".to_string(),
            label: "All-Purpose".to_string(),
            description: "Versatile, moderate gluten".to_string(),
            protein_pct: 11.0,
            w_range: [200, 230],
            strength: FlourStrength::Medium,
            hydration_range: [55.0, 63.0],
            max_ferment_hours: 16,
        },
        FlourPreset {
            id: "bread_pizza".to_string(),
            label: "Bread / Pizza".to_string(),
            description: "Strong, great for Neapolitan".to_string(),
            protein_pct: 12.5,
            w_range: [280, 320],
            strength: FlourStrength::Strong,
            hydration_range: [60.0, 72.0],
            max_ferment_hours: 48,
        },
        FlourPreset {
            id: "manitoba".to_string(),
            label: "Manitoba / Strong".to_string(),
            description: "Very strong, long ferments".to_string(),
            protein_pct: 14.0,
            w_range: [350, 400],
            strength: FlourStrength::VeryStrong,
            hydration_range: [65.0, 80.0],
            max_ferment_hours: 72,
        },
    ]
}
