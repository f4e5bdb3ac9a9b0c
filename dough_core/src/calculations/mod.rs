//! # Dough Calculations
//!
//! The three derivations behind a dough plan. Each follows the pattern:
//!
//! - plain input values or a validated [`ParameterSet`]
//! - a JSON-serializable result type
//! - a pure function with no I/O and no hidden state
//!
//! ## Available Calculations
//!
//! - [`recipe`] - ingredient masses and poolish sub-recipe
//! - [`fermentation`] - bulk / cold-retard split
//! - [`kneading`] - ordered kneading procedure with durations
//!
//! ## Example
//!
//! ```rust
//! use dough_core::calculations::compute_bake_plan;
//! use dough_core::ingredients::ReferenceTables;
//! use dough_core::params::ParameterSet;
//!
//! let plan = compute_bake_plan(&ParameterSet::default(), ReferenceTables::builtin()).unwrap();
//! assert_eq!(plan.recipe.total_dough_g, 1000.0);
//! assert_eq!(plan.recipe.schedule.bulk_hours + plan.recipe.schedule.cold_hours, 24);
//! ```

pub mod fermentation;
pub mod kneading;
pub mod recipe;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::ingredients::{FlourStrength, ReferenceTables};
use crate::params::{KneadingMethod, ParameterSet, Preferment};

// Re-export commonly used types
pub use fermentation::FermentationSchedule;
pub use kneading::{KneadingPlan, ProcessStep, StepIcon, StepKind};
pub use recipe::{PoolishRecipe, Recipe};

/// Digits past the rounding position used to spot an exact halfway value
const TIE_PROBE_DIGITS: usize = 30;

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, so `0.35` (stored as `0.34999…`) becomes
/// `0.3`. Values sitting exactly halfway round away from zero.
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    let expanded = format!("{:.*}", decimals + TIE_PROBE_DIGITS, value);
    let tail = &expanded[expanded.len() - TIE_PROBE_DIGITS..];
    let exact_half = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if exact_half {
        // Formatting breaks exact ties towards even; scaling is exact here
        let scale = 10f64.powi(decimals as i32);
        return (value * scale).round() / scale;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Validate a parameter set and compute its recipe.
///
/// Out-of-range values and unknown ids are rejected; nothing is clamped.
pub fn compute_recipe(params: &ParameterSet, tables: &ReferenceTables) -> CalcResult<Recipe> {
    let refs = params.validate(tables).map_err(|err| {
        tracing::warn!(error = %err, "rejected dough parameters");
        err
    })?;
    Ok(recipe::calculate(params, refs.yeast, refs.poolish))
}

/// Build the kneading plan. Total for every enum and numeric input.
pub fn compute_kneading_plan(
    method: KneadingMethod,
    temp_c: f64,
    hydration_pct: f64,
    strength: FlourStrength,
    preferment: Preferment,
) -> KneadingPlan {
    kneading::generate(method, temp_c, hydration_pct, strength, preferment)
}

/// Everything derived from one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakePlan {
    pub recipe: Recipe,
    pub kneading: KneadingPlan,
}

/// Validate once, then compute the recipe and the kneading plan together.
pub fn compute_bake_plan(params: &ParameterSet, tables: &ReferenceTables) -> CalcResult<BakePlan> {
    let recipe = compute_recipe(params, tables)?;
    let strength = tables.flour(&params.flour_preset)?.strength;
    let kneading = compute_kneading_plan(
        params.kneading_method,
        params.temp_c,
        params.hydration_pct,
        strength,
        params.preferment,
    );
    Ok(BakePlan { recipe, kneading })
}
