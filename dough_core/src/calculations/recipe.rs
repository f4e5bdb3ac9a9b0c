//! # Recipe Calculation
//!
//! Solves ingredient masses from a fixed total dough weight using baker's
//! percentages, then doses yeast from temperature and fermentation time.
//!
//! ## Mass Solve
//!
//! ```text
//! T     = balls × ball_weight
//! flour = T / (1 + hydration/100 + salt/100 + 0.01)
//! water = flour × hydration/100
//! salt  = flour × salt/100
//! ```
//!
//! The `0.01` term reserves roughly 1% of flour mass for yeast so the solve
//! stays linear. The actual yeast mass is computed separately:
//!
//! ```text
//! yeast = max(0.1, flour × 0.003 × f_temp × f_time × yeast_factor)
//! ```
//!
//! ## Poolish
//!
//! A share of the flour goes into a 100% hydration poolish dosed from the
//! poolish option table. The final dough takes the remaining flour and water
//! and gets no extra yeast.

use serde::{Deserialize, Serialize};

use super::fermentation::{self, FermentationSchedule};
use super::round_to;
use crate::ingredients::{PoolishFermentOption, YeastType};
use crate::params::{ParameterSet, Preferment};

/// Flour mass reserved for yeast in the mass solve
const YEAST_ALLOWANCE: f64 = 0.01;
/// Fresh yeast reference dose, fraction of flour mass
const BASE_FRESH_YEAST: f64 = 0.003;
/// Smallest final-dough yeast dose reported (g)
pub const MIN_YEAST_G: f64 = 0.1;
/// Smallest poolish yeast dose reported (g)
pub const MIN_POOLISH_YEAST_G: f64 = 0.05;

/// Ambient temperature (°C, inclusive upper bound) → yeast multiplier
const TEMP_YEAST_STEPS: [(f64, f64); 6] = [
    (4.0, 0.25),
    (10.0, 0.4),
    (18.0, 0.7),
    (22.0, 1.0),
    (26.0, 1.3),
    (30.0, 1.8),
];
const TEMP_YEAST_ABOVE: f64 = 2.2;

/// Total ferment hours (inclusive upper bound) → yeast multiplier
const TIME_YEAST_STEPS: [(f64, f64); 5] = [
    (4.0, 2.5),
    (8.0, 1.5),
    (16.0, 1.0),
    (24.0, 0.6),
    (48.0, 0.3),
];
const TIME_YEAST_ABOVE: f64 = 0.15;

fn step_lookup(steps: &[(f64, f64)], value: f64, above: f64) -> f64 {
    steps
        .iter()
        .find(|(limit, _)| value <= *limit)
        .map(|(_, factor)| *factor)
        .unwrap_or(above)
}

/// Yeast multiplier for the ambient temperature.
///
/// Non-decreasing in temperature.
pub fn temperature_yeast_factor(temp_c: f64) -> f64 {
    step_lookup(&TEMP_YEAST_STEPS, temp_c, TEMP_YEAST_ABOVE)
}

/// Yeast multiplier for the total fermentation time.
///
/// Non-increasing in hours.
pub fn time_yeast_factor(ferment_hours: u32) -> f64 {
    step_lookup(&TIME_YEAST_STEPS, ferment_hours as f64, TIME_YEAST_ABOVE)
}

/// Ingredient masses for one dough.
///
/// Gram masses are rounded to whole grams, except salt (0.1 g) and yeast
/// (0.1 g, or 0.01 g inside the poolish).
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_dough_g": 1000.0,
///   "flour_g": 592.0,
///   "water_g": 385.0,
///   "salt_g": 16.6,
///   "yeast_g": 1.1,
///   "schedule": { "bulk_hours": 2, "cold_hours": 22, "note": "..." },
///   "poolish": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub total_dough_g: f64,
    pub flour_g: f64,
    pub water_g: f64,
    pub salt_g: f64,
    /// Yeast from the temperature/time model, floored at 0.1 g
    pub yeast_g: f64,
    pub schedule: FermentationSchedule,
    /// Present only for the poolish method
    pub poolish: Option<PoolishRecipe>,
}

impl Recipe {
    /// Yeast to add when mixing the final dough.
    ///
    /// A poolish supplies all the leavening, so this is zero with a poolish.
    pub fn yeast_to_add_g(&self) -> f64 {
        if self.poolish.is_some() {
            0.0
        } else {
            self.yeast_g
        }
    }
}

/// The pre-ferment and what is left for the final dough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolishRecipe {
    pub flour_g: f64,
    /// Equal to `flour_g` (100% hydration)
    pub water_g: f64,
    pub yeast_g: f64,
    pub total_g: f64,
    pub remaining_flour_g: f64,
    /// Never negative; a low-hydration dough can put all its water in the poolish
    pub remaining_water_g: f64,
    pub ferment_hours: u32,
    pub ferment_label: String,
}

/// Compute ingredient masses and the fermentation schedule.
///
/// Inputs must already be validated; see [`super::compute_recipe`] for the
/// checked entry point.
pub fn calculate(params: &ParameterSet, yeast: &YeastType, poolish_option: &PoolishFermentOption) -> Recipe {
    let total_dough = params.total_dough_g();
    let flour = total_dough / (1.0 + params.hydration_pct / 100.0 + params.salt_pct / 100.0 + YEAST_ALLOWANCE);
    let water = flour * (params.hydration_pct / 100.0);
    let salt = flour * (params.salt_pct / 100.0);

    let temp_factor = temperature_yeast_factor(params.temp_c);
    let time_factor = time_yeast_factor(params.ferment_hours);
    let fresh_yeast = flour * BASE_FRESH_YEAST * temp_factor * time_factor;
    let yeast_g = yeast.from_fresh(fresh_yeast);

    let schedule = fermentation::schedule(params.ferment_hours, params.temp_c, params.preferment);

    let poolish = match params.preferment {
        Preferment::Direct => None,
        Preferment::Poolish => Some(poolish_recipe(flour, water, params.poolish_pct, yeast, poolish_option)),
    };

    tracing::debug!(
        total_dough,
        flour,
        temp_factor,
        time_factor,
        yeast = %yeast.id,
        yeast_g,
        "recipe calculated"
    );

    Recipe {
        total_dough_g: total_dough.round(),
        flour_g: flour.round(),
        water_g: water.round(),
        salt_g: round_to(salt, 1),
        yeast_g: round_to(yeast_g.max(MIN_YEAST_G), 1),
        schedule,
        poolish,
    }
}

fn poolish_recipe(
    flour: f64,
    water: f64,
    poolish_pct: f64,
    yeast: &YeastType,
    option: &PoolishFermentOption,
) -> PoolishRecipe {
    let poolish_flour = flour * (poolish_pct / 100.0);
    let poolish_water = poolish_flour;
    let poolish_yeast = yeast.from_fresh(option.fresh_yeast_for(poolish_flour));

    PoolishRecipe {
        flour_g: poolish_flour.round(),
        water_g: poolish_water.round(),
        yeast_g: round_to(poolish_yeast.max(MIN_POOLISH_YEAST_G), 2),
        total_g: (poolish_flour + poolish_water + poolish_yeast).round(),
        remaining_flour_g: (flour - poolish_flour).round(),
        remaining_water_g: (water - poolish_water).max(0.0).round(),
        ferment_hours: option.hours,
        ferment_label: option.label.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredients::ReferenceTables;

    fn run(params: &ParameterSet) -> Recipe {
        let tables = ReferenceTables::builtin();
        let refs = params.validate(tables).unwrap();
        calculate(params, refs.yeast, refs.poolish)
    }

    #[test]
    fn test_temperature_factor_steps() {
        let cases = [
            (4.0, 0.25),
            (5.0, 0.4),
            (10.0, 0.4),
            (18.0, 0.7),
            (22.0, 1.0),
            (22.5, 1.3),
            (26.0, 1.3),
            (30.0, 1.8),
            (31.0, 2.2),
            (35.0, 2.2),
        ];
        for (temp, expected) in cases {
            assert_eq!(temperature_yeast_factor(temp), expected, "temp {}", temp);
        }
    }

    #[test]
    fn test_time_factor_steps() {
        let cases = [(2, 2.5), (4, 2.5), (5, 1.5), (8, 1.5), (16, 1.0), (24, 0.6), (48, 0.3), (49, 0.15), (72, 0.15)];
        for (hours, expected) in cases {
            assert_eq!(time_yeast_factor(hours), expected, "hours {}", hours);
        }
    }

    #[test]
    fn test_reference_direct_dough() {
        let recipe = run(&ParameterSet::default());

        // flour = 1000 / 1.688 = 592.42
        assert_eq!(recipe.total_dough_g, 1000.0);
        assert_eq!(recipe.flour_g, 592.0);
        assert_eq!(recipe.water_g, 385.0);
        assert!((recipe.salt_g - 16.6).abs() < 1e-9);
        // 592.42 × 0.003 × 1.0 × 0.6 = 1.07
        assert!((recipe.yeast_g - 1.1).abs() < 1e-9);
        assert_eq!(recipe.schedule.bulk_hours, 2);
        assert_eq!(recipe.schedule.cold_hours, 22);
        assert!(recipe.poolish.is_none());
        assert_eq!(recipe.yeast_to_add_g(), recipe.yeast_g);
    }

    #[test]
    fn test_yeast_rounds_from_stored_value() {
        let params = ParameterSet {
            balls: 1,
            ball_weight_g: 275.0,
            hydration_pct: 60.0,
            salt_pct: 4.0,
            ferment_hours: 9,
            temp_c: 15.0,
            ..ParameterSet::default()
        };
        // 166.67 × 0.003 × 0.7 × 1.0 is stored as 0.34999…
        let recipe = run(&params);
        assert_eq!(recipe.yeast_g, 0.3);
        assert_eq!(recipe.salt_g, 6.7);
    }

    #[test]
    fn test_masses_sum_to_total_within_yeast_allowance() {
        let tables = ReferenceTables::builtin();
        for flour in &tables.flours {
            for yeast in &tables.yeasts {
                for (temp, hours) in [(4.0, 2), (22.0, 8), (35.0, 2), (18.0, flour.max_ferment_hours)] {
                    let mut params = ParameterSet::default();
                    params.apply_flour_preset(&flour.id, tables).unwrap();
                    params.yeast_type = yeast.id.clone();
                    params.temp_c = temp;
                    params.ferment_hours = hours;
                    let r = run(&params);
                    let sum = r.flour_g + r.water_g + r.salt_g + r.yeast_g;
                    let tolerance = YEAST_ALLOWANCE * r.flour_g + 1.5;
                    assert!(
                        (sum - r.total_dough_g).abs() <= tolerance,
                        "{} {}: sum {} vs total {}",
                        flour.id,
                        yeast.id,
                        sum,
                        r.total_dough_g
                    );
                }
            }
        }
    }

    #[test]
    fn test_yeast_monotonic_in_hours() {
        let mut params = ParameterSet::default();
        params.apply_flour_preset("manitoba", ReferenceTables::builtin()).unwrap();
        params.balls = 10;
        let mut previous = f64::INFINITY;
        for hours in 2..=72 {
            params.ferment_hours = hours;
            let yeast = run(&params).yeast_g;
            assert!(yeast <= previous, "yeast rose at {}h", hours);
            previous = yeast;
        }
    }

    #[test]
    fn test_yeast_monotonic_in_temperature() {
        let mut params = ParameterSet::default();
        params.balls = 10;
        let mut previous = 0.0;
        for temp in 4..=35 {
            params.temp_c = temp as f64;
            let yeast = run(&params).yeast_g;
            assert!(yeast >= previous, "yeast fell at {}°C", temp);
            previous = yeast;
        }
    }

    #[test]
    fn test_yeast_type_scaling() {
        let mut params = ParameterSet::default();
        params.balls = 10;
        params.ferment_hours = 4;
        params.temp_c = 30.0;
        let fresh = run(&params).yeast_g;
        params.yeast_type = "instant".to_string();
        let instant = run(&params).yeast_g;
        // 1481.04 × 0.003 × 1.8 × 2.5 = 19.99 fresh, 6.6 instant
        assert!((fresh - 20.0).abs() < 1e-9);
        assert!((instant - 6.6).abs() < 1e-9);
    }

    #[test]
    fn test_yeast_floor() {
        let mut params = ParameterSet::default();
        params.apply_flour_preset("manitoba", ReferenceTables::builtin()).unwrap();
        params.balls = 1;
        params.ball_weight_g = 150.0;
        params.temp_c = 4.0;
        params.ferment_hours = 72;
        params.yeast_type = "instant".to_string();
        assert_eq!(run(&params).yeast_g, MIN_YEAST_G);
    }

    #[test]
    fn test_reference_poolish_dough() {
        let mut params = ParameterSet::default();
        params.preferment = Preferment::Poolish;
        let recipe = run(&params);
        let poolish = recipe.poolish.clone().unwrap();

        // 40% of 592.42 g = 236.97 g
        assert_eq!(poolish.flour_g, 237.0);
        assert_eq!(poolish.water_g, 237.0);
        // 236.97 × 0.05 / 100 = 0.118
        assert!((poolish.yeast_g - 0.12).abs() < 1e-9);
        assert_eq!(poolish.total_g, 474.0);
        assert_eq!(poolish.remaining_flour_g, 355.0);
        assert_eq!(poolish.remaining_water_g, 148.0);
        assert_eq!(poolish.ferment_hours, 12);
        assert_eq!(poolish.ferment_label, "12 hours");
        assert_eq!(recipe.yeast_to_add_g(), 0.0);
    }

    #[test]
    fn test_poolish_flour_split_conserves_flour() {
        let tables = ReferenceTables::builtin();
        for pct in [20.0, 25.0, 35.0, 50.0, 60.0] {
            for option in &tables.poolish_options {
                let mut params = ParameterSet::default();
                params.preferment = Preferment::Poolish;
                params.poolish_pct = pct;
                params.poolish_option = option.id.clone();
                let recipe = run(&params);
                let poolish = recipe.poolish.unwrap();
                assert!((poolish.flour_g + poolish.remaining_flour_g - recipe.flour_g).abs() <= 1.0);
                assert_eq!(poolish.water_g, poolish.flour_g);
            }
        }
    }

    #[test]
    fn test_poolish_remaining_water_never_negative() {
        let mut params = ParameterSet::default();
        params.apply_flour_preset("pastry", ReferenceTables::builtin()).unwrap();
        params.hydration_pct = 50.0;
        params.preferment = Preferment::Poolish;
        params.poolish_pct = 60.0;
        let poolish = run(&params).poolish.unwrap();
        assert_eq!(poolish.remaining_water_g, 0.0);
    }

    #[test]
    fn test_poolish_yeast_floor() {
        let mut params = ParameterSet::default();
        params.balls = 1;
        params.ball_weight_g = 150.0;
        params.preferment = Preferment::Poolish;
        params.poolish_pct = 20.0;
        params.poolish_option = "16h".to_string();
        params.yeast_type = "instant".to_string();
        let poolish = run(&params).poolish.unwrap();
        assert_eq!(poolish.yeast_g, MIN_POOLISH_YEAST_G);
    }

    #[test]
    fn test_poolish_dose_ignores_final_dough_temperature() {
        let mut params = ParameterSet::default();
        params.preferment = Preferment::Poolish;
        params.poolish_option = "8h".to_string();
        let warm = {
            params.temp_c = 30.0;
            run(&params).poolish.unwrap().yeast_g
        };
        let cold = {
            params.temp_c = 8.0;
            run(&params).poolish.unwrap().yeast_g
        };
        assert_eq!(warm, cold);
    }
}
