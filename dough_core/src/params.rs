//! # Parameter Set
//!
//! The input record for one calculation pass, plus the bounds every field
//! must respect and the reconciliation rule applied when the flour preset
//! changes.
//!
//! ## Example
//!
//! ```rust
//! use dough_core::ingredients::ReferenceTables;
//! use dough_core::params::ParameterSet;
//!
//! let tables = ReferenceTables::builtin();
//! let mut params = ParameterSet::default();
//! params.hydration_pct = 70.0;
//! params.ferment_hours = 24;
//!
//! // Pastry flour tops out at 58% hydration and 8 hours
//! params.apply_flour_preset("pastry", tables).unwrap();
//! assert_eq!(params.hydration_pct, 58.0);
//! assert_eq!(params.ferment_hours, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::ingredients::{FlourPreset, PoolishFermentOption, ReferenceTables, YeastType};

/// Shortest total fermentation accepted, hours
pub const MIN_FERMENT_HOURS: u32 = 2;
/// Salt bounds, percent of flour
pub const SALT_PCT_RANGE: (f64, f64) = (1.5, 4.0);
/// Ambient temperature bounds, °C
pub const TEMP_C_RANGE: (f64, f64) = (4.0, 35.0);
/// Share of total flour that may go into a poolish, percent
pub const POOLISH_PCT_RANGE: (f64, f64) = (20.0, 60.0);

/// How the dough is developed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KneadingMethod {
    #[default]
    Hand,
    Machine,
}

impl KneadingMethod {
    pub const ALL: [KneadingMethod; 2] = [KneadingMethod::Hand, KneadingMethod::Machine];

    pub fn display_name(&self) -> &'static str {
        match self {
            KneadingMethod::Hand => "By Hand",
            KneadingMethod::Machine => "Stand Mixer",
        }
    }
}

impl std::fmt::Display for KneadingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Whether part of the flour is pre-fermented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preferment {
    /// Everything mixed at once, opened with an autolyse rest
    #[default]
    Direct,
    /// A 100% hydration pre-ferment made ahead of the final dough
    Poolish,
}

impl Preferment {
    pub const ALL: [Preferment; 2] = [Preferment::Direct, Preferment::Poolish];

    pub fn is_poolish(&self) -> bool {
        matches!(self, Preferment::Poolish)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Preferment::Direct => "Direct / Autolyse",
            Preferment::Poolish => "Poolish",
        }
    }
}

impl std::fmt::Display for Preferment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Input parameters for one dough.
///
/// ## JSON Example
///
/// ```json
/// {
///   "balls": 4,
///   "ball_weight_g": 250.0,
///   "flour_preset": "bread_pizza",
///   "hydration_pct": 65.0,
///   "salt_pct": 2.8,
///   "yeast_type": "fresh",
///   "ferment_hours": 24,
///   "temp_c": 22.0,
///   "kneading_method": "hand",
///   "preferment": "direct",
///   "poolish_pct": 40.0,
///   "poolish_option": "12h"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Number of dough balls (≥ 1)
    pub balls: u32,
    /// Weight of each ball in grams
    pub ball_weight_g: f64,
    /// Flour preset id
    pub flour_preset: String,
    /// Water as percent of flour, within the preset's window
    pub hydration_pct: f64,
    /// Salt as percent of flour
    pub salt_pct: f64,
    /// Yeast type id
    pub yeast_type: String,
    /// Total fermentation of the (final) dough, whole hours
    pub ferment_hours: u32,
    /// Ambient temperature in °C
    pub temp_c: f64,
    pub kneading_method: KneadingMethod,
    pub preferment: Preferment,
    /// Share of total flour that goes into the poolish, percent
    pub poolish_pct: f64,
    /// Poolish ferment option id
    pub poolish_option: String,
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            balls: 4,
            ball_weight_g: 250.0,
            flour_preset: "bread_pizza".to_string(),
            hydration_pct: 65.0,
            salt_pct: 2.8,
            yeast_type: "fresh".to_string(),
            ferment_hours: 24,
            temp_c: 22.0,
            kneading_method: KneadingMethod::Hand,
            preferment: Preferment::Direct,
            poolish_pct: 40.0,
            poolish_option: "12h".to_string(),
        }
    }
}

/// The table entries a parameter set refers to
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRefs<'a> {
    pub flour: &'a FlourPreset,
    pub yeast: &'a YeastType,
    pub poolish: &'a PoolishFermentOption,
}

impl ParameterSet {
    /// Total dough mass T = balls × ball weight (g)
    pub fn total_dough_g(&self) -> f64 {
        self.balls as f64 * self.ball_weight_g
    }

    /// Resolve every id against the tables. Unknown ids fail fast.
    pub fn resolve<'a>(&self, tables: &'a ReferenceTables) -> CalcResult<ResolvedRefs<'a>> {
        Ok(ResolvedRefs {
            flour: tables.flour(&self.flour_preset)?,
            yeast: tables.yeast(&self.yeast_type)?,
            poolish: tables.poolish_option(&self.poolish_option)?,
        })
    }

    /// Resolve ids and check every field against its bounds.
    ///
    /// Out-of-range values are rejected, never clamped here; clamping only
    /// happens through [`ParameterSet::apply_flour_preset`].
    pub fn validate<'a>(&self, tables: &'a ReferenceTables) -> CalcResult<ResolvedRefs<'a>> {
        let refs = self.resolve(tables)?;
        let flour = refs.flour;

        if self.balls < 1 {
            return Err(CalcError::invalid_input(
                "balls",
                self.balls.to_string(),
                "At least one dough ball is required",
            ));
        }
        if !(self.ball_weight_g.is_finite() && self.ball_weight_g > 0.0) {
            return Err(CalcError::invalid_input(
                "ball_weight_g",
                self.ball_weight_g.to_string(),
                "Ball weight must be positive",
            ));
        }
        if !(flour.hydration_min()..=flour.hydration_max()).contains(&self.hydration_pct) {
            return Err(CalcError::invalid_input(
                "hydration_pct",
                self.hydration_pct.to_string(),
                format!(
                    "{} takes {}–{}% hydration",
                    flour.label,
                    flour.hydration_min(),
                    flour.hydration_max()
                ),
            ));
        }
        check_range("salt_pct", self.salt_pct, SALT_PCT_RANGE, "%")?;
        if !(MIN_FERMENT_HOURS..=flour.max_ferment_hours).contains(&self.ferment_hours) {
            return Err(CalcError::invalid_input(
                "ferment_hours",
                self.ferment_hours.to_string(),
                format!(
                    "{} ferments {}–{} hours",
                    flour.label, MIN_FERMENT_HOURS, flour.max_ferment_hours
                ),
            ));
        }
        check_range("temp_c", self.temp_c, TEMP_C_RANGE, "°C")?;
        check_range("poolish_pct", self.poolish_pct, POOLISH_PCT_RANGE, "%")?;

        Ok(refs)
    }

    /// Clamp hydration and ferment hours into the preset's limits.
    ///
    /// No other field is touched.
    pub fn clamp_to_preset(&mut self, flour: &FlourPreset) {
        let hydration = flour.clamp_hydration(self.hydration_pct);
        let hours = flour.clamp_ferment_hours(self.ferment_hours);
        if hydration != self.hydration_pct || hours != self.ferment_hours {
            tracing::debug!(
                preset = %flour.id,
                from_hydration = self.hydration_pct,
                to_hydration = hydration,
                from_hours = self.ferment_hours,
                to_hours = hours,
                "clamped parameters to flour preset"
            );
        }
        self.hydration_pct = hydration;
        self.ferment_hours = hours;
    }

    /// Switch to another flour preset and reconcile dependent fields.
    pub fn apply_flour_preset(&mut self, id: &str, tables: &ReferenceTables) -> CalcResult<()> {
        let flour = tables.flour(id)?;
        self.flour_preset = flour.id.clone();
        self.clamp_to_preset(flour);
        Ok(())
    }

    /// One-line caption of the parameter set.
    ///
    /// e.g. `4 × 250g balls · Bread / Pizza · 65% hydration · Fresh Yeast · 24h at 22°C`
    pub fn summary(&self, tables: &ReferenceTables) -> CalcResult<String> {
        let flour = tables.flour(&self.flour_preset)?;
        let yeast = tables.yeast(&self.yeast_type)?;
        let mut line = format!(
            "{} × {}g balls · {} · {}% hydration · {} · {}h at {}°C",
            self.balls,
            self.ball_weight_g,
            flour.label,
            self.hydration_pct,
            yeast.label,
            self.ferment_hours,
            self.temp_c
        );
        if self.preferment.is_poolish() {
            line.push_str(&format!(" · {}% poolish", self.poolish_pct));
        }
        Ok(line)
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64), unit: &str) -> CalcResult<()> {
    if !(min..=max).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("Must be between {}{} and {}{}", min, unit, max, unit),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static ReferenceTables {
        ReferenceTables::builtin()
    }

    fn field_of(err: CalcError) -> String {
        match err {
            CalcError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_default_is_valid() {
        let params = ParameterSet::default();
        let refs = params.validate(tables()).unwrap();
        assert_eq!(refs.flour.id, "bread_pizza");
        assert_eq!(params.total_dough_g(), 1000.0);
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let cases: Vec<(&str, Box<dyn Fn(&mut ParameterSet)>)> = vec![
            ("balls", Box::new(|p: &mut ParameterSet| p.balls = 0)),
            ("ball_weight_g", Box::new(|p: &mut ParameterSet| p.ball_weight_g = 0.0)),
            ("hydration_pct", Box::new(|p: &mut ParameterSet| p.hydration_pct = 75.0)),
            ("hydration_pct", Box::new(|p: &mut ParameterSet| p.hydration_pct = 59.5)),
            ("salt_pct", Box::new(|p: &mut ParameterSet| p.salt_pct = 4.1)),
            ("salt_pct", Box::new(|p: &mut ParameterSet| p.salt_pct = f64::NAN)),
            ("ferment_hours", Box::new(|p: &mut ParameterSet| p.ferment_hours = 1)),
            ("ferment_hours", Box::new(|p: &mut ParameterSet| p.ferment_hours = 49)),
            ("temp_c", Box::new(|p: &mut ParameterSet| p.temp_c = 36.0)),
            ("poolish_pct", Box::new(|p: &mut ParameterSet| p.poolish_pct = 65.0)),
        ];
        for (field, mutate) in cases {
            let mut params = ParameterSet::default();
            mutate(&mut params);
            let err = params.validate(tables()).unwrap_err();
            assert_eq!(field_of(err), field);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut params = ParameterSet::default();
        params.hydration_pct = 72.0;
        params.salt_pct = 1.5;
        params.ferment_hours = 48;
        params.temp_c = 4.0;
        params.poolish_pct = 60.0;
        assert!(params.validate(tables()).is_ok());
    }

    #[test]
    fn test_unknown_ids_rejected() {
        let mut params = ParameterSet::default();
        params.yeast_type = "sourdough".to_string();
        assert_eq!(params.validate(tables()).unwrap_err().error_code(), "UNKNOWN_IDENTIFIER");

        let mut params = ParameterSet::default();
        params.poolish_option = "2h".to_string();
        assert_eq!(params.validate(tables()).unwrap_err().error_code(), "UNKNOWN_IDENTIFIER");
    }

    #[test]
    fn test_apply_flour_preset_clamps_only_dependent_fields() {
        let mut params = ParameterSet::default();
        params.hydration_pct = 70.0;
        params.ferment_hours = 30;
        params.preferment = Preferment::Poolish;
        let before = params.clone();

        params.apply_flour_preset("allpurpose", tables()).unwrap();

        assert_eq!(params.flour_preset, "allpurpose");
        assert_eq!(params.hydration_pct, 63.0);
        assert_eq!(params.ferment_hours, 16);

        let mut expected = before;
        expected.flour_preset = "allpurpose".to_string();
        expected.hydration_pct = 63.0;
        expected.ferment_hours = 16;
        assert_eq!(params, expected);
        assert!(params.validate(tables()).is_ok());
    }

    #[test]
    fn test_apply_flour_preset_raises_low_hydration() {
        let mut params = ParameterSet::default();
        params.apply_flour_preset("manitoba", tables()).unwrap();
        assert_eq!(params.hydration_pct, 65.0);
        assert_eq!(params.ferment_hours, 24);

        params.hydration_pct = 55.0;
        params.apply_flour_preset("manitoba", tables()).unwrap();
        assert_eq!(params.hydration_pct, 65.0);
    }

    #[test]
    fn test_apply_unknown_preset_leaves_params_untouched() {
        let mut params = ParameterSet::default();
        assert!(params.apply_flour_preset("spelt", tables()).is_err());
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn test_summary() {
        let params = ParameterSet::default();
        assert_eq!(
            params.summary(tables()).unwrap(),
            "4 × 250g balls · Bread / Pizza · 65% hydration · Fresh Yeast · 24h at 22°C"
        );

        let mut params = ParameterSet::default();
        params.preferment = Preferment::Poolish;
        assert!(params.summary(tables()).unwrap().ends_with(" · 40% poolish"));
    }

    #[test]
    fn test_json_roundtrip() {
        let params = ParameterSet::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        assert!(json.contains("\"kneading_method\": \"hand\""));
        let roundtrip: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);
    }
}
