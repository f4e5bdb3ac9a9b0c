//! # Reference Tables
//!
//! Static configuration data consumed by the calculators: flour presets,
//! yeast types and poolish ferment options. The tables are plain data, passed
//! explicitly into every computation, so they can be swapped for a TOML file
//! without touching the algorithms.
//!
//! ## Example
//!
//! ```rust
//! use dough_core::ingredients::ReferenceTables;
//!
//! let tables = ReferenceTables::builtin();
//! let flour = tables.flour("bread_pizza").unwrap();
//! assert_eq!(flour.hydration_range, [60.0, 72.0]);
//!
//! // Unknown ids are caller errors
//! assert!(tables.yeast("sourdough").is_err());
//! ```

pub mod flour;
pub mod poolish;
pub mod yeast;

pub use flour::{FlourPreset, FlourStrength};
pub use poolish::PoolishFermentOption;
pub use yeast::YeastType;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(|| ReferenceTables {
    flours: flour::builtin_flours(),
    yeasts: yeast::builtin_yeasts(),
    poolish_options: poolish::builtin_poolish_options(),
});

/// All reference data needed by one calculation pass.
///
/// ## TOML Layout
///
/// ```toml
/// [[flours]]
/// id = "bread_pizza"
/// # ...
///
/// [[yeasts]]
/// id = "fresh"
/// # ...
///
/// [[poolish_options]]
/// id = "12h"
/// # ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub flours: Vec<FlourPreset>,
    pub yeasts: Vec<YeastType>,
    pub poolish_options: Vec<PoolishFermentOption>,
}

impl ReferenceTables {
    /// The built-in tables, constructed once per process
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    /// Look up a flour preset by id
    pub fn flour(&self, id: &str) -> CalcResult<&FlourPreset> {
        self.flours
            .iter()
            .find(|f| f.id == id)
            .ok_or_else(|| CalcError::unknown_identifier("flour preset", id))
    }

    /// Look up a yeast type by id
    pub fn yeast(&self, id: &str) -> CalcResult<&YeastType> {
        self.yeasts
            .iter()
            .find(|y| y.id == id)
            .ok_or_else(|| CalcError::unknown_identifier("yeast type", id))
    }

    /// Look up a poolish ferment option by id
    pub fn poolish_option(&self, id: &str) -> CalcResult<&PoolishFermentOption> {
        self.poolish_options
            .iter()
            .find(|o| o.id == id)
            .ok_or_else(|| CalcError::unknown_identifier("poolish option", id))
    }

    /// Parse tables from TOML text and validate them
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let tables: ReferenceTables = toml::from_str(text)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Serialize tables to TOML text
    pub fn to_toml_string(&self) -> CalcResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every table: non-empty, unique ids, and per-entry invariants.
    pub fn validate(&self) -> CalcResult<()> {
        check_ids("flours", self.flours.iter().map(|f| f.id.as_str()))?;
        check_ids("yeasts", self.yeasts.iter().map(|y| y.id.as_str()))?;
        check_ids("poolish_options", self.poolish_options.iter().map(|o| o.id.as_str()))?;

        for flour in &self.flours {
            flour.validate()?;
        }
        for yeast in &self.yeasts {
            yeast.validate()?;
        }
        for option in &self.poolish_options {
            option.validate()?;
        }
        Ok(())
    }
}

fn check_ids<'a>(table: &str, ids: impl Iterator<Item = &'a str>) -> CalcResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CalcError::invalid_table(table, "entry with empty id"));
        }
        if !seen.insert(id) {
            tracing::warn!(table, id, "duplicate id in reference table");
            return Err(CalcError::invalid_table(table, format!("duplicate id '{}'", id)));
        }
    }
    if seen.is_empty() {
        return Err(CalcError::invalid_table(table, "table is empty"));
    }
    Ok(())
}
