//! # dough_core - Dough Calculation Engine
//!
//! `dough_core` turns a handful of baking parameters into a complete dough
//! plan: ingredient masses, a fermentation split and a timed kneading
//! procedure. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Injected tables**: Flour, yeast and poolish data are passed in, never looked up globally
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use dough_core::{compute_bake_plan, ParameterSet, ReferenceTables};
//!
//! let tables = ReferenceTables::builtin();
//! let mut params = ParameterSet::default();
//! params.apply_flour_preset("manitoba", tables).unwrap();
//! params.hydration_pct = 70.0;
//!
//! let plan = compute_bake_plan(&params, tables).unwrap();
//! println!("{} g flour, {} g water", plan.recipe.flour_g, plan.recipe.water_g);
//!
//! let json = serde_json::to_string_pretty(&plan).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`params`] - Input parameter set, bounds and preset reconciliation
//! - [`ingredients`] - Flour presets, yeast types, poolish options
//! - [`calculations`] - Recipe, fermentation schedule and kneading plan
//! - [`errors`] - Structured error types
//! - [`file_io`] - TOML reference table files

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod ingredients;
pub mod params;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute_bake_plan, compute_kneading_plan, compute_recipe, BakePlan, KneadingPlan, Recipe};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_tables, save_tables};
pub use ingredients::{FlourPreset, FlourStrength, PoolishFermentOption, ReferenceTables, YeastType};
pub use params::{KneadingMethod, ParameterSet, Preferment};
