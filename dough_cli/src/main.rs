//! # Dough Calculator CLI
//!
//! Command-line front end for `dough_core`. Builds a parameter set from
//! flags, applies the flour preset's limits the same way the calculator UI
//! does, and prints the recipe, fermentation schedule and kneading plan.
//!
//! ```text
//! dough --balls 6 --ball-weight 270 --flour manitoba --hydration 72 \
//!       --preferment poolish --poolish-time 16h --method machine
//! dough --json > plan.json
//! RUST_LOG=dough_core=debug dough --temp 28
//! ```

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use dough_core::{compute_bake_plan, load_tables, save_tables, KneadingMethod, ParameterSet, Preferment, ReferenceTables};

#[derive(Parser, Debug)]
#[command(name = "dough", version, about = "Pizza and bread dough calculator")]
struct Args {
    /// Number of dough balls
    #[arg(long, default_value_t = 4)]
    balls: u32,

    /// Weight of each ball in grams
    #[arg(long, default_value_t = 250.0)]
    ball_weight: f64,

    /// Flour preset id (pastry, allpurpose, bread_pizza, manitoba)
    #[arg(long, default_value = "bread_pizza")]
    flour: String,

    /// Hydration percent; defaults to 65% clamped into the flour's range
    #[arg(long)]
    hydration: Option<f64>,

    /// Salt percent of flour
    #[arg(long, default_value_t = 2.8)]
    salt: f64,

    /// Yeast type id (fresh, active_dry, instant)
    #[arg(long, default_value = "fresh")]
    yeast: String,

    /// Total fermentation hours; defaults to 24 clamped to the flour's maximum
    #[arg(long)]
    hours: Option<u32>,

    /// Room temperature in °C
    #[arg(long, default_value_t = 22.0)]
    temp: f64,

    /// Kneading method
    #[arg(long, value_enum, default_value_t = MethodArg::Hand)]
    method: MethodArg,

    /// Preferment
    #[arg(long, value_enum, default_value_t = PrefermentArg::Direct)]
    preferment: PrefermentArg,

    /// Percent of total flour that goes into the poolish
    #[arg(long, default_value_t = 40.0)]
    poolish_pct: f64,

    /// Poolish ferment option id (8h, 12h, 16h)
    #[arg(long, default_value = "12h")]
    poolish_time: String,

    /// Load reference tables from a TOML file instead of the built-in set
    #[arg(long, value_name = "FILE")]
    tables: Option<PathBuf>,

    /// Write the active reference tables to a TOML file and exit
    #[arg(long, value_name = "FILE")]
    dump_tables: Option<PathBuf>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MethodArg {
    /// Slap and fold or knead on the bench
    Hand,
    /// Stand mixer with dough hook
    Machine,
}

impl From<MethodArg> for KneadingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Hand => KneadingMethod::Hand,
            MethodArg::Machine => KneadingMethod::Machine,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PrefermentArg {
    /// All ingredients mixed at once
    Direct,
    /// 100% hydration pre-ferment made hours ahead
    Poolish,
}

impl From<PrefermentArg> for Preferment {
    fn from(arg: PrefermentArg) -> Self {
        match arg {
            PrefermentArg::Direct => Preferment::Direct,
            PrefermentArg::Poolish => Preferment::Poolish,
        }
    }
}

impl Args {
    /// Build the parameter set, reconciling defaults with the flour preset.
    ///
    /// Explicit `--hydration` / `--hours` values are kept as given so that
    /// out-of-range input is reported instead of silently changed.
    fn parameter_set(&self, tables: &ReferenceTables) -> Result<ParameterSet> {
        let mut params = ParameterSet {
            balls: self.balls,
            ball_weight_g: self.ball_weight,
            salt_pct: self.salt,
            yeast_type: self.yeast.clone(),
            temp_c: self.temp,
            kneading_method: self.method.into(),
            preferment: self.preferment.into(),
            poolish_pct: self.poolish_pct,
            poolish_option: self.poolish_time.clone(),
            ..ParameterSet::default()
        };
        params
            .apply_flour_preset(&self.flour, tables)
            .with_context(|| format!("selecting flour preset '{}'", self.flour))?;

        if let Some(hydration) = self.hydration {
            params.hydration_pct = hydration;
        }
        if let Some(hours) = self.hours {
            params.ferment_hours = hours;
        }
        Ok(params)
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let tables = match &args.tables {
        Some(path) => load_tables(path).with_context(|| format!("loading tables from {}", path.display()))?,
        None => ReferenceTables::builtin().clone(),
    };

    if let Some(path) = &args.dump_tables {
        save_tables(&tables, path).with_context(|| format!("writing tables to {}", path.display()))?;
        println!("Reference tables written to {}", path.display());
        return Ok(());
    }

    let params = args.parameter_set(&tables)?;
    tracing::debug!(?params, "parameters");

    let plan = compute_bake_plan(&params, &tables).context("computing dough plan")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render::report(&params, &tables, &plan)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["dough"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_parameter_set_default() {
        let args = parse(&[]);
        let params = args.parameter_set(ReferenceTables::builtin()).unwrap();
        assert_eq!(params, ParameterSet::default());
    }

    #[test]
    fn test_flour_preset_clamps_default_hydration_and_hours() {
        let args = parse(&["--flour", "pastry"]);
        let params = args.parameter_set(ReferenceTables::builtin()).unwrap();
        assert_eq!(params.hydration_pct, 58.0);
        assert_eq!(params.ferment_hours, 8);
    }

    #[test]
    fn test_explicit_out_of_range_hydration_is_rejected() {
        let args = parse(&["--flour", "pastry", "--hydration", "70"]);
        let tables = ReferenceTables::builtin();
        let params = args.parameter_set(tables).unwrap();
        assert!(compute_bake_plan(&params, tables).is_err());
    }

    #[test]
    fn test_enum_flags() {
        let args = parse(&["--method", "machine", "--preferment", "poolish"]);
        assert_eq!(args.method, MethodArg::Machine);
        assert_eq!(args.preferment, PrefermentArg::Poolish);
        let params = args.parameter_set(ReferenceTables::builtin()).unwrap();
        assert_eq!(params.kneading_method, KneadingMethod::Machine);
        assert_eq!(params.preferment, Preferment::Poolish);
        assert!(Args::try_parse_from(["dough", "--method", "robot"]).is_err());
    }

    #[test]
    fn test_help_lists_enum_values() {
        use clap::CommandFactory;
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("machine"));
        assert!(help.contains("poolish"));
    }

    #[test]
    fn test_unknown_flour_is_an_error() {
        let args = parse(&["--flour", "spelt"]);
        assert!(args.parameter_set(ReferenceTables::builtin()).is_err());
    }
}
