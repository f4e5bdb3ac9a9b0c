//! Plain-text report of a bake plan.

use std::fmt::Write;

use anyhow::Result;

use dough_core::calculations::StepKind;
use dough_core::{BakePlan, ParameterSet, ReferenceTables};

const RULE: &str = "═══════════════════════════════════════════════";

pub fn report(params: &ParameterSet, tables: &ReferenceTables, plan: &BakePlan) -> Result<String> {
    let flour = tables.flour(&params.flour_preset)?;
    let yeast = tables.yeast(&params.yeast_type)?;
    let recipe = &plan.recipe;
    let mut out = String::new();

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  DOUGH PLAN")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", params.summary(tables)?)?;
    writeln!(out, "Flour: {} ({})", flour.label, flour.caption())?;
    writeln!(out)?;

    if let Some(poolish) = &recipe.poolish {
        writeln!(out, "Poolish ({}, mix {}h ahead at {}°C):", poolish.ferment_label, poolish.ferment_hours, params.temp_c)?;
        row(&mut out, "Flour", poolish.flour_g, "g")?;
        row(&mut out, "Water", poolish.water_g, "g")?;
        row(&mut out, &format!("{} Yeast", yeast.label), poolish.yeast_g, "g")?;
        row(&mut out, "Poolish Total", poolish.total_g, "g")?;
        writeln!(out)?;

        writeln!(out, "Final Dough:")?;
        row(&mut out, "Remaining Flour", poolish.remaining_flour_g, "g")?;
        row(&mut out, "Remaining Water", poolish.remaining_water_g, "g")?;
        row(&mut out, "Salt", recipe.salt_g, "g")?;
        writeln!(out)?;
        writeln!(out, "Totals:")?;
    } else {
        writeln!(out, "Recipe:")?;
    }
    row(&mut out, "Flour", recipe.flour_g, "g")?;
    row(&mut out, "Water", recipe.water_g, "g")?;
    row(&mut out, "Salt", recipe.salt_g, "g")?;
    if recipe.poolish.is_none() {
        row(&mut out, &yeast.label, recipe.yeast_to_add_g(), "g")?;
    }
    row(&mut out, "Total Dough", recipe.total_dough_g, "g")?;
    writeln!(out)?;

    writeln!(out, "Fermentation: {}", recipe.schedule.note)?;
    writeln!(out)?;

    let kneading = &plan.kneading;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  {} ({} active, {} rest, {} total)",
        params.kneading_method.display_name().to_uppercase(),
        format_minutes(kneading.total_active_min),
        format_minutes(kneading.total_rest_min),
        format_minutes(kneading.total_min)
    )?;
    writeln!(out, "{}", RULE)?;
    for (i, step) in kneading.steps.iter().enumerate() {
        let kind = match step.kind {
            StepKind::Active => "active",
            StepKind::Rest => "rest",
        };
        writeln!(
            out,
            "{:>2}. {} {} [{} min, {}]",
            i + 1,
            step.icon.glyph(),
            step.phase,
            step.duration_min,
            kind
        )?;
        writeln!(out, "    {}", step.action)?;
        if let Some(tip) = &step.tip {
            writeln!(out, "    tip: {}", tip)?;
        }
    }
    Ok(out)
}

fn row(out: &mut String, label: &str, value: f64, unit: &str) -> std::fmt::Result {
    writeln!(out, "  {:<18} {:>8}{}", label, value, unit)
}

fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
