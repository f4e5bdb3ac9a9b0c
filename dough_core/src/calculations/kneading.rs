//! # Kneading Plan
//!
//! Generates the ordered mixing and kneading procedure for a dough, with a
//! duration on every step. The plan is assembled from a fixed decision tree:
//!
//! ```text
//! method ─┬─ hand ────┬─ opening (poolish | direct)
//!         │           ├─ development (slap & fold + folds | two-stage knead)
//!         │           └─ final rest, divide & ball
//!         └─ machine ─┬─ opening (poolish | direct)
//!                     ├─ low speed, rest, medium speed [+ rest, final mix]
//!                     └─ final rest, divide & ball
//! ```
//!
//! Each branch is driven by a small set of classifications: [`TempBand`],
//! [`HydrationBand`], the flour's [`FlourStrength`] and the [`Preferment`].
//! Kneading durations scale as
//! `round(base(temp_band) × strength_multiplier × poolish_reduction)`;
//! rest durations come straight from the per-band table.
//!
//! ## Example
//!
//! ```rust
//! use dough_core::calculations::kneading::generate;
//! use dough_core::ingredients::FlourStrength;
//! use dough_core::params::{KneadingMethod, Preferment};
//!
//! let plan = generate(KneadingMethod::Hand, 22.0, 65.0, FlourStrength::Strong, Preferment::Direct);
//! assert_eq!(plan.total_min, plan.total_active_min + plan.total_rest_min);
//! assert_eq!(plan.steps.last().unwrap().phase, "Divide & Ball");
//! ```

use serde::{Deserialize, Serialize};

use crate::ingredients::FlourStrength;
use crate::params::{KneadingMethod, Preferment};

/// Below this temperature (°C) the dough is treated as cold
const COLD_BELOW_C: f64 = 20.0;
/// Above this temperature (°C) the dough is treated as warm
const WARM_ABOVE_C: f64 = 26.0;
/// Hydration (%) at which hand kneading switches to slap and fold
const HIGH_HYDRATION_PCT: f64 = 68.0;
const VERY_HIGH_HYDRATION_PCT: f64 = 75.0;
/// Kneading time multiplier for poolish doughs
const POOLISH_REDUCTION: f64 = 0.7;

// ============================================================================
// Classification
// ============================================================================

/// Ambient temperature band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempBand {
    Cold,
    Moderate,
    Warm,
}

impl TempBand {
    pub fn classify(temp_c: f64) -> Self {
        if temp_c < COLD_BELOW_C {
            TempBand::Cold
        } else if temp_c > WARM_ABOVE_C {
            TempBand::Warm
        } else {
            TempBand::Moderate
        }
    }
}

/// Dough hydration band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationBand {
    Normal,
    High,
    VeryHigh,
}

impl HydrationBand {
    pub fn classify(hydration_pct: f64) -> Self {
        if hydration_pct >= VERY_HIGH_HYDRATION_PCT {
            HydrationBand::VeryHigh
        } else if hydration_pct >= HIGH_HYDRATION_PCT {
            HydrationBand::High
        } else {
            HydrationBand::Normal
        }
    }

    /// High and very-high doughs are too slack for a classic knead
    pub fn is_slack(&self) -> bool {
        !matches!(self, HydrationBand::Normal)
    }
}

/// Base minutes of one step, per temperature band
#[derive(Debug, Clone, Copy)]
struct BandMinutes {
    cold: u32,
    moderate: u32,
    warm: u32,
}

impl BandMinutes {
    const fn new(cold: u32, moderate: u32, warm: u32) -> Self {
        BandMinutes { cold, moderate, warm }
    }

    const fn flat(minutes: u32) -> Self {
        BandMinutes::new(minutes, minutes, minutes)
    }

    fn pick(&self, band: TempBand) -> u32 {
        match band {
            TempBand::Cold => self.cold,
            TempBand::Moderate => self.moderate,
            TempBand::Warm => self.warm,
        }
    }
}

// Hand method (cold, moderate, warm)
const HAND_COMBINE: u32 = 3;
const HAND_SHORT_AUTOLYSE: BandMinutes = BandMinutes::new(25, 18, 12);
const HAND_AUTOLYSE: BandMinutes = BandMinutes::new(40, 30, 20);
const HAND_SALT: BandMinutes = BandMinutes::flat(3);
const HAND_SLAP_AND_FOLD: BandMinutes = BandMinutes::flat(5);
const HAND_FOLD_REST: BandMinutes = BandMinutes::new(35, 30, 20);
const HAND_STRETCH_AND_FOLD: u32 = 2;
const HAND_FIRST_KNEAD: BandMinutes = BandMinutes::new(10, 8, 6);
const HAND_BENCH_REST: BandMinutes = BandMinutes::new(15, 10, 8);
const HAND_SECOND_KNEAD: BandMinutes = BandMinutes::new(8, 6, 4);
const HAND_FINAL_REST: BandMinutes = BandMinutes::new(20, 15, 10);

// Machine method (cold, moderate, warm)
const MACHINE_COMBINE: u32 = 2;
const MACHINE_SHORT_AUTOLYSE: BandMinutes = BandMinutes::new(20, 15, 10);
const MACHINE_AUTOLYSE: BandMinutes = BandMinutes::new(35, 25, 15);
const MACHINE_SALT: u32 = 2;
const MACHINE_LOW_SPEED: BandMinutes = BandMinutes::new(6, 4, 3);
const MACHINE_REST: BandMinutes = BandMinutes::new(10, 8, 8);
const MACHINE_MEDIUM_SPEED: BandMinutes = BandMinutes::new(5, 4, 3);
const MACHINE_EXTRA_REST: u32 = 10;
const MACHINE_FINAL_MIX: u32 = 2;
const MACHINE_FINAL_REST: BandMinutes = BandMinutes::new(15, 10, 8);

const DIVIDE_AND_BALL: u32 = 4;

// ============================================================================
// Plan types
// ============================================================================

/// Whether the baker is working or waiting during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Active,
    Rest,
}

/// Short icon tag for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepIcon {
    Poolish,
    Water,
    Salt,
    Hands,
    Sleep,
    Fold,
    Mixer,
    Ball,
}

impl StepIcon {
    /// Glyph for terminal or UI display
    pub fn glyph(&self) -> &'static str {
        match self {
            StepIcon::Poolish => "\u{1F32B}",
            StepIcon::Water => "\u{1F4A7}",
            StepIcon::Salt => "\u{1F9C2}",
            StepIcon::Hands => "\u{1F90C}",
            StepIcon::Sleep => "\u{1F634}",
            StepIcon::Fold => "\u{1F504}",
            StepIcon::Mixer => "\u{2699}",
            StepIcon::Ball => "\u{26AA}",
        }
    }
}

/// One step of the kneading procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub phase: String,
    pub icon: StepIcon,
    pub action: String,
    pub duration_min: u32,
    pub kind: StepKind,
    pub tip: Option<String>,
}

impl ProcessStep {
    fn active(phase: impl Into<String>, icon: StepIcon, action: impl Into<String>, duration_min: u32) -> Self {
        ProcessStep {
            phase: phase.into(),
            icon,
            action: action.into(),
            duration_min,
            kind: StepKind::Active,
            tip: None,
        }
    }

    fn rest(phase: impl Into<String>, icon: StepIcon, action: impl Into<String>, duration_min: u32) -> Self {
        ProcessStep {
            kind: StepKind::Rest,
            ..ProcessStep::active(phase, icon, action, duration_min)
        }
    }

    fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    fn with_optional_tip(mut self, tip: Option<&str>) -> Self {
        self.tip = tip.map(str::to_string);
        self
    }

    pub fn is_active(&self) -> bool {
        self.kind == StepKind::Active
    }
}

/// The full procedure with aggregated durations.
///
/// `total_min == total_active_min + total_rest_min`, and both sums are taken
/// over the already-rounded step durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KneadingPlan {
    pub steps: Vec<ProcessStep>,
    pub total_active_min: u32,
    pub total_rest_min: u32,
    pub total_min: u32,
}

impl KneadingPlan {
    fn from_steps(steps: Vec<ProcessStep>) -> Self {
        let total_active_min: u32 = steps.iter().filter(|s| s.is_active()).map(|s| s.duration_min).sum();
        let total_rest_min: u32 = steps.iter().filter(|s| !s.is_active()).map(|s| s.duration_min).sum();
        KneadingPlan {
            steps,
            total_active_min,
            total_rest_min,
            total_min: total_active_min + total_rest_min,
        }
    }

    /// Number of stretch-and-fold sets in the plan
    pub fn fold_sets(&self) -> usize {
        self.steps.iter().filter(|s| s.icon == StepIcon::Fold).count()
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Classified inputs shared by every branch
#[derive(Debug, Clone, Copy)]
struct PlanContext {
    temp: TempBand,
    hydration: HydrationBand,
    strength: f64,
    preferment: Preferment,
}

impl PlanContext {
    fn new(temp_c: f64, hydration_pct: f64, strength: FlourStrength, preferment: Preferment) -> Self {
        PlanContext {
            temp: TempBand::classify(temp_c),
            hydration: HydrationBand::classify(hydration_pct),
            strength: strength.kneading_multiplier(),
            preferment,
        }
    }

    fn is_poolish(&self) -> bool {
        self.preferment.is_poolish()
    }

    fn poolish_reduction(&self) -> f64 {
        if self.is_poolish() {
            POOLISH_REDUCTION
        } else {
            1.0
        }
    }

    /// Unscaled minutes for the current temperature band
    fn base(&self, minutes: BandMinutes) -> u32 {
        minutes.pick(self.temp)
    }

    /// Kneading minutes scaled by flour strength and poolish reduction
    fn scaled(&self, minutes: BandMinutes) -> u32 {
        (self.base(minutes) as f64 * self.strength * self.poolish_reduction()).round() as u32
    }

    fn by_temp<'a>(&self, cold: &'a str, moderate: &'a str, warm: &'a str) -> &'a str {
        match self.temp {
            TempBand::Cold => cold,
            TempBand::Moderate => moderate,
            TempBand::Warm => warm,
        }
    }

    fn by_preferment<'a>(&self, poolish: &'a str, direct: &'a str) -> &'a str {
        if self.is_poolish() {
            poolish
        } else {
            direct
        }
    }
}

/// Build the kneading plan for a dough.
pub fn generate(
    method: KneadingMethod,
    temp_c: f64,
    hydration_pct: f64,
    strength: FlourStrength,
    preferment: Preferment,
) -> KneadingPlan {
    let ctx = PlanContext::new(temp_c, hydration_pct, strength, preferment);

    let mut steps = Vec::new();
    match method {
        KneadingMethod::Hand => {
            hand_opening(&ctx, &mut steps);
            if ctx.hydration.is_slack() {
                hand_slap_and_fold(&ctx, &mut steps);
            } else {
                hand_two_stage_knead(&ctx, &mut steps);
            }
            hand_finish(&ctx, &mut steps);
        }
        KneadingMethod::Machine => {
            machine_opening(&ctx, &mut steps);
            machine_development(&ctx, &mut steps);
            machine_finish(&ctx, &mut steps);
        }
    }

    let plan = KneadingPlan::from_steps(steps);
    tracing::debug!(
        ?method,
        temp = ?ctx.temp,
        hydration = ?ctx.hydration,
        ?preferment,
        steps = plan.steps.len(),
        total_min = plan.total_min,
        "kneading plan generated"
    );
    plan
}

// ----------------------------------------------------------------------------
// Hand
// ----------------------------------------------------------------------------

fn hand_opening(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    match ctx.preferment {
        Preferment::Poolish => {
            steps.push(
                ProcessStep::active(
                    "Combine Poolish + Flour",
                    StepIcon::Poolish,
                    "Tip the ripe poolish into a bowl with the remaining flour and most of the remaining water. Mix by hand until no dry flour is left.",
                    HAND_COMBINE,
                )
                .with_tip("A ripe poolish is bubbly, slightly domed and smells sweet and yeasty"),
            );
            steps.push(
                ProcessStep::rest(
                    "Short Autolyse",
                    StepIcon::Water,
                    "Cover and rest so the new flour can hydrate and start forming gluten.",
                    ctx.base(HAND_SHORT_AUTOLYSE),
                )
                .with_tip("Shorter than a direct autolyse; the poolish has already built some gluten"),
            );
            steps.push(
                ProcessStep::active(
                    "Add Salt",
                    StepIcon::Salt,
                    "Dissolve the salt in the reserved water, add it to the dough and squeeze and fold until absorbed.",
                    ctx.scaled(HAND_SALT),
                )
                .with_tip("No extra yeast: the poolish carries all the leavening"),
            );
        }
        Preferment::Direct => {
            steps.push(
                ProcessStep::rest(
                    "Autolyse",
                    StepIcon::Water,
                    "Mix only the flour and water, no salt or yeast yet. Cover and rest.",
                    ctx.base(HAND_AUTOLYSE),
                )
                .with_tip(ctx.by_temp(
                    "Use slightly warm water (28-30°C) to make up for the cold room",
                    "Use water at room temperature (20-22°C)",
                    "Use cold water (10-15°C) so the dough does not run warm",
                )),
            );
            steps.push(
                ProcessStep::active(
                    "Incorporate Salt & Yeast",
                    StepIcon::Salt,
                    "Add the salt and yeast, then squeeze and fold until fully worked in.",
                    ctx.scaled(HAND_SALT),
                )
                .with_tip("Salt dissolves faster in a splash of reserved water"),
            );
        }
    }
}

fn hand_slap_and_fold(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    let fold_sets = match (ctx.preferment, ctx.hydration) {
        (Preferment::Poolish, HydrationBand::VeryHigh) => 4,
        (Preferment::Poolish, _) => 3,
        (Preferment::Direct, HydrationBand::VeryHigh) => 5,
        (Preferment::Direct, _) => 4,
    };

    steps.push(
        ProcessStep::active(
            "Initial Knead",
            StepIcon::Hands,
            ctx.by_preferment(
                "Slap and fold on the counter. A poolish dough is extensible and comes together quickly.",
                "Slap and fold on the counter. The dough is sticky; wet your hands instead of adding flour.",
            ),
            ctx.scaled(HAND_SLAP_AND_FOLD),
        )
        .with_tip("Lift, slap down, fold over, and repeat in a steady rhythm"),
    );

    let rest_min = ctx.base(HAND_FOLD_REST);
    for set in 1..=fold_sets {
        let rest_tip = (set == 1).then(|| {
            ctx.by_preferment(
                "Poolish dough gains strength quickly; expect a clear change after this rest",
                "The dough feels much smoother after the first rest",
            )
        });
        steps.push(
            ProcessStep::rest(
                format!("Rest {}", set),
                StepIcon::Sleep,
                "Cover the dough and let the gluten relax.",
                rest_min,
            )
            .with_optional_tip(rest_tip),
        );

        let fold_tip = (set == fold_sets).then_some("The dough should now feel tight and hold its shape");
        steps.push(
            ProcessStep::active(
                format!("Stretch & Fold {}", set),
                StepIcon::Fold,
                format!(
                    "Set {} of {}: with wet hands, stretch one side up and fold it over the middle. Turn the bowl a quarter and repeat four times.",
                    set, fold_sets
                ),
                HAND_STRETCH_AND_FOLD,
            )
            .with_optional_tip(fold_tip),
        );
    }
}

fn hand_two_stage_knead(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    steps.push(
        ProcessStep::active(
            "First Knead",
            StepIcon::Hands,
            ctx.by_preferment(
                "Push the dough away with the heel of your hand, fold it back and turn it a quarter. Poolish dough develops faster.",
                "Push the dough away with the heel of your hand, fold it back and turn it a quarter. Keep a steady rhythm.",
            ),
            ctx.scaled(HAND_FIRST_KNEAD),
        )
        .with_tip(ctx.by_temp(
            "Cold dough is stiff; press harder and give it time to loosen",
            "Steady pressure matters more than speed",
            "Warm dough is soft and sticky; work quickly so it does not overheat",
        )),
    );
    steps.push(
        ProcessStep::rest(
            "Bench Rest",
            StepIcon::Sleep,
            "Cover the dough and let the gluten relax before the second knead.",
            ctx.base(HAND_BENCH_REST),
        )
        .with_tip("The dough is far easier to work after this rest"),
    );
    steps.push(
        ProcessStep::active(
            "Second Knead",
            StepIcon::Hands,
            "Knead until the dough is smooth, elastic and passes the windowpane test.",
            ctx.scaled(HAND_SECOND_KNEAD),
        )
        .with_tip(ctx.by_preferment(
            "Poolish dough reaches windowpane early; stop there to keep an open crumb",
            "Windowpane test: stretch a small piece thin; if light shows through without tearing, the gluten is ready",
        )),
    );
}

fn hand_finish(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    steps.push(
        ProcessStep::rest(
            "Final Rest",
            StepIcon::Sleep,
            "Shape into a rough ball, cover and let it relax before dividing.",
            ctx.base(HAND_FINAL_REST),
        )
        .with_tip("A relaxed dough divides and balls up cleanly"),
    );
    steps.push(divide_and_ball(ctx.by_preferment(
        "Poolish dough is extensible; shape gently to keep the gas in",
        "Weigh each piece and seal the bottoms well; a tight skin gives better oven spring",
    )));
}

// ----------------------------------------------------------------------------
// Machine
// ----------------------------------------------------------------------------

fn machine_opening(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    match ctx.preferment {
        Preferment::Poolish => {
            steps.push(
                ProcessStep::active(
                    "Combine Poolish + Flour",
                    StepIcon::Poolish,
                    "Put the ripe poolish, the remaining flour and most of the remaining water in the mixer bowl. Mix on speed 1 until roughly combined.",
                    MACHINE_COMBINE,
                )
                .with_tip("A ripe poolish is bubbly with a slightly domed surface"),
            );
            steps.push(
                ProcessStep::rest(
                    "Short Autolyse",
                    StepIcon::Water,
                    "Cover the bowl and let the new flour hydrate.",
                    ctx.base(MACHINE_SHORT_AUTOLYSE),
                )
                .with_tip("Shorter than a direct autolyse; the poolish has already built some gluten"),
            );
            steps.push(
                ProcessStep::active(
                    "Add Salt",
                    StepIcon::Salt,
                    "Dissolve the salt in the reserved water, add it to the bowl and mix on speed 1 until absorbed.",
                    MACHINE_SALT,
                )
                .with_tip("No extra yeast: the poolish carries all the leavening"),
            );
        }
        Preferment::Direct => {
            steps.push(
                ProcessStep::rest(
                    "Autolyse",
                    StepIcon::Water,
                    "Put flour and water in the bowl with the dough hook, mix on the lowest speed for a minute, then cover and rest.",
                    ctx.base(MACHINE_AUTOLYSE),
                )
                .with_tip(ctx.by_temp(
                    "Use slightly warm water (28-30°C) to make up for the cold room",
                    "Room temperature water works well",
                    "Use cold water (10-15°C); mixer friction adds heat",
                )),
            );
            steps.push(
                ProcessStep::active(
                    "Incorporate Salt & Yeast",
                    StepIcon::Salt,
                    "Add the salt and yeast and mix on speed 1 until fully incorporated.",
                    MACHINE_SALT,
                )
                .with_tip("Stay on low speed; high speed tears the young gluten"),
            );
        }
    }
}

fn machine_development(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    steps.push(
        ProcessStep::active(
            "Low Speed Mix",
            StepIcon::Mixer,
            "Mix on speed 1-2 until the dough starts pulling away from the sides.",
            ctx.scaled(MACHINE_LOW_SPEED),
        )
        .with_tip(match ctx.temp {
            TempBand::Warm => "Check the dough temperature; stop and rest if it feels warm",
            TempBand::Cold | TempBand::Moderate => "Scrape down the sides once or twice if needed",
        }),
    );
    steps.push(
        ProcessStep::rest(
            "Rest",
            StepIcon::Sleep,
            "Stop the mixer, cover the bowl and let the gluten relax.",
            ctx.base(MACHINE_REST),
        )
        .with_tip("Resting keeps the dough from overheating and lets the gluten organise"),
    );
    steps.push(
        ProcessStep::active(
            "Medium Speed Knead",
            StepIcon::Mixer,
            ctx.by_preferment(
                "Mix on speed 2-3 until smooth and elastic. Poolish dough develops faster, so check early.",
                "Mix on speed 2-3 until smooth and elastic and the dough cleans the bowl.",
            ),
            ctx.scaled(MACHINE_MEDIUM_SPEED),
        )
        .with_tip(ctx.by_preferment(
            "Poolish dough goes from perfect to overworked quickly; do not over-mix",
            "Windowpane test: stretch a small piece thin; if light shows through without tearing, it is done",
        )),
    );

    if ctx.hydration.is_slack() {
        steps.push(ProcessStep::rest(
            "Rest",
            StepIcon::Sleep,
            "High hydration needs more gluten development. Rest before a short final mix.",
            MACHINE_EXTRA_REST,
        ));
        steps.push(
            ProcessStep::active(
                "Final Mix",
                StepIcon::Mixer,
                "Mix briefly on speed 2 to tighten the gluten.",
                MACHINE_FINAL_MIX,
            )
            .with_tip("Two minutes at most at this stage"),
        );
    }
}

fn machine_finish(ctx: &PlanContext, steps: &mut Vec<ProcessStep>) {
    steps.push(
        ProcessStep::rest(
            "Final Rest",
            StepIcon::Sleep,
            "Turn the dough out, shape a rough ball, cover and let it relax.",
            ctx.base(MACHINE_FINAL_REST),
        )
        .with_tip("Let the dough become workable before dividing"),
    );
    steps.push(divide_and_ball(ctx.by_preferment(
        "Poolish dough is extensible; shape gently to keep the gas in",
        "Weigh each piece and seal the bottoms well",
    )));
}

fn divide_and_ball(tip: &str) -> ProcessStep {
    ProcessStep::active(
        "Divide & Ball",
        StepIcon::Ball,
        "Divide the dough with a scraper. Shape each piece into a tight ball by tucking the edges under and rotating it on the counter.",
        DIVIDE_AND_BALL,
    )
    .with_tip(tip)
}
