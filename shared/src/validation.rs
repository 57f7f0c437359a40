//! Input validation for the cat box planner
//!
//! Every rule is evaluated on each pass so the user sees all problems at once.
//! Advisory messages (unusual but possible situations) are reported through the
//! same list and currently block calculation just like hard errors.

use serde::{Deserialize, Serialize};

use crate::ideal_weight::{estimate_ideal_weight, weight_status};
use crate::models::{
    Breed, CatProfile, FoodProfile, PlanSettings, Sex, SpecialCondition, WeeklyPlan, WeightGoal,
    WeightStatus, WetDensityMode, WetMode,
};

pub const MIN_WEIGHT_KG: f64 = 0.5;
pub const MAX_WEIGHT_KG: f64 = 25.0;
pub const MIN_DRY_KCAL_PER_100G: f64 = 200.0;
pub const MAX_DRY_KCAL_PER_100G: f64 = 600.0;
pub const MIN_MEALS_PER_DAY: u8 = 1;
pub const MAX_MEALS_PER_DAY: u8 = 6;
pub const MIN_LITTER_SIZE: u8 = 1;
pub const MAX_LITTER_SIZE: u8 = 8;
pub const MIN_BREEDING_AGE_MONTHS: f64 = 8.0;
pub const MIN_ENDOCRINE_AGE_MONTHS: f64 = 84.0;
pub const MIN_DIABETES_AGE_MONTHS: f64 = 12.0;
pub const MAX_RECOVERY_WEEKS: u8 = 4;
pub const SENIOR_SCREENING_AGE_MONTHS: f64 = 144.0;
pub const MAX_SAFETY_MARGIN: f64 = 1.0;

/// Whether an issue is a hard error or an advisory notice
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Blocking,
    Advisory,
}

/// One user-facing validation message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub(crate) fn blocking(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: Severity::Blocking,
        }
    }

    fn advisory(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            severity: Severity::Advisory,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// All issues found in one validation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Advisories block too until product decides otherwise
    pub fn blocks_calculation(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    pub fn advisories(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Advisory)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

// ============================================================================
// Message texts
// ============================================================================

pub mod messages {
    pub const WEIGHT_MISSING: &str = "Please enter the cat's weight.";
    pub const WEIGHT_RANGE: &str = "Weight must be between 0.5 and 25 kg.";
    pub const AGE_MISSING: &str = "Please enter the cat's age.";
    pub const BCS_RANGE: &str = "Body condition score must be between 1 and 9.";
    pub const DRY_MISSING: &str = "Please enter the dry food calorie density (kcal/100 g).";
    pub const DRY_RANGE: &str = "Dry food calorie density must be between 200 and 600 kcal/100 g.";
    pub const WET_PER_100G: &str = "Wet food calorie density (kcal/100 g) must be greater than 0.";
    pub const MEALS_RANGE: &str = "Meals per day must be between 1 and 6.";
    pub const SAFETY_MARGIN_RANGE: &str = "Safety margin must be between 0% and 100%.";
    pub const FIXED_TOTAL_MISSING: &str = "Please enter the total number of pouches/cans.";
    pub const GOAL_LOSS_UNDERWEIGHT: &str =
        "A weight-loss goal is not appropriate for an underweight cat.";
    pub const GOAL_GAIN_OVERWEIGHT: &str =
        "A weight-gain goal is not appropriate for an overweight cat.";
    pub const REPRODUCTIVE_MALE: &str = "Pregnancy and lactation are only possible for female cats.";
    pub const REPRODUCTIVE_YOUNG: &str =
        "Pregnancy or lactation before 8 months of age is unusual. Please check the cat's age.";
    pub const LITTER_RANGE: &str = "Litter size must be between 1 and 8 kittens.";
    pub const CKD_YOUNG: &str = "Chronic kidney disease is uncommon in cats younger than 7 years. Please confirm the diagnosis with your veterinarian.";
    pub const CKD_STAGE: &str = "Please select the CKD stage (1-4).";
    pub const HYPERTHYROID_YOUNG: &str = "Hyperthyroidism is uncommon in cats younger than 7 years. Please confirm the diagnosis with your veterinarian.";
    pub const HYPERTHYROID_TREATMENT: &str =
        "Please specify whether the hyperthyroidism is being treated.";
    pub const DIABETES_YOUNG: &str = "Diabetes is uncommon in cats younger than 1 year. Please confirm the diagnosis with your veterinarian.";
    pub const RECOVERY_LONG: &str =
        "Recovery lasting more than 4 weeks should be reviewed by a veterinarian.";
    pub const CARDIAC_MAINE_COON: &str = "Male Maine Coons are predisposed to hypertrophic cardiomyopathy (HCM). Genetic screening and a cardiology exam are recommended.";
    pub const SENIOR_SCREENING: &str = "Cats over 12 years should have a senior health screening (bloodwork, blood pressure, thyroid) before a diet change.";
}

/// Validate a calculation input snapshot; an empty report means calculation may proceed
pub fn validate(
    cat: &CatProfile,
    food: &FoodProfile,
    plan: &WeeklyPlan,
    settings: &PlanSettings,
) -> ValidationReport {
    let mut issues = Vec::new();

    validate_biometrics(cat, &mut issues);
    validate_food(food, &mut issues);
    validate_meals(plan, &mut issues);
    validate_settings(settings, &mut issues);
    validate_weight_goal(cat, &mut issues);
    validate_condition(cat, &mut issues);

    if !issues.is_empty() {
        tracing::debug!(count = issues.len(), "validation found issues");
    }
    ValidationReport { issues }
}

fn validate_biometrics(cat: &CatProfile, issues: &mut Vec<ValidationIssue>) {
    match cat.weight_kg {
        None => issues.push(ValidationIssue::blocking("weight", messages::WEIGHT_MISSING)),
        Some(w) if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&w) => {
            issues.push(ValidationIssue::blocking("weight", messages::WEIGHT_RANGE))
        }
        Some(_) => {}
    }

    if !cat.age_months().is_some_and(|m| m > 0.0) {
        issues.push(ValidationIssue::blocking("age", messages::AGE_MISSING));
    }

    if let Some(score) = cat.body_condition_score {
        if !(1..=9).contains(&score) {
            issues.push(ValidationIssue::blocking("body_condition_score", messages::BCS_RANGE));
        }
    }
}

fn validate_food(food: &FoodProfile, issues: &mut Vec<ValidationIssue>) {
    match food.dry_kcal_per_100g {
        None => issues.push(ValidationIssue::blocking("dry_kcal_per_100g", messages::DRY_MISSING)),
        Some(kcal) if !(MIN_DRY_KCAL_PER_100G..=MAX_DRY_KCAL_PER_100G).contains(&kcal) => {
            issues.push(ValidationIssue::blocking("dry_kcal_per_100g", messages::DRY_RANGE))
        }
        Some(_) => {}
    }

    let positive = |value: Option<f64>| value.is_some_and(|v| v > 0.0);

    match food.wet_density_mode {
        WetDensityMode::Per100g => {
            if !positive(food.wet_kcal_per_100g) {
                issues.push(ValidationIssue::blocking(
                    "wet_kcal_per_100g",
                    messages::WET_PER_100G,
                ));
            }
        }
        WetDensityMode::PerUnit => {
            if !positive(food.wet_kcal_per_unit) {
                issues.push(ValidationIssue::blocking(
                    "wet_kcal_per_unit",
                    format!(
                        "Wet food calories per {} must be greater than 0.",
                        food.packaging
                    ),
                ));
            }
        }
    }

    if !positive(food.unit_grams) {
        issues.push(ValidationIssue::blocking(
            "unit_grams",
            format!("Weight of one {} (g) must be greater than 0.", food.packaging),
        ));
    }
}

fn validate_meals(plan: &WeeklyPlan, issues: &mut Vec<ValidationIssue>) {
    let meals_valid = (MIN_MEALS_PER_DAY..=MAX_MEALS_PER_DAY).contains(&plan.meals_per_day);
    if !meals_valid {
        issues.push(ValidationIssue::blocking("meals_per_day", messages::MEALS_RANGE));
    }

    // with an invalid meal count the index is checked against the largest allowed one
    let last_meal = if meals_valid {
        plan.meals_per_day
    } else {
        MAX_MEALS_PER_DAY
    };
    if plan.wet_day_count() > 0 && !(1..=last_meal).contains(&plan.wet_meal_index) {
        issues.push(ValidationIssue::blocking(
            "wet_meal_index",
            format!(
                "The wet food meal must be one of the daily meals (1-{}).",
                last_meal
            ),
        ));
    }
}

fn validate_settings(settings: &PlanSettings, issues: &mut Vec<ValidationIssue>) {
    if !(0.0..=MAX_SAFETY_MARGIN).contains(&settings.safety_margin) {
        issues.push(ValidationIssue::blocking(
            "safety_margin",
            messages::SAFETY_MARGIN_RANGE,
        ));
    }

    if settings.wet_mode == WetMode::FixedTotal && settings.fixed_total_units.is_none() {
        issues.push(ValidationIssue::blocking(
            "fixed_total_units",
            messages::FIXED_TOTAL_MISSING,
        ));
    }
}

fn validate_weight_goal(cat: &CatProfile, issues: &mut Vec<ValidationIssue>) {
    let (Some(weight), Some(age_months)) = (cat.weight_kg, cat.age_months()) else {
        return;
    };
    let estimate = estimate_ideal_weight(cat.breed, cat.sex, age_months, weight);
    let status = weight_status(weight, estimate.range.as_ref());

    match (cat.weight_goal, status) {
        (WeightGoal::Loss, WeightStatus::Low) => issues.push(ValidationIssue::blocking(
            "weight_goal",
            messages::GOAL_LOSS_UNDERWEIGHT,
        )),
        (WeightGoal::Gain, WeightStatus::High) => issues.push(ValidationIssue::blocking(
            "weight_goal",
            messages::GOAL_GAIN_OVERWEIGHT,
        )),
        _ => {}
    }
}

fn validate_condition(cat: &CatProfile, issues: &mut Vec<ValidationIssue>) {
    let age = cat.age_months();
    let younger_than = |months: f64| age.is_some_and(|a| a < months);

    if cat.condition.is_reproductive() {
        if cat.sex != Sex::Female {
            issues.push(ValidationIssue::blocking("condition", messages::REPRODUCTIVE_MALE));
        }
        if younger_than(MIN_BREEDING_AGE_MONTHS) {
            issues.push(ValidationIssue::advisory("condition", messages::REPRODUCTIVE_YOUNG));
        }
    }

    match cat.condition {
        SpecialCondition::None => {
            if age.is_some_and(|a| a >= SENIOR_SCREENING_AGE_MONTHS) {
                issues.push(ValidationIssue::advisory("condition", messages::SENIOR_SCREENING));
            }
        }
        SpecialCondition::Pregnant { .. } => {}
        SpecialCondition::Lactating { litter_size, .. } => {
            if !litter_size.is_some_and(|n| (MIN_LITTER_SIZE..=MAX_LITTER_SIZE).contains(&n)) {
                issues.push(ValidationIssue::blocking("litter_size", messages::LITTER_RANGE));
            }
        }
        SpecialCondition::Ckd { stage } => {
            if younger_than(MIN_ENDOCRINE_AGE_MONTHS) {
                issues.push(ValidationIssue::advisory("condition", messages::CKD_YOUNG));
            }
            if !stage.is_some_and(|s| (1..=4).contains(&s)) {
                issues.push(ValidationIssue::blocking("ckd_stage", messages::CKD_STAGE));
            }
        }
        SpecialCondition::Hyperthyroid { treated } => {
            if younger_than(MIN_ENDOCRINE_AGE_MONTHS) {
                issues.push(ValidationIssue::advisory("condition", messages::HYPERTHYROID_YOUNG));
            }
            if treated.is_none() {
                issues.push(ValidationIssue::blocking(
                    "hyperthyroid_treated",
                    messages::HYPERTHYROID_TREATMENT,
                ));
            }
        }
        SpecialCondition::Diabetes { .. } => {
            if younger_than(MIN_DIABETES_AGE_MONTHS) {
                issues.push(ValidationIssue::advisory("condition", messages::DIABETES_YOUNG));
            }
        }
        SpecialCondition::Recovery { weeks_since_event } => {
            if weeks_since_event > MAX_RECOVERY_WEEKS {
                issues.push(ValidationIssue::advisory("recovery_weeks", messages::RECOVERY_LONG));
            }
        }
        SpecialCondition::Cardiac { .. } => {
            if cat.breed == Breed::MaineCoon && cat.sex == Sex::Male {
                issues.push(ValidationIssue::advisory("condition", messages::CARDIAC_MAINE_COON));
            }
        }
    }
}
