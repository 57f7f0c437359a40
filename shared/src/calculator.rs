//! Calculation pipeline: validate, then energy, ideal weight, schedule, box and cost
//!
//! The pipeline is a pure function of its input snapshot, so repeated calls with
//! the same input return identical results.

use crate::box_planner::{apply_box_type, build_box, BoxParams};
use crate::cost::price_box;
use crate::energy::{compute_der, compute_rer, pick_mer_factor, MerContext};
use crate::error::{PlanError, PlanResult};
use crate::ideal_weight::{estimate_ideal_weight, weight_status};
use crate::models::{BoxCatalog, NutritionResult, PlanInput, WeightBasis, WeightGoal};
use crate::schedule::{build_week, WeekParams};
use crate::validation::{messages, validate, ValidationIssue, ValidationReport};

/// Run the full pipeline against the built-in box catalog
pub fn calculate(input: &PlanInput) -> PlanResult<NutritionResult> {
    calculate_with_catalog(input, &BoxCatalog::default())
}

fn missing(field: &str, message: &str) -> PlanError {
    PlanError::Invalid(ValidationReport {
        issues: vec![ValidationIssue::blocking(field, message)],
    })
}

/// Run the full pipeline, resolving the selected box type in `catalog`
pub fn calculate_with_catalog(
    input: &PlanInput,
    catalog: &BoxCatalog,
) -> PlanResult<NutritionResult> {
    let report = validate(&input.cat, &input.food, &input.plan, &input.settings);
    if report.blocks_calculation() {
        return Err(PlanError::Invalid(report));
    }

    let cat = &input.cat;
    let food = &input.food;
    let settings = &input.settings;

    let weight_kg = cat
        .weight_kg
        .ok_or_else(|| missing("weight", messages::WEIGHT_MISSING))?;
    let ctx = MerContext::from_profile(cat).ok_or_else(|| missing("age", messages::AGE_MISSING))?;

    let ideal_weight = estimate_ideal_weight(cat.breed, cat.sex, ctx.age_months, weight_kg);
    let status = weight_status(weight_kg, ideal_weight.range.as_ref());

    let (weight_used_kg, weight_basis) = match (cat.weight_goal, ideal_weight.ideal_kg) {
        (WeightGoal::Loss | WeightGoal::Gain, Some(ideal)) => (ideal, WeightBasis::Ideal),
        _ => (weight_kg, WeightBasis::Current),
    };

    let rer_kcal = compute_rer(weight_used_kg);
    let mer = pick_mer_factor(&ctx);
    let der_kcal = compute_der(rer_kcal, mer.factor);
    tracing::debug!(weight_used_kg, rer_kcal, der_kcal, "computed energy requirement");

    let unit_grams = food.unit_grams.unwrap_or(0.0);
    let schedule = build_week(&WeekParams {
        der_kcal,
        meals_per_day: input.plan.meals_per_day,
        wet_days: &input.plan.wet_days,
        wet_meal_index: input.plan.wet_meal_index,
        unit_grams,
        kcal_per_gram_wet: food.wet_kcal_per_gram().unwrap_or(0.0),
        kcal_per_gram_dry: food.dry_kcal_per_gram().unwrap_or(0.0),
        split_days: settings.split_days,
        safety_margin: settings.safety_margin,
    });

    let mut box_summary = build_box(
        &schedule,
        &BoxParams {
            duration: settings.duration,
            wet_mode: settings.wet_mode,
            fixed_total_units: settings.fixed_units(),
            safety_margin: settings.safety_margin,
            wet_kcal_per_unit: food.wet_kcal_per_unit().unwrap_or(0.0),
        },
    );

    if let Some(key) = settings.box_type.as_deref() {
        match catalog.find(key) {
            Some(box_type) => box_summary = apply_box_type(box_summary, box_type),
            None => tracing::warn!(box_type = key, "unknown box type, planning without tier"),
        }
    }

    let cost = price_box(&box_summary, &input.pricing);

    Ok(NutritionResult {
        rer_kcal,
        mer,
        der_kcal,
        weight_used_kg,
        weight_basis,
        weight_status: status,
        ideal_weight,
        schedule,
        box_summary,
        cost,
    })
}

/// Holds the last good result across recalculations
///
/// A failed pass records its issues but keeps the previous result, so callers
/// never observe a partially computed plan.
#[derive(Debug, Clone, Default)]
pub struct PlannerSession {
    catalog: BoxCatalog,
    last_result: Option<NutritionResult>,
    issues: ValidationReport,
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: BoxCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Recompute from a fresh snapshot; `true` when the result was replaced
    pub fn recalculate(&mut self, input: &PlanInput) -> bool {
        match calculate_with_catalog(input, &self.catalog) {
            Ok(result) => {
                self.last_result = Some(result);
                self.issues = ValidationReport::default();
                true
            }
            Err(PlanError::Invalid(report)) => {
                self.issues = report;
                false
            }
        }
    }

    pub fn last_result(&self) -> Option<&NutritionResult> {
        self.last_result.as_ref()
    }

    pub fn issues(&self) -> &ValidationReport {
        &self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::*;
    use rust_decimal::Decimal;

    fn input() -> PlanInput {
        PlanInput {
            cat: CatProfile {
                weight_kg: Some(4.0),
                age: Age::years(3.0),
                life_stage: None,
                sex: Sex::Female,
                breed: Breed::DomesticShorthair,
                neuter_status: NeuterStatus::Neutered,
                body_condition_score: Some(5),
                activity_level: ActivityLevel::Normal,
                weight_goal: WeightGoal::Maintain,
                condition: SpecialCondition::None,
            },
            food: FoodProfile {
                dry_kcal_per_100g: Some(380.0),
                wet_density_mode: WetDensityMode::Per100g,
                wet_kcal_per_100g: Some(80.0),
                wet_kcal_per_unit: None,
                unit_grams: Some(85.0),
                packaging: PackagingType::Pouch,
            },
            plan: WeeklyPlan::with_wet_day_count(3),
            settings: PlanSettings::default(),
            pricing: Pricing {
                price_per_kg_dry: Some(Decimal::new(1250, 2)),
                price_per_unit_wet: Some(Decimal::new(135, 2)),
            },
        }
    }

    #[test]
    fn test_adult_pipeline() {
        let result = calculate(&input()).unwrap();
        // 70 × 4^0.75 = 197.99
        assert!((result.rer_kcal - 197.99).abs() < 0.01);
        assert!((result.mer.factor - 1.2).abs() < 1e-9);
        assert!((result.der_kcal - result.rer_kcal * 1.2).abs() < 1e-9);
        assert_eq!(result.mer.label, "Adult, neutered, normal activity");
        assert_eq!(result.weight_basis, WeightBasis::Current);
        assert_eq!(result.weight_status, WeightStatus::Ok);
        assert_eq!(result.schedule.len(), 7);
        assert_eq!(result.box_summary.duration_days, 30);
        assert!(result.cost.total_cost > Decimal::ZERO);
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let i = input();
        assert_eq!(calculate(&i).unwrap(), calculate(&i).unwrap());
    }

    #[test]
    fn test_calculated_input_revalidates_clean() {
        let i = input();
        assert!(calculate(&i).is_ok());
        assert!(validate(&i.cat, &i.food, &i.plan, &i.settings).is_empty());
    }

    #[test]
    fn test_loss_goal_uses_ideal_weight() {
        let mut i = input();
        i.cat.weight_kg = Some(7.0);
        i.cat.weight_goal = WeightGoal::Loss;
        let result = calculate(&i).unwrap();
        assert_eq!(result.weight_status, WeightStatus::High);
        assert_eq!(result.weight_basis, WeightBasis::Ideal);
        assert!((result.weight_used_kg - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_input_returns_all_messages() {
        let mut i = input();
        i.cat.weight_kg = None;
        i.food.dry_kcal_per_100g = Some(900.0);
        let err = calculate(&i).unwrap_err();
        assert_eq!(
            err.report().messages(),
            vec![messages::WEIGHT_MISSING, messages::DRY_RANGE]
        );
    }

    #[test]
    fn test_box_type_applied_from_catalog() {
        let mut i = input();
        i.settings.box_type = Some("dry".to_string());
        let result = calculate(&i).unwrap();
        assert_eq!(result.box_summary.wet_units_billed, 0);
        assert_eq!(result.cost.wet_cost, Decimal::ZERO);
    }

    #[test]
    fn test_negative_safety_margin_rejected() {
        let mut i = input();
        i.settings.safety_margin = -2.0;
        let err = calculate(&i).unwrap_err();
        assert_eq!(err.report().messages(), vec![messages::SAFETY_MARGIN_RANGE]);
    }

    #[test]
    fn test_fixed_total_without_count_rejected() {
        let mut i = input();
        i.settings.wet_mode = WetMode::FixedTotal;
        i.settings.fixed_total_units = None;
        let err = calculate(&i).unwrap_err();
        assert!(err.report().has_field("fixed_total_units"));

        i.settings.fixed_total_units = Some(11);
        let result = calculate(&i).unwrap();
        assert_eq!(result.box_summary.wet_units_billed, 11);
        assert_eq!(
            result.cost.wet_cost,
            (Decimal::from(11) * Decimal::new(135, 2)).round_dp(2)
        );
    }

    #[test]
    fn test_balance_box_covers_daily_wet_need() {
        let mut i = input();
        i.plan.set_wet_day_count(7);
        i.settings.box_type = Some("balance".to_string());
        let result = calculate(&i).unwrap();
        let summary = &result.box_summary;
        assert!(summary.wet_units_required > 13);
        assert_eq!(summary.wet_units_billed, summary.wet_units_required);
    }

    #[test]
    fn test_unknown_box_type_is_ignored() {
        let mut i = input();
        i.settings.box_type = Some("platinum".to_string());
        let result = calculate(&i).unwrap();
        assert_eq!(result.box_summary.box_type, None);
    }

    #[test]
    fn test_session_keeps_last_good_result() {
        let mut session = PlannerSession::new();
        assert!(session.recalculate(&input()));
        let good = session.last_result().cloned();

        let mut male = input();
        male.cat.sex = Sex::Male;
        male.cat.condition = SpecialCondition::Pregnant { week: 4 };
        assert!(!session.recalculate(&male));

        assert_eq!(session.last_result().cloned(), good);
        assert_eq!(session.issues().messages(), vec![messages::REPRODUCTIVE_MALE]);
    }

    #[test]
    fn test_fresh_session_with_invalid_input_has_no_result() {
        let mut session = PlannerSession::new();
        let mut male = input();
        male.cat.sex = Sex::Male;
        male.cat.condition = SpecialCondition::Lactating {
            week: 2,
            litter_size: Some(4),
        };
        assert!(!session.recalculate(&male));
        assert!(session.last_result().is_none());
        assert!(session.issues().blocks_calculation());
    }

    #[test]
    fn test_result_serializes_snake_case() {
        let result = calculate(&input()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["weight_basis"], "current");
        assert_eq!(json["weight_status"], "ok");
        assert_eq!(json["schedule"][0]["day"], "Monday");
        assert_eq!(json["box_summary"]["wet_mode"], "auto");
    }
}
