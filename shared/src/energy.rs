//! Energy model: resting energy requirement and the MER multiplier
//!
//! RER uses the allometric formula `70 × kg^0.75`. The MER factor is resolved
//! in layers, each overriding the previous one:
//!
//! 1. life-stage base factor scaled by activity (plus breed adjustment)
//! 2. special-condition override
//! 3. weight-goal override
//!
//! Everything here is arithmetic over already-validated inputs; there are no
//! error paths.

use crate::models::{
    ActivityLevel, Breed, CatProfile, LifeStage, MerFactor, NeuterStatus, Sex, SpecialCondition,
    WeightGoal,
};

pub const RER_COEFFICIENT: f64 = 70.0;
pub const RER_EXPONENT: f64 = 0.75;

pub const KITTEN_YOUNG_FACTOR: f64 = 2.5;
pub const KITTEN_OLDER_FACTOR: f64 = 2.0;
pub const INTACT_ADULT_MODIFIER: f64 = 1.1;
pub const SENIOR_NEUTERED_MODIFIER: f64 = 0.9;
pub const HAIRLESS_BREED_MODIFIER: f64 = 1.15;

pub const WEIGHT_LOSS_FACTOR: f64 = 0.8;
pub const WEIGHT_GAIN_FACTOR: f64 = 1.4;

/// Gestation weeks 1-9
const PREGNANCY_FACTORS: [f64; 9] = [1.1, 1.15, 1.2, 1.25, 1.3, 1.4, 1.5, 1.55, 1.6];
/// Lactation weeks 1-6, for a litter of four; milk production peaks in week 4
const LACTATION_BASE_FACTORS: [f64; 6] = [2.0, 2.3, 2.6, 3.0, 2.8, 2.5];
const LACTATION_BASELINE_LITTER: i32 = 4;
const LACTATION_PER_KITTEN: f64 = 0.1;
const LACTATION_MIN: f64 = 2.0;
const LACTATION_MAX: f64 = 3.5;

pub const CKD_FACTOR_FLOOR: f64 = 0.6;
const HYPERTHYROID_TREATED: f64 = 0.8;
const HYPERTHYROID_UNTREATED: f64 = 1.3;
const DIABETES_CONTROLLED: f64 = 1.0;
const DIABETES_UNCONTROLLED: f64 = 1.1;
const DIABETES_WEIGHT_LOSS: f64 = 0.8;
const RECOVERY_ACUTE_WEEKS: u8 = 2;
const RECOVERY_ACUTE: f64 = 1.3;
const RECOVERY_LATE: f64 = 1.1;
const CARDIAC_STABLE: f64 = 0.9;
const CARDIAC_DECOMPENSATED: f64 = 0.8;

/// Resting energy requirement in kcal/day; zero for non-positive weights
pub fn compute_rer(weight_kg: f64) -> f64 {
    if weight_kg <= 0.0 {
        return 0.0;
    }
    RER_COEFFICIENT * weight_kg.powf(RER_EXPONENT)
}

/// Inputs for the MER factor decision
#[derive(Debug, Clone, Copy)]
pub struct MerContext<'a> {
    /// Explicit stage; derived from `age_months` when `None`
    pub life_stage: Option<LifeStage>,
    pub neuter_status: NeuterStatus,
    pub activity_level: ActivityLevel,
    pub age_months: f64,
    pub condition: &'a SpecialCondition,
    pub sex: Sex,
    pub weight_goal: WeightGoal,
    pub breed: Breed,
}

impl<'a> MerContext<'a> {
    /// `None` when the profile has no usable age
    pub fn from_profile(cat: &'a CatProfile) -> Option<Self> {
        Some(Self {
            life_stage: cat.life_stage,
            neuter_status: cat.neuter_status,
            activity_level: cat.activity_level,
            age_months: cat.age_months()?,
            condition: &cat.condition,
            sex: cat.sex,
            weight_goal: cat.weight_goal,
            breed: cat.breed,
        })
    }
}

/// Resolve the MER factor with its human-readable label
pub fn pick_mer_factor(ctx: &MerContext<'_>) -> MerFactor {
    let stage = ctx
        .life_stage
        .unwrap_or_else(|| LifeStage::from_age_months(ctx.age_months));
    let activity = ctx.activity_level.multiplier();

    let mut factor = base_stage_factor(stage, ctx.neuter_status, activity);
    let mut label = format!(
        "{}, {}, {}",
        stage,
        ctx.neuter_status,
        ctx.activity_level.label()
    );

    if ctx.breed.is_hairless() {
        factor *= HAIRLESS_BREED_MODIFIER;
        label.push_str(" (+15% hairless breed)");
    }

    if let Some((condition_factor, condition_label)) = condition_factor(ctx) {
        factor = condition_factor;
        label = condition_label;
    }

    match ctx.weight_goal {
        WeightGoal::Loss => {
            factor = WEIGHT_LOSS_FACTOR * activity;
            label = format!("Weight loss, {}", ctx.activity_level.label());
        }
        WeightGoal::Gain => {
            factor = WEIGHT_GAIN_FACTOR * activity;
            label = format!("Weight gain, {}", ctx.activity_level.label());
        }
        WeightGoal::Maintain => {}
    }

    tracing::debug!(?stage, factor, %label, "resolved MER factor");

    MerFactor {
        factor,
        label,
        resolved_stage: stage,
    }
}

fn base_stage_factor(stage: LifeStage, neuter: NeuterStatus, activity: f64) -> f64 {
    match (stage, neuter) {
        (LifeStage::KittenYoung, _) => KITTEN_YOUNG_FACTOR * activity,
        (LifeStage::KittenOlder, _) => KITTEN_OLDER_FACTOR * activity,
        (LifeStage::Adult, NeuterStatus::Neutered) => activity,
        (LifeStage::Adult, NeuterStatus::Intact) => activity * INTACT_ADULT_MODIFIER,
        (LifeStage::Senior, NeuterStatus::Neutered) => activity * SENIOR_NEUTERED_MODIFIER,
        (LifeStage::Senior, NeuterStatus::Intact) => activity,
    }
}

fn week_entry(table: &[f64], week: u8) -> f64 {
    let index = usize::from(week.max(1)).min(table.len()) - 1;
    table[index]
}

fn condition_factor(ctx: &MerContext<'_>) -> Option<(f64, String)> {
    match *ctx.condition {
        SpecialCondition::None => None,
        SpecialCondition::Pregnant { week } => {
            if ctx.sex != Sex::Female {
                return None;
            }
            let factor = week_entry(&PREGNANCY_FACTORS, week);
            Some((factor, format!("Pregnancy, week {}", week.clamp(1, 9))))
        }
        SpecialCondition::Lactating { week, litter_size } => {
            if ctx.sex != Sex::Female {
                return None;
            }
            let kittens = litter_size.map_or(LACTATION_BASELINE_LITTER, i32::from);
            let base = week_entry(&LACTATION_BASE_FACTORS, week);
            let adjusted = base
                + LACTATION_PER_KITTEN * f64::from(kittens - LACTATION_BASELINE_LITTER);
            Some((
                adjusted.clamp(LACTATION_MIN, LACTATION_MAX),
                format!("Lactation, week {}, {} kittens", week.clamp(1, 6), kittens),
            ))
        }
        SpecialCondition::Ckd { stage } => {
            let stage = stage.unwrap_or(1);
            let factor = ((10.0 - f64::from(stage)) / 10.0).max(CKD_FACTOR_FLOOR);
            Some((factor, format!("Chronic kidney disease, stage {stage}")))
        }
        SpecialCondition::Hyperthyroid { treated } => Some(if treated.unwrap_or(false) {
            (HYPERTHYROID_TREATED, "Hyperthyroidism, treated".to_string())
        } else {
            (HYPERTHYROID_UNTREATED, "Hyperthyroidism, untreated".to_string())
        }),
        SpecialCondition::Diabetes { controlled } => Some(if ctx.weight_goal == WeightGoal::Loss {
            (DIABETES_WEIGHT_LOSS, "Diabetes with weight management".to_string())
        } else if controlled {
            (DIABETES_CONTROLLED, "Diabetes, controlled".to_string())
        } else {
            (DIABETES_UNCONTROLLED, "Diabetes, uncontrolled".to_string())
        }),
        SpecialCondition::Recovery { weeks_since_event } => {
            Some(if weeks_since_event <= RECOVERY_ACUTE_WEEKS {
                (RECOVERY_ACUTE, "Recovery, acute phase".to_string())
            } else {
                (RECOVERY_LATE, "Recovery, late phase".to_string())
            })
        }
        SpecialCondition::Cardiac { decompensated } => Some(if decompensated {
            (CARDIAC_DECOMPENSATED, "Cardiac disease, decompensated".to_string())
        } else {
            (CARDIAC_STABLE, "Cardiac disease, stable".to_string())
        }),
    }
}

/// Daily energy requirement
pub fn compute_der(rer_kcal: f64, factor: f64) -> f64 {
    rer_kcal * factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONDITION: SpecialCondition = SpecialCondition::None;

    fn adult(condition: &SpecialCondition) -> MerContext<'_> {
        MerContext {
            life_stage: None,
            neuter_status: NeuterStatus::Neutered,
            activity_level: ActivityLevel::Moderate,
            age_months: 36.0,
            condition,
            sex: Sex::Female,
            weight_goal: WeightGoal::Maintain,
            breed: Breed::DomesticShorthair,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_rer_four_kg() {
        // 70 × 4^0.75 = 70 × 2.8284
        assert!((compute_rer(4.0) - 197.99).abs() < 1.0);
    }

    #[test]
    fn test_rer_non_positive_weight() {
        assert_eq!(compute_rer(0.0), 0.0);
        assert_eq!(compute_rer(-2.0), 0.0);
    }

    #[test]
    fn test_neutered_adult_moderate() {
        let mer = pick_mer_factor(&adult(&NO_CONDITION));
        assert!(approx(mer.factor, 1.4));
        assert_eq!(mer.resolved_stage, LifeStage::Adult);
        assert_eq!(mer.label, "Adult, neutered, moderate activity");
    }

    #[test]
    fn test_intact_adult_adds_ten_percent() {
        let ctx = MerContext {
            neuter_status: NeuterStatus::Intact,
            ..adult(&NO_CONDITION)
        };
        assert!(approx(pick_mer_factor(&ctx).factor, 1.54));
    }

    #[test]
    fn test_hairless_breed_composes_multiplicatively() {
        let ctx = MerContext {
            breed: Breed::Sphynx,
            ..adult(&NO_CONDITION)
        };
        assert!(approx(pick_mer_factor(&ctx).factor, 1.4 * 1.15));

        let intact = MerContext {
            neuter_status: NeuterStatus::Intact,
            ..ctx
        };
        assert!(approx(pick_mer_factor(&intact).factor, 1.4 * 1.1 * 1.15));
    }

    #[test]
    fn test_young_kitten_very_high_activity() {
        let ctx = MerContext {
            age_months: 3.0,
            activity_level: ActivityLevel::VeryHigh,
            ..adult(&NO_CONDITION)
        };
        let mer = pick_mer_factor(&ctx);
        assert_eq!(mer.resolved_stage, LifeStage::KittenYoung);
        assert!(approx(mer.factor, 4.5));
    }

    #[test]
    fn test_senior_factors() {
        let neutered = MerContext {
            age_months: 120.0,
            ..adult(&NO_CONDITION)
        };
        assert!(approx(pick_mer_factor(&neutered).factor, 1.4 * 0.9));
        let intact = MerContext {
            neuter_status: NeuterStatus::Intact,
            ..neutered
        };
        assert!(approx(pick_mer_factor(&intact).factor, 1.4));
    }

    #[test]
    fn test_explicit_life_stage_wins_over_age() {
        let ctx = MerContext {
            life_stage: Some(LifeStage::Senior),
            ..adult(&NO_CONDITION)
        };
        assert_eq!(pick_mer_factor(&ctx).resolved_stage, LifeStage::Senior);
    }

    #[test]
    fn test_pregnancy_table_clamped() {
        let early = SpecialCondition::Pregnant { week: 0 };
        assert!(approx(pick_mer_factor(&adult(&early)).factor, 1.1));
        let late = SpecialCondition::Pregnant { week: 12 };
        assert!(approx(pick_mer_factor(&adult(&late)).factor, 1.6));
    }

    #[test]
    fn test_pregnancy_ignored_for_male() {
        let pregnant = SpecialCondition::Pregnant { week: 5 };
        let ctx = MerContext {
            sex: Sex::Male,
            ..adult(&pregnant)
        };
        assert!(approx(pick_mer_factor(&ctx).factor, 1.4));
    }

    #[test]
    fn test_lactation_peak_large_litter() {
        let condition = SpecialCondition::Lactating {
            week: 4,
            litter_size: Some(6),
        };
        let factor = pick_mer_factor(&adult(&condition)).factor;
        assert!(factor > 3.0 && factor < 4.0);
    }

    #[test]
    fn test_lactation_clamped_to_bounds() {
        let huge = SpecialCondition::Lactating {
            week: 4,
            litter_size: Some(8),
        };
        assert!(approx(pick_mer_factor(&adult(&huge)).factor, 3.4));
        let single = SpecialCondition::Lactating {
            week: 1,
            litter_size: Some(1),
        };
        assert!(approx(pick_mer_factor(&adult(&single)).factor, 2.0));
    }

    #[test]
    fn test_ckd_stage_four_hits_floor() {
        let condition = SpecialCondition::Ckd { stage: Some(4) };
        assert_eq!(pick_mer_factor(&adult(&condition)).factor, 0.6);
        let stage_two = SpecialCondition::Ckd { stage: Some(2) };
        assert!(approx(pick_mer_factor(&adult(&stage_two)).factor, 0.8));
    }

    #[test]
    fn test_hyperthyroid_treatment() {
        let treated = SpecialCondition::Hyperthyroid { treated: Some(true) };
        assert!(approx(pick_mer_factor(&adult(&treated)).factor, 0.8));
        let untreated = SpecialCondition::Hyperthyroid { treated: Some(false) };
        assert!(approx(pick_mer_factor(&adult(&untreated)).factor, 1.3));
    }

    #[test]
    fn test_diabetes_variants() {
        let controlled = SpecialCondition::Diabetes { controlled: true };
        assert!(approx(pick_mer_factor(&adult(&controlled)).factor, 1.0));
        let uncontrolled = SpecialCondition::Diabetes { controlled: false };
        assert!(approx(pick_mer_factor(&adult(&uncontrolled)).factor, 1.1));
    }

    #[test]
    fn test_recovery_and_cardiac() {
        let acute = SpecialCondition::Recovery { weeks_since_event: 2 };
        assert!(approx(pick_mer_factor(&adult(&acute)).factor, 1.3));
        let late = SpecialCondition::Recovery { weeks_since_event: 3 };
        assert!(approx(pick_mer_factor(&adult(&late)).factor, 1.1));
        let stable = SpecialCondition::Cardiac { decompensated: false };
        assert!(approx(pick_mer_factor(&adult(&stable)).factor, 0.9));
        let decompensated = SpecialCondition::Cardiac { decompensated: true };
        assert!(approx(pick_mer_factor(&adult(&decompensated)).factor, 0.8));
    }

    #[test]
    fn test_weight_goal_overrides_everything() {
        let ckd = SpecialCondition::Ckd { stage: Some(3) };
        let loss = MerContext {
            weight_goal: WeightGoal::Loss,
            ..adult(&ckd)
        };
        let mer = pick_mer_factor(&loss);
        assert!(approx(mer.factor, 0.8 * 1.4));
        assert_eq!(mer.label, "Weight loss, moderate activity");

        let gain = MerContext {
            weight_goal: WeightGoal::Gain,
            activity_level: ActivityLevel::Light,
            ..adult(&NO_CONDITION)
        };
        assert!(approx(pick_mer_factor(&gain).factor, 1.4));
    }

    #[test]
    fn test_der_is_rer_times_factor() {
        assert!(approx(compute_der(200.0, 1.2), 240.0));
    }
}
