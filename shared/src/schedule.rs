//! Weekly feeding schedule builder
//!
//! Turns a daily energy target and a wet/dry day pattern into seven day
//! records with per-meal gram and calorie breakdowns.

use crate::models::{DayType, DaySchedule, MealPortion, DAYS_PER_WEEK};
use crate::types::{round1, round5, Weekday};

/// A wet serving never exceeds this share of a full pouch or can
pub const MAX_SERVING_SHARE: f64 = 0.8;

/// Spread `count` wet days evenly over the week (Monday = index 0)
///
/// One wet day lands mid-week; two and three use fixed slots; larger counts are
/// spaced across the whole week, moving forward (and wrapping) on collisions.
pub fn distribute_wet_days(count: u8) -> [bool; DAYS_PER_WEEK] {
    let count = usize::from(count).min(DAYS_PER_WEEK);
    let mut days = [false; DAYS_PER_WEEK];

    match count {
        0 => {}
        1 => days[3] = true,
        2 => {
            days[1] = true;
            days[5] = true;
        }
        3 => {
            days[1] = true;
            days[3] = true;
            days[5] = true;
        }
        _ => {
            let step = (DAYS_PER_WEEK - 1) as f64 / (count - 1) as f64;
            for i in 0..count {
                let mut index = ((i as f64 * step).round() as usize).min(DAYS_PER_WEEK - 1);
                while days[index] {
                    index = (index + 1) % DAYS_PER_WEEK;
                }
                days[index] = true;
            }
        }
    }
    days
}

/// Grams served per wet feeding: one unit split over `split_days`, capped at 80% of a unit
pub fn serving_grams(unit_grams: f64, split_days: u8) -> f64 {
    if unit_grams <= 0.0 {
        return 0.0;
    }
    let split = f64::from(split_days.max(1));
    round5(unit_grams / split).min(unit_grams * MAX_SERVING_SHARE)
}

/// Inputs for building one week
#[derive(Debug, Clone, Copy)]
pub struct WeekParams<'a> {
    pub der_kcal: f64,
    pub meals_per_day: u8,
    pub wet_days: &'a [bool; DAYS_PER_WEEK],
    /// 1-based
    pub wet_meal_index: u8,
    pub unit_grams: f64,
    pub kcal_per_gram_wet: f64,
    pub kcal_per_gram_dry: f64,
    pub split_days: u8,
    pub safety_margin: f64,
}

fn dry_grams_for(kcal: f64, kcal_per_gram_dry: f64) -> f64 {
    if kcal_per_gram_dry <= 0.0 {
        return 0.0;
    }
    round5(kcal / kcal_per_gram_dry)
}

/// Build the seven daily records, Monday first
pub fn build_week(params: &WeekParams<'_>) -> Vec<DaySchedule> {
    let serving = serving_grams(params.unit_grams, params.split_days);

    Weekday::ALL
        .iter()
        .zip(params.wet_days.iter())
        .map(|(day, &is_wet)| build_day(params, day.label(), is_wet, serving))
        .collect()
}

fn build_day(params: &WeekParams<'_>, label: &str, is_wet: bool, serving: f64) -> DaySchedule {
    let der = params.der_kcal;

    let (day_type, wet_grams, wet_kcal) = if is_wet && serving > 0.0 {
        (
            DayType::WetAndDry,
            serving,
            serving * params.kcal_per_gram_wet,
        )
    } else {
        (DayType::DryOnly, 0.0, 0.0)
    };

    let dry_kcal = (der - wet_kcal).max(0.0);
    let dry_grams = dry_grams_for(dry_kcal, params.kcal_per_gram_dry);
    let wet_units = if params.unit_grams > 0.0 {
        wet_grams / params.unit_grams
    } else {
        0.0
    };

    let meals = split_meals(params, day_type, wet_kcal, wet_grams, wet_units, dry_kcal, dry_grams);

    DaySchedule {
        day: label.to_string(),
        day_type,
        der_kcal: der,
        wet_kcal,
        dry_kcal,
        wet_grams,
        dry_grams,
        dry_grams_packed: round5(dry_grams * (1.0 + params.safety_margin.max(0.0))),
        wet_units,
        meals,
    }
}

/// Wet food goes to the designated slot; dry food is shared equally by the other slots
fn split_meals(
    params: &WeekParams<'_>,
    day_type: DayType,
    wet_kcal: f64,
    wet_grams: f64,
    wet_units: f64,
    dry_kcal: f64,
    dry_grams: f64,
) -> Vec<MealPortion> {
    let meals = params.meals_per_day.max(1);
    let wet_slot = params.wet_meal_index.clamp(1, meals);
    let is_wet_day = day_type == DayType::WetAndDry;

    let dry_slots = if is_wet_day && meals > 1 { meals - 1 } else { meals };
    let dry_kcal_share = dry_kcal / f64::from(dry_slots);
    let dry_grams_share = round1(dry_grams / f64::from(dry_slots));

    (1..=meals)
        .map(|meal_index| {
            let is_wet_slot = is_wet_day && meal_index == wet_slot;
            let gets_dry = !is_wet_slot || meals == 1;

            let mut portion = MealPortion {
                meal_index,
                kcal: 0.0,
                wet_grams: 0.0,
                dry_grams: 0.0,
                wet_units: 0.0,
            };
            if is_wet_slot {
                portion.kcal += wet_kcal;
                portion.wet_grams = wet_grams;
                portion.wet_units = wet_units;
            }
            if gets_dry {
                portion.kcal += dry_kcal_share;
                portion.dry_grams = dry_grams_share;
            }
            portion
        })
        .collect()
}
