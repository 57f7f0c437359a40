//! Raw form payloads as posted by the storefront UI
//!
//! Numeric fields are kept as text and converted with the `parse` helpers.

use serde::{Deserialize, Serialize};

use crate::models::*;
use crate::parse::{parse_optional_decimal, parse_optional_int, parse_optional_number};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatForm {
    pub weight: String,
    pub age: String,
    pub age_unit: AgeUnit,
    pub life_stage: Option<LifeStage>,
    pub sex: Option<Sex>,
    pub breed: String,
    pub neuter_status: Option<NeuterStatus>,
    pub body_condition_score: String,
    pub activity_level: ActivityLevel,
    pub weight_goal: WeightGoal,
    pub condition: SpecialCondition,
}

impl CatForm {
    pub fn into_profile(self) -> CatProfile {
        CatProfile {
            weight_kg: parse_optional_number(&self.weight),
            age: Age {
                value: parse_optional_number(&self.age),
                unit: self.age_unit,
            },
            life_stage: self.life_stage,
            // unset radio groups fall back to the form's preselected option
            sex: self.sex.unwrap_or(Sex::Female),
            breed: Breed::from_key(&self.breed),
            neuter_status: self.neuter_status.unwrap_or(NeuterStatus::Neutered),
            body_condition_score: parse_optional_int(&self.body_condition_score)
                .and_then(|score| u8::try_from(score).ok()),
            activity_level: self.activity_level,
            weight_goal: self.weight_goal,
            condition: self.condition,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FoodForm {
    pub dry_kcal_per_100g: String,
    pub wet_density_mode: WetDensityMode,
    pub wet_kcal_per_100g: String,
    pub wet_kcal_per_unit: String,
    pub unit_grams: String,
    pub packaging: PackagingType,
}

impl FoodForm {
    pub fn into_profile(self) -> FoodProfile {
        FoodProfile {
            dry_kcal_per_100g: parse_optional_number(&self.dry_kcal_per_100g),
            wet_density_mode: self.wet_density_mode,
            wet_kcal_per_100g: parse_optional_number(&self.wet_kcal_per_100g),
            wet_kcal_per_unit: parse_optional_number(&self.wet_kcal_per_unit),
            unit_grams: parse_optional_number(&self.unit_grams),
            packaging: self.packaging,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PricingForm {
    pub price_per_kg_dry: String,
    pub price_per_unit_wet: String,
}

impl PricingForm {
    pub fn into_pricing(self) -> Pricing {
        Pricing {
            price_per_kg_dry: parse_optional_decimal(&self.price_per_kg_dry),
            price_per_unit_wet: parse_optional_decimal(&self.price_per_unit_wet),
        }
    }
}

/// Box selector: a named duration, or "custom" with a free-text day count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DurationChoice {
    Week,
    TwoWeeks,
    #[default]
    Month,
    Custom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub wet_days: Option<[bool; DAYS_PER_WEEK]>,
    /// Used only when no explicit pattern is posted
    pub wet_day_count: String,
    pub wet_meal_index: String,
    pub meals_per_day: String,
    pub split_days: String,
    /// Percent, e.g. "10" for a 10% margin
    pub safety_margin_percent: String,
    pub wet_mode: WetMode,
    pub fixed_total_units: String,
    pub duration: DurationChoice,
    pub custom_days: String,
    pub box_type: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            wet_days: None,
            wet_day_count: String::new(),
            wet_meal_index: "1".to_string(),
            meals_per_day: DEFAULT_MEALS_PER_DAY.to_string(),
            split_days: DEFAULT_SPLIT_DAYS.to_string(),
            safety_margin_percent: "10".to_string(),
            wet_mode: WetMode::Auto,
            fixed_total_units: String::new(),
            duration: DurationChoice::Month,
            custom_days: String::new(),
            box_type: String::new(),
        }
    }
}

impl SettingsForm {
    pub fn into_plan_and_settings(self) -> (WeeklyPlan, PlanSettings) {
        let small = |input: &str| parse_optional_int(input).and_then(|v| u8::try_from(v).ok());

        let wet_days = match self.wet_days {
            Some(pattern) => pattern,
            None => {
                let count = small(&self.wet_day_count).unwrap_or(0);
                crate::schedule::distribute_wet_days(count)
            }
        };

        let plan = WeeklyPlan {
            wet_days,
            // zero is out of range and reported by the validator
            wet_meal_index: small(&self.wet_meal_index).unwrap_or(0),
            meals_per_day: small(&self.meals_per_day).unwrap_or(0),
        };

        let duration = match self.duration {
            DurationChoice::Week => BoxDuration::Week,
            DurationChoice::TwoWeeks => BoxDuration::TwoWeeks,
            DurationChoice::Month => BoxDuration::Month,
            DurationChoice::Custom => {
                BoxDuration::Custom(parse_optional_int(&self.custom_days).unwrap_or(0))
            }
        };

        let box_type = Some(self.box_type.trim().to_string()).filter(|key| !key.is_empty());

        let settings = PlanSettings {
            split_days: small(&self.split_days).unwrap_or(DEFAULT_SPLIT_DAYS),
            safety_margin: parse_optional_number(&self.safety_margin_percent)
                .map(|percent| percent / 100.0)
                .unwrap_or(DEFAULT_SAFETY_MARGIN),
            wet_mode: self.wet_mode,
            fixed_total_units: parse_optional_int(&self.fixed_total_units),
            duration,
            box_type,
        };

        (plan, settings)
    }
}

/// Everything the calculator form posts in one payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlanForm {
    pub cat: CatForm,
    pub food: FoodForm,
    pub settings: SettingsForm,
    pub pricing: PricingForm,
}

impl PlanForm {
    pub fn into_input(self) -> PlanInput {
        let (plan, settings) = self.settings.into_plan_and_settings();
        PlanInput {
            cat: self.cat.into_profile(),
            food: self.food.into_profile(),
            plan,
            settings,
            pricing: self.pricing.into_pricing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cat_form_yields_missing_numbers() {
        let profile = CatForm::default().into_profile();
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.age.value, None);
        assert_eq!(profile.body_condition_score, None);
        assert_eq!(profile.breed, Breed::Other);
    }

    #[test]
    fn test_cat_form_parses_text_fields() {
        let form = CatForm {
            weight: "4,2".to_string(),
            age: "3".to_string(),
            age_unit: AgeUnit::Years,
            breed: "maine_coon".to_string(),
            body_condition_score: "5".to_string(),
            ..CatForm::default()
        };
        let profile = form.into_profile();
        assert_eq!(profile.weight_kg, Some(4.2));
        assert_eq!(profile.age_months(), Some(36.0));
        assert_eq!(profile.breed, Breed::MaineCoon);
        assert_eq!(profile.body_condition_score, Some(5));
    }

    #[test]
    fn test_settings_form_distributes_count_without_pattern() {
        let form = SettingsForm {
            wet_day_count: "2".to_string(),
            ..SettingsForm::default()
        };
        let (plan, settings) = form.into_plan_and_settings();
        assert_eq!(plan.wet_days, [false, true, false, false, false, true, false]);
        assert_eq!(plan.meals_per_day, 2);
        assert!((settings.safety_margin - 0.10).abs() < 1e-9);
        assert_eq!(settings.duration, BoxDuration::Month);
        assert_eq!(settings.box_type, None);
    }

    #[test]
    fn test_settings_form_custom_duration() {
        let form = SettingsForm {
            duration: DurationChoice::Custom,
            custom_days: String::new(),
            ..SettingsForm::default()
        };
        let (_, settings) = form.into_plan_and_settings();
        assert_eq!(settings.duration, BoxDuration::Custom(0));
        assert_eq!(settings.duration.days(), 30);
    }

    #[test]
    fn test_empty_pricing_is_unpriced() {
        let pricing = PricingForm::default().into_pricing();
        assert_eq!(pricing, Pricing::default());
    }
}
