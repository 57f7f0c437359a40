//! Weekly feeding pattern, box settings and pricing inputs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CatProfile, FoodProfile};
use crate::schedule::distribute_wet_days;

pub const DAYS_PER_WEEK: usize = 7;
pub const DEFAULT_MEALS_PER_DAY: u8 = 2;
pub const DEFAULT_SPLIT_DAYS: u8 = 2;
pub const DEFAULT_SAFETY_MARGIN: f64 = 0.10;
pub const DEFAULT_BOX_DAYS: u32 = 30;

/// Which calendar days are wet-food days, and which meal gets the wet ration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyPlan {
    /// Monday first
    pub wet_days: [bool; DAYS_PER_WEEK],
    /// 1-based meal slot receiving the wet ration
    pub wet_meal_index: u8,
    pub meals_per_day: u8,
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self {
            wet_days: [false; DAYS_PER_WEEK],
            wet_meal_index: 1,
            meals_per_day: DEFAULT_MEALS_PER_DAY,
        }
    }
}

impl WeeklyPlan {
    /// Plan with `count` wet days spread evenly over the week (count is capped at 7)
    pub fn with_wet_day_count(count: u8) -> Self {
        Self {
            wet_days: distribute_wet_days(count),
            ..Self::default()
        }
    }

    pub fn wet_day_count(&self) -> u8 {
        self.wet_days.iter().filter(|&&wet| wet).count() as u8
    }

    /// Changing the count discards the current pattern and redistributes
    pub fn set_wet_day_count(&mut self, count: u8) {
        self.wet_days = distribute_wet_days(count);
    }

    /// Flip a single day; the count follows the pattern
    pub fn toggle_day(&mut self, day_index: usize) {
        if let Some(day) = self.wet_days.get_mut(day_index) {
            *day = !*day;
        }
    }
}

/// How the wet units billed for a box are determined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WetMode {
    /// Units follow the computed wet energy need
    #[default]
    Auto,
    /// Caller-supplied unit count is used verbatim
    FixedTotal,
}

/// Box length: named variants or an explicit day count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoxDuration {
    Week,
    TwoWeeks,
    #[default]
    Month,
    Custom(u32),
}

impl BoxDuration {
    /// Plan length in days; a custom length of zero falls back to a month
    pub fn days(&self) -> u32 {
        match self {
            BoxDuration::Week => 7,
            BoxDuration::TwoWeeks => 14,
            BoxDuration::Month => DEFAULT_BOX_DAYS,
            BoxDuration::Custom(0) => DEFAULT_BOX_DAYS,
            BoxDuration::Custom(days) => *days,
        }
    }
}

impl std::fmt::Display for BoxDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxDuration::Week => write!(f, "1 week"),
            BoxDuration::TwoWeeks => write!(f, "2 weeks"),
            BoxDuration::Month => write!(f, "1 month"),
            BoxDuration::Custom(_) => write!(f, "{} days", self.days()),
        }
    }
}

/// Portioning and box settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSettings {
    /// Number of wet feedings one pouch or can is split across
    pub split_days: u8,
    /// Extra fraction packed on top of the computed need (0.10 = 10%)
    pub safety_margin: f64,
    pub wet_mode: WetMode,
    pub fixed_total_units: Option<u32>,
    pub duration: BoxDuration,
    /// Catalog key of the selected box tier
    pub box_type: Option<String>,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            split_days: DEFAULT_SPLIT_DAYS,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            wet_mode: WetMode::Auto,
            fixed_total_units: None,
            duration: BoxDuration::Month,
            box_type: None,
        }
    }
}

impl PlanSettings {
    /// Units forced by the caller, if fixed-total mode is active
    pub fn fixed_units(&self) -> Option<u32> {
        match self.wet_mode {
            WetMode::FixedTotal => self.fixed_total_units,
            WetMode::Auto => None,
        }
    }
}

/// Unit prices; `None` means "not priced yet"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Pricing {
    pub price_per_kg_dry: Option<Decimal>,
    pub price_per_unit_wet: Option<Decimal>,
}

/// Full input snapshot for one calculation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanInput {
    pub cat: CatProfile,
    pub food: FoodProfile,
    #[serde(default)]
    pub plan: WeeklyPlan,
    #[serde(default)]
    pub settings: PlanSettings,
    #[serde(default)]
    pub pricing: Pricing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_duration_days() {
        assert_eq!(BoxDuration::Week.days(), 7);
        assert_eq!(BoxDuration::TwoWeeks.days(), 14);
        assert_eq!(BoxDuration::Month.days(), 30);
        assert_eq!(BoxDuration::Custom(10).days(), 10);
        assert_eq!(BoxDuration::Custom(0).days(), 30);
    }

    #[test]
    fn test_set_wet_day_count_redistributes() {
        let mut plan = WeeklyPlan::with_wet_day_count(1);
        assert_eq!(plan.wet_days, [false, false, false, true, false, false, false]);

        plan.set_wet_day_count(3);
        assert_eq!(plan.wet_days, [false, true, false, true, false, true, false]);
        assert_eq!(plan.wet_day_count(), 3);
    }

    #[test]
    fn test_toggle_day_updates_count() {
        let mut plan = WeeklyPlan::default();
        plan.toggle_day(0);
        plan.toggle_day(6);
        assert_eq!(plan.wet_day_count(), 2);
        plan.toggle_day(0);
        assert_eq!(plan.wet_day_count(), 1);
        plan.toggle_day(42);
        assert_eq!(plan.wet_day_count(), 1);
    }

    #[test]
    fn test_fixed_units_only_in_fixed_mode() {
        let mut settings = PlanSettings {
            fixed_total_units: Some(20),
            ..PlanSettings::default()
        };
        assert_eq!(settings.fixed_units(), None);
        settings.wet_mode = WetMode::FixedTotal;
        assert_eq!(settings.fixed_units(), Some(20));
    }

    #[test]
    fn test_box_duration_json_shape() {
        let custom: BoxDuration = serde_json::from_str(r#"{"custom":10}"#).unwrap();
        assert_eq!(custom, BoxDuration::Custom(10));
        let month: BoxDuration = serde_json::from_str(r#""month""#).unwrap();
        assert_eq!(month, BoxDuration::Month);
    }
}
