//! Calculation output models
//!
//! Plain data only: these are serialized into order records and receipts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LifeStage, WetMode};

/// Current weight compared against the healthy range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightStatus {
    Low,
    High,
    Ok,
    /// No range applies (growth phase)
    Na,
}

impl std::fmt::Display for WeightStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightStatus::Low => write!(f, "Underweight"),
            WeightStatus::High => write!(f, "Overweight"),
            WeightStatus::Ok => write!(f, "Healthy weight"),
            WeightStatus::Na => write!(f, "Not assessed"),
        }
    }
}

/// Healthy weight range in kg, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl WeightRange {
    pub const fn new(min_kg: f64, max_kg: f64) -> Self {
        Self { min_kg, max_kg }
    }

    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min_kg && weight_kg <= self.max_kg
    }

    pub fn midpoint(&self) -> f64 {
        (self.min_kg + self.max_kg) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdealWeightEstimate {
    /// `None` while the cat is still growing
    pub ideal_kg: Option<f64>,
    pub range: Option<WeightRange>,
    pub note: String,
}

/// Resolved MER multiplier and how it was reached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MerFactor {
    pub factor: f64,
    pub label: String,
    pub resolved_stage: LifeStage,
}

/// Which weight fed the RER formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightBasis {
    Current,
    Ideal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    WetAndDry,
    DryOnly,
}

/// One meal slot of a day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPortion {
    /// 1-based
    pub meal_index: u8,
    pub kcal: f64,
    pub wet_grams: f64,
    pub dry_grams: f64,
    pub wet_units: f64,
}

/// Feeding record for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySchedule {
    pub day: String,
    pub day_type: DayType,
    pub der_kcal: f64,
    pub wet_kcal: f64,
    pub dry_kcal: f64,
    pub wet_grams: f64,
    pub dry_grams: f64,
    /// Dry grams to pack for this day including the safety margin
    pub dry_grams_packed: f64,
    pub wet_units: f64,
    pub meals: Vec<MealPortion>,
}

/// Aggregated quantities for a whole box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxSummary {
    pub duration_days: u32,
    pub wet_days: u32,
    pub total_der_kcal: f64,
    pub dry_grams: f64,
    pub wet_grams: f64,
    /// Units needed to cover the wet energy, rounded up
    pub wet_units_required: u32,
    /// Units shown and charged; equals the requirement unless overridden
    pub wet_units_billed: u32,
    pub wet_mode: WetMode,
    /// Grams served per wet feeding
    pub serving_grams: f64,
    pub treat_units: u32,
    pub box_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub dry_cost: Decimal,
    pub wet_cost: Decimal,
    pub total_cost: Decimal,
}

/// Complete result of one successful calculation pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionResult {
    pub rer_kcal: f64,
    pub mer: MerFactor,
    pub der_kcal: f64,
    pub weight_used_kg: f64,
    pub weight_basis: WeightBasis,
    pub weight_status: WeightStatus,
    pub ideal_weight: IdealWeightEstimate,
    pub schedule: Vec<DaySchedule>,
    pub box_summary: BoxSummary,
    pub cost: CostBreakdown,
}
