//! Cat biometrics and health profile models

use serde::{Deserialize, Serialize};

/// Biometric and health profile of the cat being planned for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatProfile {
    /// Current body weight; `None` when the form field was empty or unreadable
    pub weight_kg: Option<f64>,
    pub age: Age,
    /// Explicit life stage; derived from age when absent
    #[serde(default)]
    pub life_stage: Option<LifeStage>,
    pub sex: Sex,
    #[serde(default)]
    pub breed: Breed,
    pub neuter_status: NeuterStatus,
    #[serde(default)]
    pub body_condition_score: Option<u8>,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub weight_goal: WeightGoal,
    #[serde(default)]
    pub condition: SpecialCondition,
}

impl CatProfile {
    pub fn age_months(&self) -> Option<f64> {
        self.age.in_months()
    }
}

/// Age as entered: a value and its unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Age {
    pub value: Option<f64>,
    pub unit: AgeUnit,
}

impl Age {
    pub fn months(value: f64) -> Self {
        Self {
            value: Some(value),
            unit: AgeUnit::Months,
        }
    }

    pub fn years(value: f64) -> Self {
        Self {
            value: Some(value),
            unit: AgeUnit::Years,
        }
    }

    /// Age converted to months
    pub fn in_months(&self) -> Option<f64> {
        self.value.map(|v| match self.unit {
            AgeUnit::Months => v,
            AgeUnit::Years => v * 12.0,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    #[default]
    Months,
    Years,
}

/// Life stage bands: young kitten under 4 months, older kitten until 12 months,
/// senior from 84 months (7 years)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifeStage {
    KittenYoung,
    KittenOlder,
    Adult,
    Senior,
}

pub const KITTEN_YOUNG_MAX_MONTHS: f64 = 4.0;
pub const ADULT_FROM_MONTHS: f64 = 12.0;
pub const SENIOR_FROM_MONTHS: f64 = 84.0;

impl LifeStage {
    pub fn from_age_months(months: f64) -> Self {
        if months < KITTEN_YOUNG_MAX_MONTHS {
            LifeStage::KittenYoung
        } else if months < ADULT_FROM_MONTHS {
            LifeStage::KittenOlder
        } else if months < SENIOR_FROM_MONTHS {
            LifeStage::Adult
        } else {
            LifeStage::Senior
        }
    }
}

impl std::fmt::Display for LifeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifeStage::KittenYoung => write!(f, "Kitten (under 4 months)"),
            LifeStage::KittenOlder => write!(f, "Kitten (4-12 months)"),
            LifeStage::Adult => write!(f, "Adult"),
            LifeStage::Senior => write!(f, "Senior"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NeuterStatus {
    Neutered,
    Intact,
}

impl std::fmt::Display for NeuterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NeuterStatus::Neutered => write!(f, "neutered"),
            NeuterStatus::Intact => write!(f, "intact"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    #[default]
    Maintain,
    Loss,
    Gain,
}

/// Breeds with a dedicated weight range; anything else falls back to the default range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Breed {
    DomesticShorthair,
    MaineCoon,
    Ragdoll,
    NorwegianForest,
    BritishShorthair,
    ScottishFold,
    Persian,
    ExoticShorthair,
    Siamese,
    Bengal,
    Abyssinian,
    Sphynx,
    Peterbald,
    DevonRex,
    Singapura,
    Mixed,
    #[default]
    #[serde(other)]
    Other,
}

impl Breed {
    /// Resolve a breed key from a form select; unknown keys become `Other`
    pub fn from_key(key: &str) -> Self {
        serde_json::from_value(serde_json::Value::String(key.trim().to_lowercase()))
            .unwrap_or(Breed::Other)
    }

    /// Sphynx and Peterbald
    pub fn is_hairless(&self) -> bool {
        matches!(self, Breed::Sphynx | Breed::Peterbald)
    }
}

/// Activity level: a closed set of multipliers, each with its rationale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Light,
    Normal,
    #[default]
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Low => 0.8,
            ActivityLevel::Light => 1.0,
            ActivityLevel::Normal => 1.2,
            ActivityLevel::Moderate => 1.4,
            ActivityLevel::High => 1.6,
            ActivityLevel::VeryHigh => 1.8,
        }
    }

    pub fn rationale(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Sedentary or obesity-prone, mostly sleeps",
            ActivityLevel::Light => "Indoor cat with little play",
            ActivityLevel::Normal => "Indoor cat with daily play sessions",
            ActivityLevel::Moderate => "Typical active indoor cat",
            ActivityLevel::High => "Indoor/outdoor cat, very playful",
            ActivityLevel::VeryHigh => "Outdoor hunter or highly active young cat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low activity",
            ActivityLevel::Light => "light activity",
            ActivityLevel::Normal => "normal activity",
            ActivityLevel::Moderate => "moderate activity",
            ActivityLevel::High => "high activity",
            ActivityLevel::VeryHigh => "very high activity",
        }
    }
}

/// Special health condition with its condition-specific details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecialCondition {
    #[default]
    None,
    Pregnant {
        /// Gestation week, 1-9
        week: u8,
    },
    Lactating {
        /// Lactation week, 1-6
        week: u8,
        litter_size: Option<u8>,
    },
    Ckd {
        /// IRIS stage 1-4
        stage: Option<u8>,
    },
    Hyperthyroid {
        treated: Option<bool>,
    },
    Diabetes {
        controlled: bool,
    },
    Recovery {
        weeks_since_event: u8,
    },
    Cardiac {
        decompensated: bool,
    },
}

impl SpecialCondition {
    pub fn is_reproductive(&self) -> bool {
        matches!(
            self,
            SpecialCondition::Pregnant { .. } | SpecialCondition::Lactating { .. }
        )
    }
}
