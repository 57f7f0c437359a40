//! Food nutrient density models

use serde::{Deserialize, Serialize};

/// Caloric density of the dry and wet food in the box
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodProfile {
    pub dry_kcal_per_100g: Option<f64>,
    #[serde(default)]
    pub wet_density_mode: WetDensityMode,
    #[serde(default)]
    pub wet_kcal_per_100g: Option<f64>,
    #[serde(default)]
    pub wet_kcal_per_unit: Option<f64>,
    /// Mass of one pouch or can
    pub unit_grams: Option<f64>,
    #[serde(default)]
    pub packaging: PackagingType,
}

impl FoodProfile {
    pub fn dry_kcal_per_gram(&self) -> Option<f64> {
        self.dry_kcal_per_100g.map(|kcal| kcal / 100.0)
    }

    /// Wet kcal per gram, using whichever density field the active mode selects
    pub fn wet_kcal_per_gram(&self) -> Option<f64> {
        match self.wet_density_mode {
            WetDensityMode::Per100g => self.wet_kcal_per_100g.map(|kcal| kcal / 100.0),
            WetDensityMode::PerUnit => match (self.wet_kcal_per_unit, self.unit_grams) {
                (Some(kcal), Some(grams)) if grams > 0.0 => Some(kcal / grams),
                _ => None,
            },
        }
    }

    /// Energy in one full pouch or can
    pub fn wet_kcal_per_unit(&self) -> Option<f64> {
        match self.wet_density_mode {
            WetDensityMode::PerUnit => self.wet_kcal_per_unit,
            WetDensityMode::Per100g => match (self.wet_kcal_per_100g, self.unit_grams) {
                (Some(kcal), Some(grams)) => Some(kcal * grams / 100.0),
                _ => None,
            },
        }
    }
}

/// How the wet food density was entered on the label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WetDensityMode {
    #[default]
    Per100g,
    PerUnit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackagingType {
    #[default]
    Pouch,
    Can,
}

impl std::fmt::Display for PackagingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackagingType::Pouch => write!(f, "pouch"),
            PackagingType::Can => write!(f, "can"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(mode: WetDensityMode) -> FoodProfile {
        FoodProfile {
            dry_kcal_per_100g: Some(380.0),
            wet_density_mode: mode,
            wet_kcal_per_100g: Some(80.0),
            wet_kcal_per_unit: Some(68.0),
            unit_grams: Some(85.0),
            packaging: PackagingType::Pouch,
        }
    }

    #[test]
    fn test_wet_density_per_100g_mode() {
        let f = food(WetDensityMode::Per100g);
        assert!((f.wet_kcal_per_gram().unwrap() - 0.8).abs() < 1e-9);
        assert!((f.wet_kcal_per_unit().unwrap() - 68.0).abs() < 1e-9);
    }

    #[test]
    fn test_wet_density_per_unit_mode_ignores_per_100g_field() {
        let mut f = food(WetDensityMode::PerUnit);
        f.wet_kcal_per_100g = None;
        assert!((f.wet_kcal_per_gram().unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(f.wet_kcal_per_unit(), Some(68.0));
    }

    #[test]
    fn test_per_unit_mode_without_unit_mass() {
        let mut f = food(WetDensityMode::PerUnit);
        f.unit_grams = None;
        assert_eq!(f.wet_kcal_per_gram(), None);
    }
}
