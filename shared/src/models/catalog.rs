//! Box product tiers offered by the storefront

use serde::{Deserialize, Serialize};

use super::BoxDuration;

/// A named box tier and the food categories it ships
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxTypeConfig {
    pub key: String,
    pub name: String,
    pub includes_dry: bool,
    pub includes_wet: bool,
    pub includes_treats: bool,
    pub wet_bags_per_week: u32,
    pub treat_units_per_week: u32,
    pub variants: Vec<BoxVariant>,
}

impl BoxTypeConfig {
    pub fn variant(&self, duration: BoxDuration) -> Option<&BoxVariant> {
        self.variants.iter().find(|v| v.duration == duration)
    }
}

/// A sellable duration of a box tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxVariant {
    pub duration: BoxDuration,
    pub label: String,
}

/// Catalog of box tiers, owned by the storefront and read by the planner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxCatalog {
    pub box_types: Vec<BoxTypeConfig>,
}

impl BoxCatalog {
    pub fn new(box_types: Vec<BoxTypeConfig>) -> Self {
        Self { box_types }
    }

    pub fn find(&self, key: &str) -> Option<&BoxTypeConfig> {
        self.box_types.iter().find(|t| t.key == key)
    }
}

fn standard_variants() -> Vec<BoxVariant> {
    [
        (BoxDuration::Week, "Weekly box"),
        (BoxDuration::TwoWeeks, "Two-week box"),
        (BoxDuration::Month, "Monthly box"),
    ]
    .into_iter()
    .map(|(duration, label)| BoxVariant {
        duration,
        label: label.to_string(),
    })
    .collect()
}

impl Default for BoxCatalog {
    fn default() -> Self {
        let tier = |key: &str, name: &str, wet: bool, treats: bool, bags: u32, treat_units: u32| {
            BoxTypeConfig {
                key: key.to_string(),
                name: name.to_string(),
                includes_dry: true,
                includes_wet: wet,
                includes_treats: treats,
                wet_bags_per_week: bags,
                treat_units_per_week: treat_units,
                variants: standard_variants(),
            }
        };

        Self::new(vec![
            tier("dry", "Dry Essentials", false, false, 0, 0),
            tier("balance", "Balance Mix", true, false, 3, 0),
            tier("deluxe", "Deluxe Mix", true, true, 5, 2),
            tier("gourmet", "Gourmet Feast", true, true, 7, 3),
        ])
    }
}
