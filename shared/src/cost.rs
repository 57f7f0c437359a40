//! Cost aggregation for a planned box

use rust_decimal::Decimal;

use crate::models::{BoxSummary, CostBreakdown, Pricing};

const GRAMS_PER_KG: i64 = 1000;
const MONEY_SCALE: u32 = 2;

/// Price a box; a missing price contributes nothing
pub fn price_box(summary: &BoxSummary, pricing: &Pricing) -> CostBreakdown {
    let dry_kg = Decimal::from(summary.dry_grams.round() as i64) / Decimal::from(GRAMS_PER_KG);
    let dry_cost = pricing
        .price_per_kg_dry
        .map_or(Decimal::ZERO, |price| dry_kg * price)
        .round_dp(MONEY_SCALE);

    let wet_cost = pricing
        .price_per_unit_wet
        .map_or(Decimal::ZERO, |price| Decimal::from(summary.wet_units_billed) * price)
        .round_dp(MONEY_SCALE);

    CostBreakdown {
        dry_cost,
        wet_cost,
        total_cost: dry_cost + wet_cost,
    }
}
