//! Box planner: scales a weekly schedule to a multi-day box
//!
//! Quantities are scaled linearly by `days / 7`, inflated by the safety margin
//! and rounded to 5 g. Wet packaging units are rounded up to whole units unless
//! the caller fixes the total.

use crate::models::{BoxDuration, BoxSummary, BoxTypeConfig, DaySchedule, DayType, WetMode};
use crate::types::round5;

// Absorbs float noise so an exact multiple of the unit energy is not rounded up.
const UNIT_EPSILON: f64 = 1e-9;

/// Inputs for scaling a week into a box
#[derive(Debug, Clone, Copy)]
pub struct BoxParams {
    pub duration: BoxDuration,
    pub wet_mode: WetMode,
    /// Only read in `WetMode::FixedTotal`
    pub fixed_total_units: Option<u32>,
    pub safety_margin: f64,
    /// Energy in one full pouch or can
    pub wet_kcal_per_unit: f64,
}

fn ceil_units(value: f64) -> u32 {
    if value <= 0.0 {
        return 0;
    }
    (value - UNIT_EPSILON).ceil().max(0.0) as u32
}

fn week_total(week: &[DaySchedule], field: impl Fn(&DaySchedule) -> f64) -> f64 {
    week.iter().map(field).sum()
}

/// Aggregate a seven-day schedule over the requested box duration
pub fn build_box(week: &[DaySchedule], params: &BoxParams) -> BoxSummary {
    let duration_days = params.duration.days();
    let scale = f64::from(duration_days) / week.len().max(1) as f64;
    let inflate = 1.0 + params.safety_margin.max(0.0);

    let wet_days_per_week = week
        .iter()
        .filter(|d| d.day_type == DayType::WetAndDry)
        .count();
    let wet_kcal_need = week_total(week, |d| d.wet_kcal) * scale * inflate;
    let wet_units_required = if params.wet_kcal_per_unit > 0.0 {
        ceil_units(wet_kcal_need / params.wet_kcal_per_unit)
    } else {
        0
    };

    let wet_units_billed = match (params.wet_mode, params.fixed_total_units) {
        (WetMode::FixedTotal, Some(units)) => units,
        _ => wet_units_required,
    };

    let serving_grams = week
        .iter()
        .find(|d| d.day_type == DayType::WetAndDry)
        .map_or(0.0, |d| d.wet_grams);

    let summary = BoxSummary {
        duration_days,
        wet_days: (wet_days_per_week as f64 * scale).round() as u32,
        total_der_kcal: week_total(week, |d| d.der_kcal) * scale,
        dry_grams: round5(week_total(week, |d| d.dry_grams) * scale * inflate),
        wet_grams: round5(week_total(week, |d| d.wet_grams) * scale * inflate),
        wet_units_required,
        wet_units_billed,
        wet_mode: params.wet_mode,
        serving_grams,
        treat_units: 0,
        box_type: None,
    };

    tracing::debug!(
        duration_days,
        dry_grams = summary.dry_grams,
        wet_units_required,
        wet_units_billed,
        "built box summary"
    );
    summary
}

/// Restrict a box summary to what a catalog tier ships
///
/// Excluded categories are zeroed and treats are added per week of duration.
/// Wet tiers in auto mode bill at least their weekly bag quota, and never fewer
/// units than the computed need. A caller's fixed total is left as given.
pub fn apply_box_type(mut summary: BoxSummary, box_type: &BoxTypeConfig) -> BoxSummary {
    let weeks = f64::from(summary.duration_days) / 7.0;

    if !box_type.includes_dry {
        summary.dry_grams = 0.0;
    }

    if !box_type.includes_wet {
        summary.wet_days = 0;
        summary.wet_grams = 0.0;
        summary.wet_units_required = 0;
        summary.wet_units_billed = 0;
        summary.serving_grams = 0.0;
    } else if summary.wet_mode == WetMode::Auto
        && summary.wet_days > 0
        && box_type.wet_bags_per_week > 0
    {
        let quota = ceil_units(f64::from(box_type.wet_bags_per_week) * weeks);
        summary.wet_units_billed = summary.wet_units_required.max(quota);
    }

    summary.treat_units = if box_type.includes_treats {
        ceil_units(f64::from(box_type.treat_units_per_week) * weeks)
    } else {
        0
    };
    summary.box_type = Some(box_type.key.clone());
    summary
}
