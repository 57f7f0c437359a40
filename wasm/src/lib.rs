//! WebAssembly module for the Cat Box Planner
//!
//! Provides client-side computation for:
//! - Live recalculation of the feeding plan as the form changes
//! - Form validation messages
//! - Wet-day distribution for the weekly calendar
//! - Box catalog lookup
//! - Price field formatting

use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::forms::PlanForm;
use shared::parse::parse_optional_decimal;
use shared::validation::ValidationIssue;
use shared::{calculate, validate, PlanError, PlannerSession};

// Re-export shared types for use in JavaScript
pub use shared::models::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("cat box planner ready"));
}

/// Outcome of one calculation pass as seen by the form
#[derive(Debug, Serialize)]
struct PlanResponse {
    ok: bool,
    result: Option<NutritionResult>,
    issues: Vec<ValidationIssue>,
}

fn parse_form(form_json: &str) -> Result<PlanForm, String> {
    serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn plan_response(form_json: &str) -> Result<String, String> {
    let input = parse_form(form_json)?.into_input();
    let response = match calculate(&input) {
        Ok(result) => PlanResponse {
            ok: true,
            result: Some(result),
            issues: Vec::new(),
        },
        Err(PlanError::Invalid(report)) => PlanResponse {
            ok: false,
            result: None,
            issues: report.issues,
        },
    };
    to_json(&response)
}

fn validation_issues(form_json: &str) -> Result<String, String> {
    let input = parse_form(form_json)?.into_input();
    let report = validate(&input.cat, &input.food, &input.plan, &input.settings);
    to_json(&report.issues)
}

/// Calculate the full plan from the raw form payload
///
/// Returns `{ ok, result, issues }`; validation failures are reported in
/// `issues`, malformed JSON is thrown as an error.
#[wasm_bindgen]
pub fn calculate_plan(form_json: &str) -> Result<String, JsValue> {
    plan_response(form_json).map_err(|e| JsValue::from_str(&e))
}

/// Validate the form without calculating; returns the issue list as JSON
#[wasm_bindgen]
pub fn validate_plan(form_json: &str) -> Result<String, JsValue> {
    validation_issues(form_json).map_err(|e| JsValue::from_str(&e))
}

/// Default wet-day pattern for a count, Monday first
#[wasm_bindgen]
pub fn distribute_wet_days(count: u8) -> Vec<u8> {
    shared::schedule::distribute_wet_days(count)
        .iter()
        .map(|&wet| u8::from(wet))
        .collect()
}

/// Resting energy requirement for a weight in kg
#[wasm_bindgen]
pub fn compute_rer(weight_kg: f64) -> f64 {
    shared::energy::compute_rer(weight_kg)
}

/// Normalize a typed price to two decimals; empty when unreadable or negative
#[wasm_bindgen]
pub fn format_price(input: &str) -> String {
    parse_optional_decimal(input)
        .map(|price| format!("{:.2}", price.round_dp(2)))
        .unwrap_or_default()
}

/// The built-in box catalog as JSON
#[wasm_bindgen]
pub fn box_catalog_json() -> Result<String, JsValue> {
    to_json(&BoxCatalog::default()).map_err(|e| JsValue::from_str(&e))
}

/// Stateful planner for the live form; keeps the last good result on screen
#[wasm_bindgen]
pub struct Planner {
    session: PlannerSession,
}

#[wasm_bindgen]
impl Planner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Planner {
        Planner {
            session: PlannerSession::new(),
        }
    }

    /// Recalculate from the form; `true` when a new result replaced the old one
    pub fn recalculate(&mut self, form_json: &str) -> Result<bool, JsValue> {
        let input = parse_form(form_json)
            .map_err(|e| JsValue::from_str(&e))?
            .into_input();
        Ok(self.session.recalculate(&input))
    }

    pub fn last_result_json(&self) -> Option<String> {
        self.session
            .last_result()
            .and_then(|result| to_json(result).ok())
    }

    pub fn messages(&self) -> Vec<String> {
        self.session.issues().messages()
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_FORM: &str = r#"{
        "cat": {
            "weight": "4",
            "age": "3",
            "age_unit": "years",
            "sex": "female",
            "breed": "domestic_shorthair",
            "neuter_status": "neutered",
            "activity_level": "normal"
        },
        "food": {
            "dry_kcal_per_100g": "380",
            "wet_kcal_per_100g": "80",
            "unit_grams": "85"
        },
        "settings": {
            "wet_day_count": "3",
            "duration": "week"
        },
        "pricing": {
            "price_per_kg_dry": "12.50",
            "price_per_unit_wet": "1.35"
        }
    }"#;

    #[test]
    fn test_calculate_plan_valid_form() {
        let json = plan_response(VALID_FORM).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["result"]["box_summary"]["duration_days"], 7);
        assert_eq!(value["issues"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_calculate_plan_empty_form_reports_issues() {
        let json = plan_response("{}").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], false);
        assert!(value["result"].is_null());
        let fields: Vec<&str> = value["issues"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|i| i["field"].as_str())
            .collect();
        assert!(fields.contains(&"weight"));
        assert!(fields.contains(&"dry_kcal_per_100g"));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(plan_response("not json").is_err());
        assert!(validation_issues("{").is_err());
    }

    #[test]
    fn test_distribute_wet_days_pattern() {
        assert_eq!(distribute_wet_days(2), vec![0, 1, 0, 0, 0, 1, 0]);
        assert_eq!(distribute_wet_days(0), vec![0; 7]);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price("12.5"), "12.50");
        assert_eq!(format_price("1,355"), "1.36");
        assert_eq!(format_price(""), "");
        assert_eq!(format_price("-3"), "");
        assert_eq!(format_price("abc"), "");
    }

    #[test]
    fn test_planner_keeps_last_result() {
        let mut planner = Planner::new();
        assert!(planner.recalculate(VALID_FORM).unwrap());
        let first = planner.last_result_json();
        assert!(first.is_some());

        assert!(!planner.recalculate("{}").unwrap());
        assert_eq!(planner.last_result_json(), first);
        assert!(!planner.messages().is_empty());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn calculate_plan_reports_issues_for_empty_form() {
        let json = calculate_plan("{}").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], false);
    }

    #[wasm_bindgen_test]
    fn calculate_plan_throws_on_malformed_json() {
        let err = calculate_plan("not json").unwrap_err();
        let message = err.as_string().unwrap();
        assert!(message.starts_with("Invalid form JSON"));
    }

    #[wasm_bindgen_test]
    fn planner_recalculate_throws_on_malformed_json() {
        let mut planner = Planner::new();
        assert!(planner.recalculate("[").is_err());
        assert!(planner.last_result_json().is_none());
    }
}
