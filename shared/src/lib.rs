//! Nutrition and box-planning engine for the Cat Box Planner
//!
//! This crate contains the calculation pipeline and the models shared between
//! the backend, the browser form (via WASM), and other components of the system.

pub mod box_planner;
pub mod calculator;
pub mod cost;
pub mod energy;
pub mod error;
pub mod forms;
pub mod ideal_weight;
pub mod models;
pub mod parse;
pub mod schedule;
pub mod types;
pub mod validation;

pub use calculator::{calculate, calculate_with_catalog, PlannerSession};
pub use error::{PlanError, PlanResult};
pub use models::*;
pub use types::*;
pub use validation::{validate, Severity, ValidationIssue, ValidationReport};
