//! Error types for the planning engine

use thiserror::Error;

use crate::validation::ValidationReport;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Input failed validation; every message is in the report
    #[error("Invalid plan input: {}", .0.messages().join(" "))]
    Invalid(ValidationReport),
}

impl PlanError {
    pub fn report(&self) -> &ValidationReport {
        match self {
            PlanError::Invalid(report) => report,
        }
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
