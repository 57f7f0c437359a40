//! Request and record models for the backend
//!
//! Re-exports models from the shared crate and adds order-specific models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub use shared::models::*;

use crate::config::PlannerConfig;

/// Plan payload as submitted to the backend; omitted sections take configured defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    pub cat: CatProfile,
    pub food: FoodProfile,
    #[serde(default)]
    pub plan: Option<WeeklyPlan>,
    #[serde(default)]
    pub settings: Option<PlanSettings>,
    #[serde(default)]
    pub pricing: Pricing,
}

impl PlanRequest {
    pub fn into_input(self, planner: &PlannerConfig) -> PlanInput {
        PlanInput {
            cat: self.cat,
            food: self.food,
            plan: self.plan.unwrap_or_else(|| planner.weekly_plan()),
            settings: self.settings.unwrap_or_else(|| planner.settings()),
            pricing: self.pricing,
        }
    }
}

impl From<PlanInput> for PlanRequest {
    fn from(input: PlanInput) -> Self {
        Self {
            cat: input.cat,
            food: input.food,
            plan: Some(input.plan),
            settings: Some(input.settings),
            pricing: input.pricing,
        }
    }
}

/// Input for placing an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(length(min = 1, max = 100, message = "Customer name must be 1-100 characters"))]
    pub customer_name: String,

    #[validate(length(min = 1, max = 50, message = "Cat name must be 1-50 characters"))]
    pub cat_name: String,

    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,

    pub plan: PlanRequest,
}

impl OrderRequest {
    /// Trim names and notes; blank notes become `None`
    pub fn normalized(self) -> Self {
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            customer_name: self.customer_name.trim().to_string(),
            cat_name: self.cat_name.trim().to_string(),
            notes,
            plan: self.plan,
        }
    }
}

/// A stored order: the plan snapshot and the result it was priced with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: Uuid,
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub customer_name: String,
    pub cat_name: String,
    pub notes: Option<String>,
    pub input: PlanInput,
    pub result: NutritionResult,
}

impl OrderRecord {
    pub fn new(
        customer_name: String,
        cat_name: String,
        notes: Option<String>,
        input: PlanInput,
        result: NutritionResult,
    ) -> Self {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        Self {
            id,
            order_number: order_number(id, created_at),
            created_at,
            customer_name,
            cat_name,
            notes,
            input,
            result,
        }
    }
}

/// Generate order number: CAT-YYYYMMDD-XXXXXX
pub fn order_number(id: Uuid, created_at: DateTime<Utc>) -> String {
    let suffix: String = id.simple().to_string().chars().take(6).collect();
    format!(
        "CAT-{}-{}",
        created_at.format("%Y%m%d"),
        suffix.to_uppercase()
    )
}
