//! Order service: prices a plan and records it as an order

use std::sync::Arc;

use shared::calculate_with_catalog;
use validator::Validate;

use crate::config::PlannerConfig;
use crate::error::{AppError, AppResult};
use crate::models::{BoxCatalog, NutritionResult, OrderRecord, OrderRequest, PlanInput, PlanRequest};
use crate::repository::OrderRepository;

/// Order service wrapping the planner and order storage
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    catalog: BoxCatalog,
    planner: PlannerConfig,
}

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(repo: Arc<dyn OrderRepository>, catalog: BoxCatalog, planner: PlannerConfig) -> Self {
        Self {
            repo,
            catalog,
            planner,
        }
    }

    pub fn catalog(&self) -> &BoxCatalog {
        &self.catalog
    }

    /// Fill omitted sections of a plan request from the planner defaults
    pub fn resolve(&self, request: PlanRequest) -> PlanInput {
        request.into_input(&self.planner)
    }

    /// Calculate a plan without storing anything
    pub fn quote(&self, input: &PlanInput) -> AppResult<NutritionResult> {
        Ok(calculate_with_catalog(input, &self.catalog)?)
    }

    /// Validate, price and persist an order
    pub async fn place_order(&self, request: OrderRequest) -> AppResult<OrderRecord> {
        let request = request.normalized();
        request.validate()?;

        let input = self.resolve(request.plan);
        let result = self.quote(&input)?;

        let record = OrderRecord::new(
            request.customer_name,
            request.cat_name,
            request.notes,
            input,
            result,
        );
        self.repo.save(record.clone()).await?;

        tracing::info!(
            order_number = %record.order_number,
            total_cost = %record.result.cost.total_cost,
            "order placed"
        );
        Ok(record)
    }

    /// Get an order by its order number
    pub async fn get_order(&self, order_number: &str) -> AppResult<OrderRecord> {
        self.repo
            .get(order_number)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {}", order_number)))
    }

    /// All stored orders, oldest first
    pub async fn list_orders(&self) -> AppResult<Vec<OrderRecord>> {
        self.repo.list().await
    }
}
