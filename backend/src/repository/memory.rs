use async_trait::async_trait;
use tokio::sync::RwLock;

use super::OrderRepository;
use crate::error::{AppError, AppResult};
use crate::models::OrderRecord;

/// Process-local order store
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<OrderRecord>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: OrderRecord) -> AppResult<()> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(AppError::DuplicateEntry(order.order_number));
        }
        orders.push(order);
        Ok(())
    }

    async fn get(&self, order_number: &str) -> AppResult<Option<OrderRecord>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<OrderRecord>> {
        Ok(self.orders.read().await.clone())
    }
}
