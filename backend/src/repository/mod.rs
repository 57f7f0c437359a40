//! Order persistence
//!
//! The planner itself is stateless; orders are the only thing the backend stores.

mod json_file;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

pub use json_file::JsonFileOrderRepository;
pub use memory::InMemoryOrderRepository;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::AppResult;
use crate::models::OrderRecord;

/// Storage for placed orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store a new order; fails with `DuplicateEntry` if the order number is taken
    async fn save(&self, order: OrderRecord) -> AppResult<()>;

    /// Look up an order by its order number
    async fn get(&self, order_number: &str) -> AppResult<Option<OrderRecord>>;

    /// All orders, oldest first
    async fn list(&self) -> AppResult<Vec<OrderRecord>>;
}

/// Repository selected by the storage configuration
pub fn from_config(storage: &StorageConfig) -> Arc<dyn OrderRepository> {
    match storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryOrderRepository::new()),
        StorageBackend::JsonFile => Arc::new(JsonFileOrderRepository::new(&storage.orders_path)),
    }
}
