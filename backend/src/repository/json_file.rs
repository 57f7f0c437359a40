use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::OrderRepository;
use crate::error::{AppError, AppResult};
use crate::models::OrderRecord;

/// Orders kept as one JSON array on disk
///
/// Writes go to a sibling temp file that is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileOrderRepository {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileOrderRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> AppResult<Vec<OrderRecord>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::StorageError(format!(
                    "Corrupt orders file {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, orders: &[OrderRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(orders)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for JsonFileOrderRepository {
    async fn save(&self, order: OrderRecord) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut orders = self.read_all().await?;
        if orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(AppError::DuplicateEntry(order.order_number));
        }
        tracing::debug!(
            order_number = %order.order_number,
            path = %self.path.display(),
            "writing order"
        );
        orders.push(order);
        self.write_all(&orders).await
    }

    async fn get(&self, order_number: &str) -> AppResult<Option<OrderRecord>> {
        let _guard = self.lock.lock().await;
        let orders = self.read_all().await?;
        Ok(orders.into_iter().find(|o| o.order_number == order_number))
    }

    async fn list(&self) -> AppResult<Vec<OrderRecord>> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }
}
