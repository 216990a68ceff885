pub mod memory_repository;
pub mod stock_repository;

pub use memory_repository::InMemoryStockRepository;
pub use stock_repository::StockRepository;

use crate::error::RepositoryError;
use crate::models::Stock;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed persistence for stock records
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Insert or replace the record with `stock.id`
    async fn save(&self, stock: &Stock) -> Result<Stock, RepositoryError>;

    /// Find a stock by UUID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stock>, RepositoryError>;

    /// All stocks, in store order
    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError>;

    /// Delete a stock; returns whether a row was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
