use super::StockStore;
use crate::error::RepositoryError;
use crate::models::Stock;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local stock store. Records are returned in insertion order.
#[derive(Default)]
pub struct InMemoryStockRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    stocks: HashMap<Uuid, Stock>,
    order: Vec<Uuid>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StockStore for InMemoryStockRepository {
    async fn save(&self, stock: &Stock) -> Result<Stock, RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.stocks.insert(stock.id, stock.clone()).is_none() {
            inner.order.push(stock.id);
        }
        Ok(stock.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stock>, RepositoryError> {
        Ok(self.inner.read().await.stocks.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.stocks.get(id).cloned())
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;
        let removed = inner.stocks.remove(&id).is_some();
        if removed {
            inner.order.retain(|existing| *existing != id);
        }
        Ok(removed)
    }
}
