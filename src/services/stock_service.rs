use crate::error::{AppError, AppResult};
use crate::models::{Stock, StockPayload};
use crate::repositories::StockStore;
use crate::validation::validate;
use std::sync::Arc;
use uuid::Uuid;

/// Service for managing stocks
///
/// Failures are returned to the caller as-is; nothing here logs or retries.
pub struct StockService {
    store: Arc<dyn StockStore>,
}

impl StockService {
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self { store }
    }

    /// All stocks, in the order the store returns them
    pub async fn list_all(&self) -> AppResult<Vec<Stock>> {
        Ok(self.store.find_all().await?)
    }

    /// Look up a stock; an unknown or malformed id is `Ok(None)`
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Stock>> {
        match Uuid::parse_str(id) {
            Ok(uuid) => Ok(self.store.find_by_id(uuid).await?),
            Err(_) => Ok(None),
        }
    }

    /// Validate and persist a new stock with a freshly generated id
    pub async fn create(&self, payload: &StockPayload) -> AppResult<Stock> {
        validate(payload)?;

        let stock = Stock::new(payload);
        Ok(self.store.save(&stock).await?)
    }

    /// Replace symbol, company name and price of an existing stock
    ///
    /// The existence check runs before validation, so an unknown id is
    /// reported as not found whatever the payload holds.
    pub async fn update(&self, id: &str, payload: &StockPayload) -> AppResult<Stock> {
        let mut stock = self.require(id).await?;

        validate(payload)?;

        let updated = Stock::new(payload);
        let price = updated.price();
        stock.symbol = updated.symbol;
        stock.company_name = updated.company_name;
        stock.change_price(price);

        Ok(self.store.save(&stock).await?)
    }

    /// Remove an existing stock
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let stock = self.require(id).await?;

        self.store.delete_by_id(stock.id).await?;
        Ok(())
    }

    async fn require(&self, id: &str) -> AppResult<Stock> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::stock_not_found(id))
    }
}
