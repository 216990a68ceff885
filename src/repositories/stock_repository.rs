use super::StockStore;
use crate::error::RepositoryError;
use crate::models::Stock;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for stock data access backed by PostgreSQL
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    /// Create a new StockRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockStore for StockRepository {
    async fn save(&self, stock: &Stock) -> Result<Stock, RepositoryError> {
        let saved = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (id, symbol, company_name, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET symbol = EXCLUDED.symbol,
                company_name = EXCLUDED.company_name,
                price = EXCLUDED.price
            RETURNING id, symbol, company_name, price
            "#,
        )
        .bind(stock.id)
        .bind(&stock.symbol)
        .bind(&stock.company_name)
        .bind(stock.price())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Stock>, RepositoryError> {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            SELECT id, symbol, company_name, price
            FROM stock
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    async fn find_all(&self) -> Result<Vec<Stock>, RepositoryError> {
        let stocks = sqlx::query_as::<_, Stock>(
            r#"
            SELECT id, symbol, company_name, price
            FROM stock
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stocks)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM stock
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
