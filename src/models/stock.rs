use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stock model representing one tracked ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: Uuid,
    pub symbol: String,
    pub company_name: String,
    price: f64,
}

/// Client-supplied create/update body. Carries no id: identity comes from
/// the store on create and from the path on update.
///
/// Fields may be missing or null; validation reports them like blank values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPayload {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Stock {
    /// Create a new Stock from a payload with a freshly generated id
    pub fn new(payload: &StockPayload) -> Self {
        let mut stock = Self {
            id: Uuid::new_v4(),
            symbol: payload.symbol.clone().unwrap_or_default(),
            company_name: payload.company_name.clone().unwrap_or_default(),
            price: 0.0,
        };
        stock.change_price(payload.price.unwrap_or_default());
        stock
    }

    /// Current price
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Sole writer of `price`. Every price assignment goes through here.
    pub fn change_price(&mut self, amount: f64) -> f64 {
        self.price = amount;
        self.price
    }
}

impl StockPayload {
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: Some(symbol.into()),
            company_name: Some(company_name.into()),
            price: Some(price),
        }
    }
}
