//! Domain models for the stock broker.

pub mod stock;

pub use stock::{Stock, StockPayload};
