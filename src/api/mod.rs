//! HTTP surface: maps `/stocks` routes onto [`StockService`](crate::services::StockService).

pub mod handlers;
pub mod router;

pub use router::create_router;
