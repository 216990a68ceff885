use crate::error::{AppError, AppResult};
use crate::models::{Stock, StockPayload};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};

pub async fn list_stocks(State(state): State<AppState>) -> AppResult<Json<Vec<Stock>>> {
    let stocks = state.stock_service.list_all().await?;
    debug!("Listing {} stocks", stocks.len());
    Ok(Json(stocks))
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Stock>> {
    state
        .stock_service
        .get_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))
}

pub async fn create_stock(
    State(state): State<AppState>,
    payload: Result<Json<StockPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    debug!("CreateStock request: symbol={:?}", payload.symbol);

    let stock = state.stock_service.create(&payload).await?;
    let location = format!("/stocks/{}", stock.id);

    info!("Created stock {} ({})", stock.symbol, stock.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(stock),
    ))
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StockPayload>, JsonRejection>,
) -> AppResult<Json<Stock>> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // An unknown id wins over an unreadable body
            if state.stock_service.get_by_id(&id).await?.is_none() {
                return Err(AppError::stock_not_found(&id));
            }
            return Err(rejection.into());
        }
    };
    debug!("UpdateStock request: id={}, symbol={:?}", id, payload.symbol);

    let stock = state.stock_service.update(&id, &payload).await?;

    info!("Updated stock {} ({})", stock.symbol, stock.id);
    Ok(Json(stock))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.stock_service.delete(&id).await?;

    info!("Deleted stock {}", id);
    Ok(StatusCode::OK)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
