//! Contract endpoint handlers
//!
//! Thin boundary over the contract service: extract already-validated
//! primitives, call the service, shape the response.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;

use crate::AppState;
use crate::error::ApiError;
use crate::models::contract::{
    ContractCreate, ContractListQuery, ContractListResponse, ContractResponse, ContractUpdate,
    PriceBoundsQuery, PriceBoundsResponse,
};
use crate::services::contracts_service;

/// GET /api/contracts
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ContractListQuery>,
) -> Result<Json<ContractListResponse>, ApiError> {
    let response = contracts_service::list_contracts(&state.db, &query).await?;
    Ok(Json(response))
}

/// POST /api/contracts
pub async fn create_contract(
    State(state): State<AppState>,
    Json(payload): Json<ContractCreate>,
) -> Result<(StatusCode, Json<ContractResponse>), ApiError> {
    let created = contracts_service::create_contract(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// GET /api/contracts/{contract_id}
pub async fn get_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<i32>,
) -> Result<Json<ContractResponse>, ApiError> {
    let contract = contracts_service::get_contract(&state.db, contract_id).await?;
    Ok(Json(contract.into()))
}

/// PATCH /api/contracts/{contract_id}
pub async fn update_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<i32>,
    Json(payload): Json<ContractUpdate>,
) -> Result<Json<ContractResponse>, ApiError> {
    let updated = contracts_service::update_contract(&state.db, contract_id, payload).await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/contracts/{contract_id}
///
/// 204 whether or not the contract existed.
pub async fn delete_contract(
    State(state): State<AppState>,
    Path(contract_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    contracts_service::delete_contract(&state.db, contract_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/contracts/price-bounds
pub async fn price_bounds(
    State(state): State<AppState>,
    Query(query): Query<PriceBoundsQuery>,
) -> Result<Json<PriceBoundsResponse>, ApiError> {
    let bounds = contracts_service::price_bounds(&state.db, &query).await?;
    Ok(Json(bounds))
}

/// GET /api/contracts/locations
pub async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let locations = contracts_service::list_locations(&state.db).await?;
    Ok(Json(locations))
}
