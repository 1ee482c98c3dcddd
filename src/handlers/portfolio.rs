//! Portfolio endpoint handlers
//!
//! All routes here sit behind the JWT middleware; the verified claims arrive
//! through request extensions. The aggregator itself is user-agnostic — the
//! single-user default is resolved here, at the boundary, and nowhere else.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::auth::Claims;
use crate::error::ApiError;
use crate::models::portfolio::{AddItemResponse, PortfolioItemResponse, PortfolioMetrics};
use crate::services::portfolio_service;

/// The one user this deployment recognizes
const DEFAULT_USER_ID: i32 = 1;

/// Map a verified token subject to a storage user id. Single-user for now;
/// multi-user support only has to change this resolution step.
fn resolve_user_id(_claims: &Claims) -> i32 {
    DEFAULT_USER_ID
}

/// POST /api/portfolio/items/{contract_id}
pub async fn add_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(contract_id): Path<i32>,
) -> Result<(StatusCode, Json<AddItemResponse>), ApiError> {
    let user_id = resolve_user_id(&claims);
    let outcome = portfolio_service::add_item(&state.db, user_id, contract_id).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// DELETE /api/portfolio/items/{contract_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(contract_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let user_id = resolve_user_id(&claims);
    portfolio_service::remove_item(&state.db, user_id, contract_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/portfolio/items
pub async fn list_items(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PortfolioItemResponse>>, ApiError> {
    let user_id = resolve_user_id(&claims);
    let items = portfolio_service::list_items(&state.db, user_id).await?;
    Ok(Json(items))
}

/// GET /api/portfolio/metrics
pub async fn metrics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<PortfolioMetrics>, ApiError> {
    let user_id = resolve_user_id(&claims);
    let metrics = portfolio_service::metrics(&state.db, user_id).await?;
    Ok(Json(metrics))
}
