//! Login handler issuing access tokens for the demo credentials

use axum::Json;

use crate::auth::create_access_token;
use crate::error::ApiError;
use crate::models::auth::{LoginRequest, TokenResponse};

const DEMO_USERNAME: &str = "demo";
const DEMO_PASSWORD: &str = "1234";

/// POST /api/auth/login
pub async fn login(Json(payload): Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
    if payload.username != DEMO_USERNAME || payload.password != DEMO_PASSWORD {
        return Err(ApiError::auth("invalid credentials"));
    }

    let token = create_access_token(&payload.username)?;
    Ok(Json(TokenResponse::bearer(token)))
}
