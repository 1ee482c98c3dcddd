//! JWT-based authentication for portfolio endpoints
//!
//! Stateless HS256 bearer tokens. The middleware verifies the token and
//! inserts the claims into request extensions; handlers read the verified
//! subject from there.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::{ApiError, ApiResult};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at timestamp
    pub iat: usize,
    /// Expiration timestamp
    pub exp: usize,
}

fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".to_string())
}

fn jwt_expires_minutes() -> i64 {
    env::var("JWT_EXPIRES_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60)
}

/// Issue an access token for the given subject
pub fn create_access_token(sub: &str) -> ApiResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::minutes(jwt_expires_minutes())).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret().as_bytes()),
    )
    .map_err(|e| ApiError::auth(format!("failed to issue token: {}", e)))
}

/// Verify a token's signature and expiry, returning its claims
pub fn decode_token(token: &str) -> ApiResult<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| ApiError::auth(format!("invalid token: {}", e)))
}

fn extract_bearer(request: &Request) -> Option<String> {
    let auth_header = request.headers().get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Middleware guarding authenticated routes
///
/// On success the verified [`Claims`] are available to handlers through
/// request extensions.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let token = extract_bearer(&request)
        .ok_or_else(|| ApiError::auth("authentication required".to_string()))?;

    let claims = decode_token(&token)?;
    if claims.sub.is_empty() {
        return Err(ApiError::auth("invalid token subject".to_string()));
    }

    tracing::debug!("authenticated request for subject {}", claims.sub);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
