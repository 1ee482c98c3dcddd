//! Router assembly
//!
//! Contract routes are public; everything under /api/portfolio requires a
//! verified bearer token.

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::env;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;
use crate::auth::require_auth;
use crate::handlers::{auth, contracts, health, portfolio};

/// Build the application router with CORS and request tracing applied
pub fn api_router(state: AppState) -> Router {
    let portfolio_routes = Router::new()
        .route("/portfolio/items", get(portfolio::list_items))
        .route(
            "/portfolio/items/{contract_id}",
            post(portfolio::add_item).delete(portfolio::remove_item),
        )
        .route("/portfolio/metrics", get(portfolio::metrics))
        .route_layer(middleware::from_fn(require_auth));

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/health", get(health::health))
        .route(
            "/contracts",
            get(contracts::list_contracts).post(contracts::create_contract),
        )
        .route("/contracts/price-bounds", get(contracts::price_bounds))
        .route("/contracts/locations", get(contracts::list_locations))
        .route(
            "/contracts/{contract_id}",
            get(contracts::get_contract)
                .patch(contracts::update_contract)
                .delete(contracts::delete_contract),
        )
        .merge(portfolio_routes);

    Router::new()
        .nest("/api", api)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173".to_string())
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
