// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod entities {
    pub mod prelude;

    pub mod contracts;
    pub mod portfolio_items;
}

pub mod services {
    pub mod contracts_service;
    pub mod portfolio_service;
}

pub mod handlers {
    pub mod auth;
    pub mod contracts;
    pub mod health;
    pub mod portfolio;
}

pub mod models {
    pub mod auth;
    pub mod contract;
    pub mod portfolio;
}

pub mod auth;
pub mod error;
pub mod routes;
