//! Contract request/response models
//!
//! Payloads and query parameters for the /api/contracts endpoints, including
//! the query-parameter validation that runs before any data access.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::entities::contracts::{self, ContractStatus, EnergyType};
use crate::error::ApiError;

/// Sortable fields accepted by the listing endpoint
pub const SORT_KEYS: [&str; 3] = ["price", "quantity", "date"];

fn default_status() -> Option<ContractStatus> {
    Some(ContractStatus::Available)
}

fn default_sort_dir() -> String {
    "desc".to_string()
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    20
}

/// Optional filter parameters shared by the listing and price-bounds queries.
///
/// Absent parameters impose no constraint; empty sets mean "no constraint",
/// not "no matches". Range bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    pub status: Option<ContractStatus>,
    pub energy_type: Vec<EnergyType>,
    pub location: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub qty_min: Option<i32>,
    pub qty_max: Option<i32>,
    pub start_from: Option<NaiveDate>,
    pub end_to: Option<NaiveDate>,
}

/// Query parameters for GET /api/contracts
#[derive(Debug, Clone, Deserialize)]
pub struct ContractListQuery {
    /// Match-any set of energy types (repeated key)
    #[serde(default)]
    pub energy_type: Vec<EnergyType>,
    /// Match-any set of locations (repeated key)
    #[serde(default)]
    pub location: Vec<String>,
    /// Single status filter; unset by the caller means Available
    #[serde(default = "default_status")]
    pub status: Option<ContractStatus>,
    /// One of: price, quantity, date. Unset orders by id descending.
    pub sort_by: Option<String>,
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub qty_min: Option<i32>,
    pub qty_max: Option<i32>,
    /// Earliest accepted delivery_start
    pub start_from: Option<NaiveDate>,
    /// Latest accepted delivery_end
    pub end_to: Option<NaiveDate>,
}

impl ContractListQuery {
    /// Validate parameter combinations before executing any query
    pub fn validate(&self) -> Result<(), ApiError> {
        check_range(self.price_min, self.price_max, "price_min", "price_max")?;
        check_range(self.qty_min, self.qty_max, "qty_min", "qty_max")?;
        check_range(self.start_from, self.end_to, "start_from", "end_to")?;

        if let Some(ref sort_by) = self.sort_by {
            if !SORT_KEYS.contains(&sort_by.as_str()) {
                return Err(ApiError::InvalidSortKey);
            }
        }
        if self.sort_dir != "asc" && self.sort_dir != "desc" {
            return Err(ApiError::InvalidSortDirection);
        }
        if self.page < 1 {
            return Err(ApiError::InvalidPage);
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err(ApiError::InvalidPageSize);
        }
        Ok(())
    }

    pub fn filter(&self) -> ContractFilter {
        ContractFilter {
            status: self.status,
            energy_type: self.energy_type.clone(),
            location: self.location.clone(),
            price_min: self.price_min,
            price_max: self.price_max,
            qty_min: self.qty_min,
            qty_max: self.qty_max,
            start_from: self.start_from,
            end_to: self.end_to,
        }
    }
}

/// Query parameters for GET /api/contracts/price-bounds
///
/// Same predicate semantics as the listing, minus the price bounds themselves.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceBoundsQuery {
    #[serde(default)]
    pub energy_type: Vec<EnergyType>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default = "default_status")]
    pub status: Option<ContractStatus>,
    pub qty_min: Option<i32>,
    pub qty_max: Option<i32>,
    pub start_from: Option<NaiveDate>,
    pub end_to: Option<NaiveDate>,
}

impl PriceBoundsQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        check_range(self.qty_min, self.qty_max, "qty_min", "qty_max")?;
        check_range(self.start_from, self.end_to, "start_from", "end_to")
    }

    pub fn filter(&self) -> ContractFilter {
        ContractFilter {
            status: self.status,
            energy_type: self.energy_type.clone(),
            location: self.location.clone(),
            qty_min: self.qty_min,
            qty_max: self.qty_max,
            start_from: self.start_from,
            end_to: self.end_to,
            ..Default::default()
        }
    }
}

fn check_range<T: PartialOrd>(
    min: Option<T>,
    max: Option<T>,
    min_name: &'static str,
    max_name: &'static str,
) -> Result<(), ApiError> {
    if let (Some(lo), Some(hi)) = (&min, &max) {
        if lo > hi {
            return Err(ApiError::InvalidRange {
                min: min_name,
                max: max_name,
            });
        }
    }
    Ok(())
}

/// Payload for POST /api/contracts
#[derive(Debug, Clone, Deserialize)]
pub struct ContractCreate {
    pub energy_type: EnergyType,
    pub quantity_mwh: i32,
    pub price_per_mwh: f64,
    pub delivery_start: NaiveDate,
    pub delivery_end: NaiveDate,
    pub location: String,
    #[serde(default = "default_create_status")]
    pub status: ContractStatus,
}

fn default_create_status() -> ContractStatus {
    ContractStatus::Available
}

impl ContractCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_quantity(self.quantity_mwh)?;
        validate_price(self.price_per_mwh)?;
        validate_location(&self.location)
    }
}

/// Sparse payload for PATCH /api/contracts/{id}; omitted fields keep their
/// prior values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractUpdate {
    pub energy_type: Option<EnergyType>,
    pub quantity_mwh: Option<i32>,
    pub price_per_mwh: Option<f64>,
    pub delivery_start: Option<NaiveDate>,
    pub delivery_end: Option<NaiveDate>,
    pub location: Option<String>,
    pub status: Option<ContractStatus>,
}

impl ContractUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(quantity) = self.quantity_mwh {
            validate_quantity(quantity)?;
        }
        if let Some(price) = self.price_per_mwh {
            validate_price(price)?;
        }
        if let Some(ref location) = self.location {
            validate_location(location)?;
        }
        Ok(())
    }
}

fn validate_quantity(quantity: i32) -> Result<(), ApiError> {
    if quantity <= 0 {
        return Err(ApiError::InvalidField(
            "quantity_mwh must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ApiError::InvalidField(
            "price_per_mwh must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_location(location: &str) -> Result<(), ApiError> {
    if location.is_empty() || location.chars().count() > 50 {
        return Err(ApiError::InvalidField(
            "location must be 1..=50 characters".to_string(),
        ));
    }
    Ok(())
}

/// Single contract in API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractResponse {
    pub id: i32,
    pub energy_type: EnergyType,
    pub quantity_mwh: i32,
    pub price_per_mwh: f64,
    pub delivery_start: NaiveDate,
    pub delivery_end: NaiveDate,
    pub location: String,
    pub status: ContractStatus,
}

impl From<contracts::Model> for ContractResponse {
    fn from(model: contracts::Model) -> Self {
        Self {
            id: model.id,
            energy_type: model.energy_type,
            quantity_mwh: model.quantity_mwh,
            price_per_mwh: model.price_per_mwh.to_f64().unwrap_or(0.0),
            delivery_start: model.delivery_start,
            delivery_end: model.delivery_end,
            location: model.location,
            status: model.status,
        }
    }
}

/// Page of contracts plus the total count over the full predicate
#[derive(Debug, Serialize)]
pub struct ContractListResponse {
    pub items: Vec<ContractResponse>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
}

/// Min/max price among matching contracts; both null when nothing matches
#[derive(Debug, Serialize)]
pub struct PriceBoundsResponse {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
