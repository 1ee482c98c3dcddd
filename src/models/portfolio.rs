//! Portfolio request/response models

use serde::Serialize;
use std::collections::HashMap;

use super::contract::ContractResponse;

/// Outcome of POST /api/portfolio/items/{contract_id}
#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub ok: bool,
    /// True when the membership already existed
    pub already: bool,
}

/// Held contract joined with its full contract record
#[derive(Debug, Serialize)]
pub struct PortfolioItemResponse {
    /// Membership record id
    pub id: i32,
    pub contract: ContractResponse,
}

/// Capacity and cost subtotals for one energy type
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct EnergyTypeBreakdown {
    pub capacity_mwh: f64,
    pub cost: f64,
}

/// Summary statistics over all held contracts.
///
/// Monetary values are rounded to 2 decimal places at this boundary; the
/// aggregation itself runs at full precision.
#[derive(Debug, Serialize)]
pub struct PortfolioMetrics {
    pub total_contracts: u64,
    pub total_capacity_mwh: i64,
    pub total_cost: f64,
    pub weighted_avg_price_per_mwh: f64,
    pub by_energy_type: HashMap<String, EnergyTypeBreakdown>,
}
