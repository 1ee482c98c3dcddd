//! SeaORM entity for energy supply contracts
//!
//! A contract is a quantity of energy deliverable over a date window at a
//! given price, listed on the marketplace for a location.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Energy source backing a contract. Stored as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum EnergyType {
    #[sea_orm(string_value = "Solar")]
    Solar,
    #[sea_orm(string_value = "Wind")]
    Wind,
    #[sea_orm(string_value = "Natural Gas")]
    #[serde(rename = "Natural Gas")]
    NaturalGas,
    #[sea_orm(string_value = "Nuclear")]
    Nuclear,
    #[sea_orm(string_value = "Coal")]
    Coal,
    #[sea_orm(string_value = "Hydro")]
    Hydro,
}

/// Trading lifecycle state of a contract. No exclusivity guarantees are made
/// for the Available -> Reserved -> Sold transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ContractStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Reserved")]
    Reserved,
    #[sea_orm(string_value = "Sold")]
    Sold,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub energy_type: EnergyType,
    /// Contracted volume in MWh
    pub quantity_mwh: i32,
    /// Unit price in USD, 2-decimal precision
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price_per_mwh: Decimal,
    pub delivery_start: Date,
    pub delivery_end: Date,
    /// Free-text delivery region, capped at 50 chars
    pub location: String,
    pub status: ContractStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::portfolio_items::Entity")]
    PortfolioItems,
}

impl Related<super::portfolio_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PortfolioItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
