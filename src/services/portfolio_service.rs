//! Portfolio service
//!
//! Membership mutations and the aggregation over held contracts. Every
//! function takes the user identity as an explicit parameter; the single-user
//! default is resolved at the HTTP boundary, not here.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sea_orm::{
    ActiveEnum, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, sea_query::OnConflict,
};
use std::collections::HashMap;

use crate::entities::{
    contracts::{self, EnergyType},
    portfolio_items,
    prelude::{Contracts, PortfolioItems},
};
use crate::error::ApiError;
use crate::models::portfolio::{
    AddItemResponse, EnergyTypeBreakdown, PortfolioItemResponse, PortfolioMetrics,
};

/// Add a contract to the user's portfolio.
///
/// The store's unique (user_id, contract_id) index is the source of truth:
/// a conflicting insert — including one lost to a racing request — collapses
/// to the "already present" outcome instead of a duplicate row.
pub async fn add_item(
    db: &DatabaseConnection,
    user_id: i32,
    contract_id: i32,
) -> Result<AddItemResponse, ApiError> {
    let item = portfolio_items::ActiveModel {
        user_id: Set(user_id),
        contract_id: Set(contract_id),
        ..Default::default()
    };

    let insert = PortfolioItems::insert(item)
        .on_conflict(
            OnConflict::columns([
                portfolio_items::Column::UserId,
                portfolio_items::Column::ContractId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(db)
        .await;

    match insert {
        Ok(_) => {
            tracing::info!("user {} added contract {} to portfolio", user_id, contract_id);
            Ok(AddItemResponse {
                ok: true,
                already: false,
            })
        }
        Err(DbErr::RecordNotInserted) => Ok(AddItemResponse {
            ok: true,
            already: true,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Remove a membership; no-op when it does not exist
pub async fn remove_item(
    db: &DatabaseConnection,
    user_id: i32,
    contract_id: i32,
) -> Result<(), ApiError> {
    PortfolioItems::delete_many()
        .filter(portfolio_items::Column::UserId.eq(user_id))
        .filter(portfolio_items::Column::ContractId.eq(contract_id))
        .exec(db)
        .await?;
    Ok(())
}

/// All held contracts joined with their full records, most recently added
/// first (membership id descending)
pub async fn list_items(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Vec<PortfolioItemResponse>, ApiError> {
    let rows = PortfolioItems::find()
        .find_also_related(Contracts)
        .filter(portfolio_items::Column::UserId.eq(user_id))
        .order_by_desc(portfolio_items::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, contract)| {
            contract.map(|c| PortfolioItemResponse {
                id: item.id,
                contract: c.into(),
            })
        })
        .collect())
}

/// Aggregate the user's held contracts into summary statistics
pub async fn metrics(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<PortfolioMetrics, ApiError> {
    let rows: Vec<(EnergyType, i32, Decimal)> = PortfolioItems::find()
        .filter(portfolio_items::Column::UserId.eq(user_id))
        .join(JoinType::InnerJoin, portfolio_items::Relation::Contracts.def())
        .select_only()
        .column(contracts::Column::EnergyType)
        .column(contracts::Column::QuantityMwh)
        .column(contracts::Column::PricePerMwh)
        .into_tuple()
        .all(db)
        .await?;

    Ok(summarize(&rows))
}

/// Reduce joined (energy_type, quantity, price) rows to portfolio metrics.
///
/// Sums run at full Decimal precision; monetary outputs are rounded to two
/// decimal places only at this boundary. A zero-capacity portfolio reports a
/// zero weighted average rather than dividing by zero.
fn summarize(rows: &[(EnergyType, i32, Decimal)]) -> PortfolioMetrics {
    let mut total_capacity: i64 = 0;
    let mut total_cost = Decimal::ZERO;
    let mut by_energy_type: HashMap<String, (Decimal, Decimal)> = HashMap::new();

    for (energy_type, quantity, price) in rows {
        let capacity = Decimal::from(*quantity);
        let cost = capacity * *price;

        total_capacity += i64::from(*quantity);
        total_cost += cost;

        let entry = by_energy_type
            .entry(energy_type.to_value())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += capacity;
        entry.1 += cost;
    }

    let weighted_avg = if total_capacity == 0 {
        Decimal::ZERO
    } else {
        total_cost / Decimal::from(total_capacity)
    };

    PortfolioMetrics {
        total_contracts: rows.len() as u64,
        total_capacity_mwh: total_capacity,
        total_cost: round2(total_cost),
        weighted_avg_price_per_mwh: round2(weighted_avg),
        by_energy_type: by_energy_type
            .into_iter()
            .map(|(energy_type, (capacity, cost))| {
                (
                    energy_type,
                    EnergyTypeBreakdown {
                        capacity_mwh: capacity.to_f64().unwrap_or(0.0),
                        cost: round2(cost),
                    },
                )
            })
            .collect(),
    }
}

fn round2(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or(0.0)
}
