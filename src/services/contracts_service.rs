//! Contract query service
//!
//! Builds a single conjunctive predicate from the optional filter parameters
//! and composes it with sorting and offset pagination. The same predicate
//! value backs the page query, the total count, and the price-bounds
//! aggregate, so all views stay consistent with one filter.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

use crate::entities::{contracts, prelude::Contracts};
use crate::error::ApiError;
use crate::models::contract::{
    ContractCreate, ContractFilter, ContractListQuery, ContractListResponse, ContractResponse,
    ContractUpdate, PriceBoundsQuery, PriceBoundsResponse,
};

/// Fold the optional filter parameters into one AND-ed condition.
///
/// Absent parameters (and empty sets) contribute no clause. Range bounds are
/// inclusive on both ends.
pub fn build_filters(filter: &ContractFilter) -> Condition {
    let mut cond = Condition::all();

    if let Some(status) = filter.status {
        cond = cond.add(contracts::Column::Status.eq(status));
    }
    if !filter.energy_type.is_empty() {
        cond = cond.add(contracts::Column::EnergyType.is_in(filter.energy_type.iter().copied()));
    }
    if !filter.location.is_empty() {
        cond = cond.add(contracts::Column::Location.is_in(filter.location.iter().cloned()));
    }
    if let Some(price_min) = filter.price_min {
        cond = cond.add(contracts::Column::PricePerMwh.gte(price_min));
    }
    if let Some(price_max) = filter.price_max {
        cond = cond.add(contracts::Column::PricePerMwh.lte(price_max));
    }
    if let Some(qty_min) = filter.qty_min {
        cond = cond.add(contracts::Column::QuantityMwh.gte(qty_min));
    }
    if let Some(qty_max) = filter.qty_max {
        cond = cond.add(contracts::Column::QuantityMwh.lte(qty_max));
    }
    if let Some(start_from) = filter.start_from {
        cond = cond.add(contracts::Column::DeliveryStart.gte(start_from));
    }
    if let Some(end_to) = filter.end_to {
        cond = cond.add(contracts::Column::DeliveryEnd.lte(end_to));
    }

    cond
}

/// List contracts under the query's predicate, sort, and page window.
///
/// The total is computed over the full predicate, independent of the window.
pub async fn list_contracts(
    db: &DatabaseConnection,
    query: &ContractListQuery,
) -> Result<ContractListResponse, ApiError> {
    query.validate()?;

    let filters = build_filters(&query.filter());
    let select = Contracts::find().filter(filters);

    let total = select.clone().count(db).await?;

    let mut select = match query.sort_by.as_deref() {
        Some(sort_by) => {
            let sort_col = match sort_by {
                "price" => contracts::Column::PricePerMwh,
                "quantity" => contracts::Column::QuantityMwh,
                "date" => contracts::Column::DeliveryStart,
                // validate() already rejected everything else
                _ => return Err(ApiError::InvalidSortKey),
            };
            let order = if query.sort_dir == "asc" {
                Order::Asc
            } else {
                Order::Desc
            };
            // id desc as tie-break keeps equal-key ordering deterministic
            select
                .order_by(sort_col, order)
                .order_by_desc(contracts::Column::Id)
        }
        None => select.order_by_desc(contracts::Column::Id),
    };

    let offset = (query.page - 1) * query.page_size;
    select = select.offset(offset).limit(query.page_size);

    let items = select
        .all(db)
        .await?
        .into_iter()
        .map(ContractResponse::from)
        .collect();

    Ok(ContractListResponse {
        items,
        page: query.page,
        page_size: query.page_size,
        total,
    })
}

/// Fetch a single contract or fail with NotFound
pub async fn get_contract(
    db: &DatabaseConnection,
    contract_id: i32,
) -> Result<contracts::Model, ApiError> {
    Contracts::find_by_id(contract_id)
        .one(db)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "Contract",
        })
}

/// Persist a new contract and return it with its assigned id
pub async fn create_contract(
    db: &DatabaseConnection,
    payload: ContractCreate,
) -> Result<contracts::Model, ApiError> {
    payload.validate()?;

    let contract = contracts::ActiveModel {
        energy_type: Set(payload.energy_type),
        quantity_mwh: Set(payload.quantity_mwh),
        price_per_mwh: Set(to_price(payload.price_per_mwh)?),
        delivery_start: Set(payload.delivery_start),
        delivery_end: Set(payload.delivery_end),
        location: Set(payload.location),
        status: Set(payload.status),
        ..Default::default()
    };

    let created = contract.insert(db).await?;
    tracing::info!("created contract {}", created.id);
    Ok(created)
}

/// Apply a sparse update; omitted fields keep their prior values.
///
/// All supplied fields go out in a single UPDATE statement.
pub async fn update_contract(
    db: &DatabaseConnection,
    contract_id: i32,
    payload: ContractUpdate,
) -> Result<contracts::Model, ApiError> {
    payload.validate()?;

    let existing = get_contract(db, contract_id).await?;

    let mut contract: contracts::ActiveModel = existing.clone().into();
    let mut changed = false;

    if let Some(energy_type) = payload.energy_type {
        contract.energy_type = Set(energy_type);
        changed = true;
    }
    if let Some(quantity) = payload.quantity_mwh {
        contract.quantity_mwh = Set(quantity);
        changed = true;
    }
    if let Some(price) = payload.price_per_mwh {
        contract.price_per_mwh = Set(to_price(price)?);
        changed = true;
    }
    if let Some(delivery_start) = payload.delivery_start {
        contract.delivery_start = Set(delivery_start);
        changed = true;
    }
    if let Some(delivery_end) = payload.delivery_end {
        contract.delivery_end = Set(delivery_end);
        changed = true;
    }
    if let Some(location) = payload.location {
        contract.location = Set(location);
        changed = true;
    }
    if let Some(status) = payload.status {
        contract.status = Set(status);
        changed = true;
    }

    if !changed {
        return Ok(existing);
    }

    Ok(contract.update(db).await?)
}

/// Remove a contract if present; silently succeeds when it is already gone.
/// Owning portfolio rows go with it via the FK cascade.
pub async fn delete_contract(db: &DatabaseConnection, contract_id: i32) -> Result<(), ApiError> {
    let result = Contracts::delete_by_id(contract_id).exec(db).await?;
    if result.rows_affected > 0 {
        tracing::info!("deleted contract {}", contract_id);
    }
    Ok(())
}

/// Min/max price among contracts matching the (price-less) predicate
pub async fn price_bounds(
    db: &DatabaseConnection,
    query: &PriceBoundsQuery,
) -> Result<PriceBoundsResponse, ApiError> {
    query.validate()?;

    let filters = build_filters(&query.filter());
    let bounds: Option<(Option<Decimal>, Option<Decimal>)> = Contracts::find()
        .select_only()
        .column_as(Expr::col(contracts::Column::PricePerMwh).min(), "min_price")
        .column_as(Expr::col(contracts::Column::PricePerMwh).max(), "max_price")
        .filter(filters)
        .into_tuple()
        .one(db)
        .await?;

    let (min_price, max_price) = bounds.unwrap_or((None, None));
    Ok(PriceBoundsResponse {
        min_price: min_price.map(decimal_to_f64),
        max_price: max_price.map(decimal_to_f64),
    })
}

/// Distinct location values across all contracts, lexicographically ordered.
/// Ignores any filter; it feeds the filter UI itself.
pub async fn list_locations(db: &DatabaseConnection) -> Result<Vec<String>, ApiError> {
    let locations = Contracts::find()
        .select_only()
        .column(contracts::Column::Location)
        .distinct()
        .order_by_asc(contracts::Column::Location)
        .into_tuple()
        .all(db)
        .await?;
    Ok(locations)
}

fn to_price(value: f64) -> Result<Decimal, ApiError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| ApiError::InvalidField("price_per_mwh is not representable".to_string()))
}

fn decimal_to_f64(value: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    use crate::entities::contracts::{ContractStatus, EnergyType};

    fn sql_for(filter: &ContractFilter) -> String {
        Contracts::find()
            .filter(build_filters(filter))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn empty_filter_imposes_no_constraint() {
        let sql = sql_for(&ContractFilter::default());
        assert!(!sql.contains("WHERE"), "unexpected predicate in: {}", sql);
    }

    #[test]
    fn set_filters_use_inclusion_semantics() {
        let filter = ContractFilter {
            energy_type: vec![EnergyType::Solar, EnergyType::Wind],
            location: vec!["Texas".to_string()],
            ..Default::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains(r#""energy_type" IN ('Solar', 'Wind')"#));
        assert!(sql.contains(r#""location" IN ('Texas')"#));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let filter = ContractFilter {
            qty_min: Some(100),
            qty_max: Some(500),
            ..Default::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains(r#""quantity_mwh" >= 100"#));
        assert!(sql.contains(r#""quantity_mwh" <= 500"#));
    }

    #[test]
    fn status_filters_on_the_single_value() {
        let filter = ContractFilter {
            status: Some(ContractStatus::Reserved),
            ..Default::default()
        };
        let sql = sql_for(&filter);
        assert!(sql.contains(r#""status" = 'Reserved'"#));
    }

    #[test]
    fn price_rounds_to_two_decimals() {
        assert_eq!(to_price(45.5).unwrap(), Decimal::new(4550, 2));
        assert_eq!(to_price(45.999).unwrap(), Decimal::new(4600, 2));
    }
}
