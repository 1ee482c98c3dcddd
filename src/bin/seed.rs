//! Seed the marketplace with demo contracts.
//!
//! Run with `cargo run --bin seed`. Skips seeding when contracts already
//! exist so it is safe to re-run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveValue::Set, Database, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use std::env;

use gridmarket_backend::entities::{
    contracts::{self, ContractStatus, EnergyType},
    prelude::Contracts,
};

fn sample(
    energy_type: EnergyType,
    quantity_mwh: i32,
    price_per_mwh: Decimal,
    delivery_start: (i32, u32, u32),
    delivery_end: (i32, u32, u32),
    location: &str,
) -> contracts::ActiveModel {
    let (sy, sm, sd) = delivery_start;
    let (ey, em, ed) = delivery_end;
    contracts::ActiveModel {
        energy_type: Set(energy_type),
        quantity_mwh: Set(quantity_mwh),
        price_per_mwh: Set(price_per_mwh),
        delivery_start: Set(NaiveDate::from_ymd_opt(sy, sm, sd).expect("valid date")),
        delivery_end: Set(NaiveDate::from_ymd_opt(ey, em, ed).expect("valid date")),
        location: Set(location.to_string()),
        status: Set(ContractStatus::Available),
        ..Default::default()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let existing = Contracts::find()
        .count(&db)
        .await
        .expect("Failed to count contracts");
    if existing > 0 {
        tracing::info!("Contracts already exist; skipping seed.");
        return;
    }

    let samples = vec![
        sample(EnergyType::Solar, 500, dec!(45.50), (2026, 3, 1), (2026, 5, 31), "California"),
        sample(EnergyType::Wind, 1200, dec!(38.75), (2026, 4, 1), (2026, 9, 30), "Texas"),
        sample(EnergyType::NaturalGas, 800, dec!(52.00), (2026, 2, 15), (2026, 8, 15), "Northeast"),
        sample(EnergyType::Hydro, 650, dec!(41.25), (2026, 6, 1), (2026, 11, 30), "Pacific Northwest"),
        sample(EnergyType::Nuclear, 2000, dec!(62.10), (2026, 5, 15), (2027, 5, 14), "Midwest"),
        sample(EnergyType::Coal, 1500, dec!(35.90), (2026, 3, 15), (2026, 12, 31), "Appalachia"),
        sample(EnergyType::Solar, 900, dec!(47.80), (2026, 7, 1), (2026, 10, 31), "Arizona"),
        sample(EnergyType::Wind, 1100, dec!(39.40), (2026, 8, 1), (2027, 1, 31), "Oklahoma"),
        sample(EnergyType::NaturalGas, 700, dec!(50.25), (2026, 9, 15), (2027, 3, 15), "Louisiana"),
        sample(EnergyType::Hydro, 480, dec!(43.60), (2026, 10, 1), (2027, 4, 30), "New York"),
        sample(EnergyType::Nuclear, 1800, dec!(60.50), (2026, 11, 1), (2027, 10, 31), "Southeast"),
        sample(EnergyType::Coal, 1300, dec!(33.75), (2026, 12, 1), (2027, 6, 30), "Wyoming"),
        sample(EnergyType::Solar, 750, dec!(44.20), (2027, 1, 15), (2027, 6, 15), "Nevada"),
    ];
    let count = samples.len();

    Contracts::insert_many(samples)
        .exec(&db)
        .await
        .expect("Failed to seed contracts");

    tracing::info!("Seeded {} contracts.", count);
}
