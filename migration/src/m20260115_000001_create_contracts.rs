use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Contracts::EnergyType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::QuantityMwh)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::PricePerMwh)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::DeliveryStart)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::DeliveryEnd)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::Location)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Contracts::Status)
                            .string_len(20)
                            .not_null()
                            .default("Available"),
                    )
                    .to_owned(),
            )
            .await?;

        // Every filterable column carries an index
        for (name, col) in [
            ("idx_contracts_energy_type", Contracts::EnergyType),
            ("idx_contracts_quantity_mwh", Contracts::QuantityMwh),
            ("idx_contracts_price_per_mwh", Contracts::PricePerMwh),
            ("idx_contracts_delivery_start", Contracts::DeliveryStart),
            ("idx_contracts_delivery_end", Contracts::DeliveryEnd),
            ("idx_contracts_location", Contracts::Location),
            ("idx_contracts_status", Contracts::Status),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Contracts::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Contracts {
    Table,
    Id,
    EnergyType,
    QuantityMwh,
    PricePerMwh,
    DeliveryStart,
    DeliveryEnd,
    Location,
    Status,
}
