use sea_orm_migration::prelude::*;

use crate::m20260115_000001_create_contracts::Contracts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PortfolioItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PortfolioItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PortfolioItems::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PortfolioItems::ContractId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_portfolio_items_contract_id")
                            .from(PortfolioItems::Table, PortfolioItems::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_portfolio_items_user_id")
                    .table(PortfolioItems::Table)
                    .col(PortfolioItems::UserId)
                    .to_owned(),
            )
            .await?;

        // Membership is a set: at most one row per (user, contract).
        // The database enforces this so a racing duplicate insert is
        // rejected rather than silently doubled.
        manager
            .create_index(
                Index::create()
                    .name("uq_portfolio_items_user_contract")
                    .table(PortfolioItems::Table)
                    .col(PortfolioItems::UserId)
                    .col(PortfolioItems::ContractId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PortfolioItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PortfolioItems {
    Table,
    Id,
    UserId,
    ContractId,
}
