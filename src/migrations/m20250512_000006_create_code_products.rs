//! Migration: Create code_products junction table

use sea_orm_migration::prelude::*;

use super::m20250512_000004_create_products::Products;
use super::m20250512_000005_create_redemption_codes::RedemptionCodes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CodeProducts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CodeProducts::CodeId).big_integer().not_null())
                    .col(
                        ColumnDef::new(CodeProducts::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CodeProducts::CodeId)
                            .col(CodeProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CodeProducts::Table, CodeProducts::CodeId)
                            .to(RedemptionCodes::Table, RedemptionCodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CodeProducts::Table, CodeProducts::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_code_products_code_id")
                    .table(CodeProducts::Table)
                    .col(CodeProducts::CodeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CodeProducts::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum CodeProducts {
    Table,
    #[iden = "code_id"]
    CodeId,
    #[iden = "product_id"]
    ProductId,
}
