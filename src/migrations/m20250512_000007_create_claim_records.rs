//! Migration: Create claim_records ledger table

use sea_orm_migration::prelude::*;

use super::m20250512_000005_create_redemption_codes::RedemptionCodes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClaimRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClaimRecords::CodeId).big_integer().not_null())
                    .col(ColumnDef::new(ClaimRecords::Code).string().not_null())
                    .col(
                        ColumnDef::new(ClaimRecords::ClaimedByUsername)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClaimRecords::TotalAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClaimRecords::TotalDiscount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClaimRecords::FinalAmount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClaimRecords::ProductsData).json().not_null())
                    .col(
                        ColumnDef::new(ClaimRecords::IsTestClaim)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ClaimRecords::ClaimedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClaimRecords::Table, ClaimRecords::CodeId)
                            .to(RedemptionCodes::Table, RedemptionCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_claim_records_claimed_at")
                    .table(ClaimRecords::Table)
                    .col(ClaimRecords::ClaimedAt)
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
                    .table(ClaimRecords::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum ClaimRecords {
    Table,
    Id,
    #[iden = "code_id"]
    CodeId,
    Code,
    #[iden = "claimed_by_username"]
    ClaimedByUsername,
    #[iden = "total_amount"]
    TotalAmount,
    #[iden = "total_discount"]
    TotalDiscount,
    #[iden = "final_amount"]
    FinalAmount,
    #[iden = "products_data"]
    ProductsData,
    #[iden = "is_test_claim"]
    IsTestClaim,
    #[iden = "claimed_at"]
    ClaimedAt,
}
