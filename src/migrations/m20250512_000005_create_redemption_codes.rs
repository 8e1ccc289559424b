//! Migration: Create redemption_codes table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RedemptionCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RedemptionCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::ScheduledStart)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::ClaimedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::ClaimedByUsername)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RedemptionCodes::IsTestCode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(RedemptionCodes::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(RedemptionCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_redemption_codes_code")
                    .table(RedemptionCodes::Table)
                    .col(RedemptionCodes::Code)
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
                    .table(RedemptionCodes::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
pub enum RedemptionCodes {
    Table,
    Id,
    Code,
    #[iden = "is_active"]
    IsActive,
    #[iden = "scheduled_start"]
    ScheduledStart,
    #[iden = "claimed_at"]
    ClaimedAt,
    #[iden = "claimed_by_username"]
    ClaimedByUsername,
    #[iden = "is_test_code"]
    IsTestCode,
    #[iden = "created_by"]
    CreatedBy,
    #[iden = "created_at"]
    CreatedAt,
}
