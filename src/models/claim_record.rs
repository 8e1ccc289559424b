use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only ledger entry written at claim time. Prices are copied in so
/// later product edits never change a record.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(table_name = "claim_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub code_id: i64,
    /// Denormalized for display
    pub code: String,
    pub claimed_by_username: String,
    /// Sum of list prices
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    /// `total_amount - final_amount`
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_discount: Decimal,
    /// Sum of effective prices
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub final_amount: Decimal,
    /// Snapshot array of `{id, name, description, details, original_price, final_price}`
    pub products_data: Json,
    pub is_test_claim: bool,
    #[schema(value_type = String)]
    pub claimed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::redemption_code::Entity",
        from = "Column::CodeId",
        to = "super::redemption_code::Column::Id"
    )]
    RedemptionCode,
}

impl Related<super::redemption_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RedemptionCode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
