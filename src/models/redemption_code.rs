use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "redemption_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Stored uppercase; lookups uppercase the input first
    #[sea_orm(unique)]
    pub code: String,
    pub is_active: bool,
    /// Not claimable before this instant; NULL means claimable since creation
    pub scheduled_start: Option<DateTimeUtc>,
    /// Set exactly once, by the claim-mark compare-and-set
    pub claimed_at: Option<DateTimeUtc>,
    pub claimed_by_username: Option<String>,
    /// Claims of test codes are excluded from revenue statistics
    pub is_test_code: bool,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

impl Model {
    pub fn is_claimed(&self) -> bool {
        self.claimed_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::code_product::Entity")]
    CodeProducts,
    #[sea_orm(has_many = "super::claim_record::Entity")]
    ClaimRecords,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        super::code_product::Relation::Product.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::code_product::Relation::RedemptionCode.def().rev())
    }
}

impl Related<super::code_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CodeProducts.def()
    }
}

impl Related<super::claim_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClaimRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
