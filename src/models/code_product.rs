use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction fixing the product bundle of a code. Rows are written once at
/// code creation and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "code_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::redemption_code::Entity",
        from = "Column::CodeId",
        to = "super::redemption_code::Column::Id",
        on_delete = "Cascade"
    )]
    RedemptionCode,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::redemption_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RedemptionCode.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
