use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub details: Option<String>,
    /// List price in euros
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    /// Effective price when set and lower than `price`
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub discounted_price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Discounted price when present, list price otherwise
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::code_product::Entity")]
    CodeProducts,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::redemption_code::Entity> for Entity {
    fn to() -> RelationDef {
        super::code_product::Relation::RedemptionCode.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::code_product::Relation::Product.def().rev())
    }
}

impl Related<super::code_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CodeProducts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
