use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Lower-cased `name`; carries the case-insensitive UNIQUE constraint
    #[sea_orm(unique)]
    pub name_key: String,
    pub price: f64,
    #[sea_orm(column_name = "is_18_plus")]
    pub is_18_plus: bool,
    pub category_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "domain_categories::entity::Entity",
        from = "Column::CategoryId",
        to = "domain_categories::entity::Column::Id"
    )]
    Category,
}

impl Related<domain_categories::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub const TAG: &'static str = "Products";
    pub const URL: &'static str = "/products";
}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            is_18_plus: model.is_18_plus,
            category: model.category_id,
        }
    }
}
