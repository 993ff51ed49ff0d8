use sea_orm::entity::prelude::*;

use crate::models::{FuelType, Transmission};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub brand_id: Uuid,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: i32,
    pub color: String,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub engine_volume: f64,
    pub horsepower: i32,
    pub is_sold: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brands::Entity",
        from = "Column::BrandId",
        to = "super::brands::Column::Id"
    )]
    Brands,
    #[sea_orm(has_many = "super::car_images::Entity")]
    CarImages,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::purchase_requests::Entity")]
    PurchaseRequests,
}

impl Related<super::brands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brands.def()
    }
}

impl Related<super::car_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarImages.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::purchase_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
