use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Brand, Car, CarImage, FuelType, Transmission};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCarRequest {
    pub brand_id: Uuid,
    pub model: String,
    pub year: i32,
    pub price: i64,
    #[serde(default)]
    pub mileage: i32,
    #[serde(default)]
    pub color: String,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    #[serde(default)]
    pub engine_volume: f64,
    #[serde(default)]
    pub horsepower: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCarRequest {
    pub brand_id: Option<Uuid>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub mileage: Option<i32>,
    pub color: Option<String>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub engine_volume: Option<f64>,
    pub horsepower: Option<i32>,
    pub is_sold: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCarImageRequest {
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_main: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarWithBrand {
    pub car: Car,
    pub brand: Brand,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarDetail {
    pub car: Car,
    pub brand: Brand,
    pub images: Vec<CarImage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CarList {
    pub items: Vec<CarWithBrand>,
}
