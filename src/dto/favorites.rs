use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Car, Favorite};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ToggleFavoriteRequest {
    pub car_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleFavoriteResult {
    /// Either "added" or "removed".
    pub status: String,
    pub favorite: Option<Favorite>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteCheck {
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoriteCarList {
    pub items: Vec<Car>,
}
