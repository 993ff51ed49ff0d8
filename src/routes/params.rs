use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FuelType, Transmission};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestListQuery {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub status: Option<String>,
    pub sort_order: Option<SortOrder>,
}

/// Catalog filters arrive as raw query strings. Anything unparseable — a
/// non-numeric price or year, a malformed brand id, an unknown transmission
/// or fuel value — is treated as an absent filter, not as an error.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CarQuery {
    pub page: Option<String>,
    pub brand: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_year: Option<String>,
    pub max_year: Option<String>,
    pub transmission: Option<String>,
    pub fuel: Option<String>,
}

#[derive(Debug)]
pub struct CarFilters {
    pub page: i64,
    pub brand_id: Option<Uuid>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub transmission: Option<Transmission>,
    pub fuel: Option<FuelType>,
}

impl CarQuery {
    pub fn filters(&self) -> CarFilters {
        fn num<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
            value
                .as_deref()
                .filter(|s| !s.is_empty())
                .and_then(|s| s.parse().ok())
        }

        CarFilters {
            page: num::<i64>(&self.page).unwrap_or(1).max(1),
            brand_id: self.brand.as_deref().and_then(|b| Uuid::parse_str(b).ok()),
            search: self.search.clone().filter(|s| !s.is_empty()),
            min_price: num(&self.min_price),
            max_price: num(&self.max_price),
            min_year: num(&self.min_year),
            max_year: num(&self.max_year),
            transmission: self.transmission.as_deref().and_then(Transmission::parse),
            fuel: self.fuel.as_deref().and_then(FuelType::parse),
        }
    }
}
