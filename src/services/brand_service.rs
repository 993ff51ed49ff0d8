use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::brands::{BrandList, CreateBrandRequest},
    entity::brands::{ActiveModel as BrandActive, Column as BrandCol, Entity as Brands, Model as BrandModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_staff},
    models::Brand,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_brands(state: &AppState) -> AppResult<ApiResponse<BrandList>> {
    let items = Brands::find()
        .order_by_asc(BrandCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(brand_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Brands",
        BrandList { items },
        Some(Meta::empty()),
    ))
}

pub async fn create_brand(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBrandRequest,
) -> AppResult<ApiResponse<Brand>> {
    ensure_staff(user)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".into(),
            message: "Brand name must not be empty".into(),
        });
    }

    let exists = Brands::find()
        .filter(BrandCol::Name.eq(payload.name.clone()))
        .one(&state.orm)
        .await?;
    if exists.is_some() {
        return Err(AppError::BadRequest("Brand already exists".into()));
    }

    let brand = BrandActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        country: Set(payload.country),
        description: Set(payload.description),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Brand created",
        brand_from_entity(brand),
        Some(Meta::empty()),
    ))
}

/// Removing a brand takes its cars with it (FK cascade).
pub async fn delete_brand(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = Brands::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Brand deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn brand_from_entity(model: BrandModel) -> Brand {
    Brand {
        id: model.id,
        name: model.name,
        country: model.country,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
