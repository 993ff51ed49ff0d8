use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::cars::{
        AddCarImageRequest, CarDetail, CarList, CarWithBrand, CreateCarRequest, UpdateCarRequest,
    },
    entity::{
        brands::{Column as BrandCol, Entity as Brands, Model as BrandModel},
        car_images::{
            ActiveModel as ImageActive, Column as ImgCol, Entity as CarImages, Model as ImageModel,
        },
        cars::{self, ActiveModel as CarActive, Column as CarCol, Entity as Cars, Model as CarModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{Brand, Car, CarImage},
    response::{ApiResponse, Meta},
    routes::params::CarQuery,
    state::AppState,
};

/// The storefront shows six cars per page.
pub const CATALOG_PAGE_SIZE: i64 = 6;

/// Filtered, paginated storefront view. Sold cars never appear; all supplied
/// filters AND together, the free-text search ORs over car model and brand
/// name. Newest first. Out-of-range pages clamp to the last page.
pub async fn list_cars(state: &AppState, query: CarQuery) -> AppResult<ApiResponse<CarList>> {
    let filters = query.filters();

    let mut condition = Condition::all().add(CarCol::IsSold.eq(false));

    if let Some(brand_id) = filters.brand_id {
        condition = condition.add(CarCol::BrandId.eq(brand_id));
    }
    if let Some(min_price) = filters.min_price {
        condition = condition.add(CarCol::Price.gte(min_price));
    }
    if let Some(max_price) = filters.max_price {
        condition = condition.add(CarCol::Price.lte(max_price));
    }
    if let Some(min_year) = filters.min_year {
        condition = condition.add(CarCol::Year.gte(min_year));
    }
    if let Some(max_year) = filters.max_year {
        condition = condition.add(CarCol::Year.lte(max_year));
    }
    if let Some(transmission) = filters.transmission {
        condition = condition.add(CarCol::Transmission.eq(transmission));
    }
    if let Some(fuel) = filters.fuel {
        condition = condition.add(CarCol::FuelType.eq(fuel));
    }

    let mut finder = Cars::find();
    if let Some(search) = filters.search.as_ref() {
        let pattern = format!("%{}%", search);
        finder = finder.join(JoinType::InnerJoin, cars::Relation::Brands.def());
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Cars, CarCol::Model)).ilike(pattern.clone()))
                .add(Expr::col((Brands, BrandCol::Name)).ilike(pattern)),
        );
    }

    let finder = finder.filter(condition).order_by_desc(CarCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let num_pages = if total == 0 {
        1
    } else {
        (total + CATALOG_PAGE_SIZE - 1) / CATALOG_PAGE_SIZE
    };
    let page = filters.page.min(num_pages);
    let offset = (page - 1) * CATALOG_PAGE_SIZE;

    let cars = finder
        .limit(CATALOG_PAGE_SIZE as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let brand_ids: Vec<Uuid> = cars.iter().map(|c| c.brand_id).collect();
    let brand_map: HashMap<Uuid, BrandModel> = Brands::find()
        .filter(BrandCol::Id.is_in(brand_ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    let items = cars
        .into_iter()
        .filter_map(|car| {
            brand_map.get(&car.brand_id).map(|brand| CarWithBrand {
                car: car_from_entity(car),
                brand: brand_from_entity(brand.clone()),
            })
        })
        .collect();

    let meta = Meta::new(page, CATALOG_PAGE_SIZE, total);
    Ok(ApiResponse::success("Cars", CarList { items }, Some(meta)))
}

pub async fn get_car(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CarDetail>> {
    let found = Cars::find_by_id(id)
        .find_also_related(Brands)
        .one(&state.orm)
        .await?;
    let (car, brand) = match found {
        Some((car, Some(brand))) => (car, brand),
        _ => return Err(AppError::NotFound),
    };

    let images = CarImages::find()
        .filter(ImgCol::CarId.eq(id))
        .order_by_desc(ImgCol::IsMain)
        .order_by_asc(ImgCol::UploadedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    let detail = CarDetail {
        car: car_from_entity(car),
        brand: brand_from_entity(brand),
        images,
    };
    Ok(ApiResponse::success("Car", detail, None))
}

pub async fn create_car(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCarRequest,
) -> AppResult<ApiResponse<Car>> {
    ensure_staff(user)?;

    let brand = Brands::find_by_id(payload.brand_id).one(&state.orm).await?;
    if brand.is_none() {
        return Err(AppError::BadRequest("Brand not found".into()));
    }

    let car = CarActive {
        id: Set(Uuid::new_v4()),
        brand_id: Set(payload.brand_id),
        model: Set(payload.model),
        year: Set(payload.year),
        price: Set(payload.price),
        mileage: Set(payload.mileage),
        color: Set(payload.color),
        transmission: Set(payload.transmission),
        fuel_type: Set(payload.fuel_type),
        engine_volume: Set(payload.engine_volume),
        horsepower: Set(payload.horsepower),
        is_sold: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Car created",
        car_from_entity(car),
        Some(Meta::empty()),
    ))
}

/// Staff update; also the manual `is_sold` flip when a sale concludes.
pub async fn update_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCarRequest,
) -> AppResult<ApiResponse<Car>> {
    ensure_staff(user)?;

    let existing = Cars::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    if let Some(brand_id) = payload.brand_id {
        let brand = Brands::find_by_id(brand_id).one(&state.orm).await?;
        if brand.is_none() {
            return Err(AppError::BadRequest("Brand not found".into()));
        }
    }

    let mut active: CarActive = existing.into();
    if let Some(brand_id) = payload.brand_id {
        active.brand_id = Set(brand_id);
    }
    if let Some(model) = payload.model {
        active.model = Set(model);
    }
    if let Some(year) = payload.year {
        active.year = Set(year);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(mileage) = payload.mileage {
        active.mileage = Set(mileage);
    }
    if let Some(color) = payload.color {
        active.color = Set(color);
    }
    if let Some(transmission) = payload.transmission {
        active.transmission = Set(transmission);
    }
    if let Some(fuel_type) = payload.fuel_type {
        active.fuel_type = Set(fuel_type);
    }
    if let Some(engine_volume) = payload.engine_volume {
        active.engine_volume = Set(engine_volume);
    }
    if let Some(horsepower) = payload.horsepower {
        active.horsepower = Set(horsepower);
    }
    if let Some(is_sold) = payload.is_sold {
        active.is_sold = Set(is_sold);
    }
    active.updated_at = Set(Utc::now().into());

    let car = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Car updated",
        car_from_entity(car),
        Some(Meta::empty()),
    ))
}

pub async fn delete_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_staff(user)?;

    let result = Cars::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Car deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Attach an image record. A car has at most one main image: promoting a new
/// one demotes the rest inside the same transaction.
pub async fn add_car_image(
    state: &AppState,
    user: &AuthUser,
    car_id: Uuid,
    payload: AddCarImageRequest,
) -> AppResult<ApiResponse<CarImage>> {
    ensure_staff(user)?;

    let car = Cars::find_by_id(car_id).one(&state.orm).await?;
    if car.is_none() {
        return Err(AppError::NotFound);
    }

    let txn = state.orm.begin().await?;

    if payload.is_main {
        CarImages::update_many()
            .col_expr(ImgCol::IsMain, Expr::value(false))
            .filter(ImgCol::CarId.eq(car_id))
            .exec(&txn)
            .await?;
    }

    let image = ImageActive {
        id: Set(Uuid::new_v4()),
        car_id: Set(car_id),
        image_url: Set(payload.image_url),
        description: Set(payload.description),
        is_main: Set(payload.is_main),
        uploaded_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Image added",
        image_from_entity(image),
        Some(Meta::empty()),
    ))
}

fn car_from_entity(model: CarModel) -> Car {
    Car {
        id: model.id,
        brand_id: model.brand_id,
        model: model.model,
        year: model.year,
        price: model.price,
        mileage: model.mileage,
        color: model.color,
        transmission: model.transmission,
        fuel_type: model.fuel_type,
        engine_volume: model.engine_volume,
        horsepower: model.horsepower,
        is_sold: model.is_sold,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
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

fn image_from_entity(model: ImageModel) -> CarImage {
    CarImage {
        id: model.id,
        car_id: model.car_id,
        image_url: model.image_url,
        description: model.description,
        is_main: model.is_main,
        uploaded_at: model.uploaded_at.with_timezone(&Utc),
    }
}
