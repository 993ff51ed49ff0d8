use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::cars::{
        AddCarImageRequest, CarDetail, CarList, CreateCarRequest, UpdateCarRequest,
    },
    dto::requests::CreateRequestPayload,
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Car, CarImage, PurchaseRequest},
    response::ApiResponse,
    routes::params::CarQuery,
    services::{catalog_service, request_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route(
            "/{id}",
            get(get_car).put(update_car).delete(delete_car),
        )
        .route("/{id}/create_request", post(create_request))
        .route("/{id}/images", post(add_car_image))
}

#[utoipa::path(
    get,
    path = "/api/cars",
    params(
        ("page" = Option<String>, Query, description = "Page number, default 1; out-of-range pages clamp"),
        ("brand" = Option<String>, Query, description = "Brand id filter"),
        ("search" = Option<String>, Query, description = "Substring match over car model and brand name"),
        ("min_price" = Option<String>, Query, description = "Inclusive lower price bound"),
        ("max_price" = Option<String>, Query, description = "Inclusive upper price bound"),
        ("min_year" = Option<String>, Query, description = "Inclusive lower year bound"),
        ("max_year" = Option<String>, Query, description = "Inclusive upper year bound"),
        ("transmission" = Option<String>, Query, description = "manual, automatic, robot or variator"),
        ("fuel" = Option<String>, Query, description = "petrol, diesel, electric or hybrid"),
    ),
    responses(
        (status = 200, description = "Cars for sale, six per page", body = ApiResponse<CarList>)
    ),
    tag = "Cars"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarQuery>,
) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = catalog_service::list_cars(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car with brand and images", body = ApiResponse<CarDetail>),
        (status = 404, description = "Car not found"),
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CarDetail>>> {
    let resp = catalog_service::get_car(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 200, description = "Car created", body = ApiResponse<Car>),
        (status = 400, description = "Brand not found"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCarRequest>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = catalog_service::create_car(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Car updated", body = ApiResponse<Car>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn update_car(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCarRequest>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = catalog_service::update_car(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_car(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cars/{id}/create_request",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = CreateRequestPayload,
    responses(
        (status = 200, description = "Purchase request created", body = ApiResponse<PurchaseRequest>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Car not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateRequestPayload>,
) -> AppResult<Json<ApiResponse<PurchaseRequest>>> {
    let resp = request_service::create_request(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cars/{id}/images",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = AddCarImageRequest,
    responses(
        (status = 200, description = "Image added", body = ApiResponse<CarImage>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn add_car_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCarImageRequest>,
) -> AppResult<Json<ApiResponse<CarImage>>> {
    let resp = catalog_service::add_car_image(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
