use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::requests::{CreateRequestBody, RequestDetail, RequestList, UpdateRequestStatusBody},
    error::AppResult,
    middleware::auth::AuthUser,
    models::PurchaseRequest,
    response::ApiResponse,
    routes::params::RequestListQuery,
    services::request_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/{id}", get(get_request).patch(update_request_status))
}

#[utoipa::path(
    get,
    path = "/api/purchase-requests",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "Requests visible to the caller, with status counts", body = ApiResponse<RequestList>),
        (status = 400, description = "Invalid status filter"),
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RequestListQuery>,
) -> AppResult<Json<ApiResponse<RequestList>>> {
    let resp = request_service::list_for_caller(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/purchase-requests",
    request_body = CreateRequestBody,
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
    Json(body): Json<CreateRequestBody>,
) -> AppResult<Json<ApiResponse<PurchaseRequest>>> {
    let (car_id, payload) = body.into_payload();
    let resp = request_service::create_request(&state, &user, car_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/purchase-requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request with caller capabilities", body = ApiResponse<RequestDetail>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase requests"
)]
pub async fn get_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RequestDetail>>> {
    let resp = request_service::get_request(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/purchase-requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateRequestStatusBody,
    responses(
        (status = 200, description = "Status updated, creator notified", body = ApiResponse<PurchaseRequest>),
        (status = 400, description = "Invalid status or completed request"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Purchase requests"
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestStatusBody>,
) -> AppResult<Json<ApiResponse<PurchaseRequest>>> {
    let resp = request_service::update_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
