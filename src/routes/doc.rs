use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserList},
        brands::{BrandList, CreateBrandRequest},
        cars::{
            AddCarImageRequest, CarDetail, CarList, CarWithBrand, CreateCarRequest,
            UpdateCarRequest,
        },
        favorites::{FavoriteCarList, FavoriteCheck, ToggleFavoriteRequest, ToggleFavoriteResult},
        notifications::NotificationList,
        requests::{
            CreateRequestBody, CreateRequestPayload, RequestCounts, RequestDetail, RequestList,
            UpdateRequestStatusBody,
        },
    },
    models::{
        Brand, Car, CarImage, Favorite, FuelType, Notification, PurchaseRequest, RequestStatus,
        Role, Transmission, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, brands, cars, favorites, health, notifications, params, requests},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::update_me,
        brands::list_brands,
        brands::create_brand,
        brands::delete_brand,
        cars::list_cars,
        cars::get_car,
        cars::create_car,
        cars::update_car,
        cars::delete_car,
        cars::create_request,
        cars::add_car_image,
        requests::list_requests,
        requests::create_request,
        requests::get_request,
        requests::update_request_status,
        favorites::list_favorites,
        favorites::toggle_favorite,
        favorites::check_favorite,
        notifications::list_notifications,
        notifications::mark_read,
        admin::list_users,
        admin::update_user_role
    ),
    components(
        schemas(
            User,
            Brand,
            Car,
            CarImage,
            Favorite,
            PurchaseRequest,
            Notification,
            Role,
            Transmission,
            FuelType,
            RequestStatus,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            UserList,
            CreateBrandRequest,
            BrandList,
            CreateCarRequest,
            UpdateCarRequest,
            AddCarImageRequest,
            CarWithBrand,
            CarDetail,
            CarList,
            CreateRequestPayload,
            CreateRequestBody,
            UpdateRequestStatusBody,
            RequestCounts,
            RequestList,
            RequestDetail,
            ToggleFavoriteRequest,
            ToggleFavoriteResult,
            FavoriteCheck,
            FavoriteCarList,
            NotificationList,
            admin::UpdateUserRoleRequest,
            params::Pagination,
            params::CarQuery,
            params::RequestListQuery,
            Meta,
            ApiResponse<Car>,
            ApiResponse<CarList>,
            ApiResponse<CarDetail>,
            ApiResponse<RequestList>,
            ApiResponse<RequestDetail>,
            ApiResponse<PurchaseRequest>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication and profile endpoints"),
        (name = "Brands", description = "Car brand endpoints"),
        (name = "Cars", description = "Car catalog endpoints"),
        (name = "Purchase requests", description = "Purchase request workflow endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Notifications", description = "Notification endpoints"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
