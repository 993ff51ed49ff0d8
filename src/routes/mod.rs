use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod brands;
pub mod cars;
pub mod doc;
pub mod favorites;
pub mod health;
pub mod notifications;
pub mod params;
pub mod requests;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/brands", brands::router())
        .nest("/cars", cars::router())
        .nest("/purchase-requests", requests::router())
        .nest("/favorites", favorites::router())
        .nest("/notifications", notifications::router())
        .nest("/admin", admin::router())
}
