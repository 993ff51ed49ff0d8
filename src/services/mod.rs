pub mod admin_service;
pub mod auth_service;
pub mod brand_service;
pub mod catalog_service;
pub mod favorite_service;
pub mod notification_service;
pub mod request_service;
