pub mod brands;
pub mod car_images;
pub mod cars;
pub mod favorites;
pub mod notifications;
pub mod purchase_requests;
pub mod users;

pub use brands::Entity as Brands;
pub use car_images::Entity as CarImages;
pub use cars::Entity as Cars;
pub use favorites::Entity as Favorites;
pub use notifications::Entity as Notifications;
pub use purchase_requests::Entity as PurchaseRequests;
pub use users::Entity as Users;
