use autosalon_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::favorites::ToggleFavoriteRequest,
    dto::requests::{CreateRequestPayload, UpdateRequestStatusBody},
    entity::{
        brands::ActiveModel as BrandActive, cars::ActiveModel as CarActive,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{FuelType, Notification, RequestStatus, Role, Transmission},
    routes::params::{CarQuery, Pagination, RequestListQuery},
    services::{catalog_service, favorite_service, request_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: client submits a request -> manager processes it and the
// client is notified -> completed requests freeze. Also exercises the
// favorite toggle and the catalog filters against a real database.
#[tokio::test]
async fn request_workflow_and_favorites_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    let state = setup_state(&database_url).await?;

    let client_id = create_user(&state, Role::Client, "client_a", "client_a@example.com").await?;
    let other_client_id =
        create_user(&state, Role::Client, "client_b", "client_b@example.com").await?;
    let manager_id = create_user(&state, Role::Manager, "manager", "manager@example.com").await?;

    let auth_client = AuthUser {
        user_id: client_id,
        role: Role::Client,
    };
    let auth_other = AuthUser {
        user_id: other_client_id,
        role: Role::Client,
    };
    let auth_manager = AuthUser {
        user_id: manager_id,
        role: Role::Manager,
    };

    // Seed a brand with one car for sale and one already sold.
    let brand = BrandActive {
        id: Set(Uuid::new_v4()),
        name: Set("Toyota".into()),
        country: Set("Japan".into()),
        description: Set(String::new()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let car = create_car(&state, brand.id, "Camry", 2022, 3_200_000, false).await?;
    let sold_car = create_car(&state, brand.id, "Corolla", 2020, 2_100_000, true).await?;

    // Catalog: sold cars never appear, filters narrow the rest.
    let listing = catalog_service::list_cars(&state, CarQuery::default()).await?;
    let items = listing.data.unwrap().items;
    assert!(items.iter().any(|i| i.car.id == car.id));
    assert!(items.iter().all(|i| i.car.id != sold_car.id));

    let by_brand_name = catalog_service::list_cars(
        &state,
        CarQuery {
            search: Some("toyo".into()),
            ..CarQuery::default()
        },
    )
    .await?;
    assert!(
        by_brand_name
            .data
            .unwrap()
            .items
            .iter()
            .any(|i| i.car.id == car.id)
    );

    let too_expensive = catalog_service::list_cars(
        &state,
        CarQuery {
            max_price: Some("1000".into()),
            ..CarQuery::default()
        },
    )
    .await?;
    assert!(too_expensive.data.unwrap().items.is_empty());

    // A non-numeric bound is ignored rather than rejected.
    let garbage_filter = catalog_service::list_cars(
        &state,
        CarQuery {
            max_price: Some("cheap".into()),
            ..CarQuery::default()
        },
    )
    .await?;
    assert!(!garbage_filter.data.unwrap().items.is_empty());

    // Favorite toggle flips state on every call.
    let toggled = favorite_service::toggle(
        &state.pool,
        &auth_client,
        ToggleFavoriteRequest { car_id: car.id },
    )
    .await?;
    assert_eq!(toggled.data.unwrap().status, "added");

    let check = favorite_service::exists(&state.pool, &auth_client, car.id).await?;
    assert!(check.data.unwrap().is_favorite);

    let toggled_again = favorite_service::toggle(
        &state.pool,
        &auth_client,
        ToggleFavoriteRequest { car_id: car.id },
    )
    .await?;
    assert_eq!(toggled_again.data.unwrap().status, "removed");

    let check = favorite_service::exists(&state.pool, &auth_client, car.id).await?;
    assert!(!check.data.unwrap().is_favorite);

    // A malformed phone is a per-field validation failure.
    let bad_phone = request_service::create_request(
        &state,
        &auth_client,
        car.id,
        contact_payload("8999123456"),
    )
    .await;
    match bad_phone {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "contact_phone"),
        other => panic!("expected validation error, got {other:?}"),
    }

    // Valid submission starts in `new`.
    let created = request_service::create_request(
        &state,
        &auth_client,
        car.id,
        contact_payload("89991234567"),
    )
    .await?;
    let request = created.data.unwrap();
    assert_eq!(request.status, RequestStatus::New);
    assert_eq!(request.contact_phone, "89991234567");

    // Only the creator and staff may read it.
    let denied = request_service::get_request(&state, &auth_other, request.id).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    let own_view = request_service::get_request(&state, &auth_client, request.id).await?;
    let own_view = own_view.data.unwrap();
    assert!(own_view.can_edit);
    assert!(!own_view.can_process);

    let staff_view = request_service::get_request(&state, &auth_manager, request.id).await?;
    assert!(staff_view.data.unwrap().can_process);

    // Clients cannot transition status.
    let denied = request_service::update_status(
        &state,
        &auth_client,
        request.id,
        status_body("in_progress", ""),
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    // Unknown status strings are rejected outright.
    let invalid = request_service::update_status(
        &state,
        &auth_manager,
        request.id,
        status_body("cancelled", ""),
    )
    .await;
    assert!(matches!(invalid, Err(AppError::BadRequest(_))));

    // Manager transition records the comment and notifies the creator.
    let updated = request_service::update_status(
        &state,
        &auth_manager,
        request.id,
        status_body("in_progress", "Проверяем наличие"),
    )
    .await?;
    let updated = updated.data.unwrap();
    assert_eq!(updated.status, RequestStatus::InProgress);
    assert_eq!(updated.manager_comment, "Проверяем наличие");

    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(client_id)
    .fetch_all(&state.pool)
    .await?;
    assert!(!notifications.is_empty());
    let note = &notifications[0];
    assert!(note.message.contains("New"));
    assert!(note.message.contains("In progress"));
    assert!(note.message.contains("Проверяем наличие"));

    // Visibility: the manager list is a superset of the client list.
    let manager_list = request_service::list_for_caller(&state, &auth_manager, list_query()).await?;
    let manager_list = manager_list.data.unwrap();
    let client_list = request_service::list_for_caller(&state, &auth_client, list_query()).await?;
    let client_list = client_list.data.unwrap();
    assert!(
        client_list
            .items
            .iter()
            .all(|c| manager_list.items.iter().any(|m| m.id == c.id))
    );
    assert_eq!(client_list.counts.total, 1);

    let other_list = request_service::list_for_caller(&state, &auth_other, list_query()).await?;
    assert_eq!(other_list.data.unwrap().counts.total, 0);

    // Jumping straight to completed is allowed; afterwards the request is frozen.
    let completed = request_service::update_status(
        &state,
        &auth_manager,
        request.id,
        status_body("completed", ""),
    )
    .await?;
    assert_eq!(completed.data.unwrap().status, RequestStatus::Completed);

    let frozen = request_service::update_status(
        &state,
        &auth_manager,
        request.id,
        status_body("in_progress", ""),
    )
    .await;
    assert!(matches!(frozen, Err(AppError::InvalidTransition(_))));

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    let pool = create_pool(database_url).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE notifications, purchase_requests, favorites, car_images, cars, brands, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn create_user(
    state: &AppState,
    role: Role,
    username: &str,
    email: &str,
) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        phone: Set(String::new()),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn create_car(
    state: &AppState,
    brand_id: Uuid,
    model: &str,
    year: i32,
    price: i64,
    is_sold: bool,
) -> anyhow::Result<autosalon_api::entity::cars::Model> {
    let car = CarActive {
        id: Set(Uuid::new_v4()),
        brand_id: Set(brand_id),
        model: Set(model.to_string()),
        year: Set(year),
        price: Set(price),
        mileage: Set(10_000),
        color: Set("black".into()),
        transmission: Set(Transmission::Automatic),
        fuel_type: Set(FuelType::Petrol),
        engine_volume: Set(2.5),
        horsepower: Set(200),
        is_sold: Set(is_sold),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(car)
}

fn contact_payload(phone: &str) -> CreateRequestPayload {
    CreateRequestPayload {
        contact_name: "Ivan Petrov".into(),
        contact_phone: phone.into(),
        contact_email: "ivan@example.com".into(),
        message: "Call me in the evening".into(),
    }
}

fn status_body(status: &str, comment: &str) -> UpdateRequestStatusBody {
    UpdateRequestStatusBody {
        status: status.into(),
        manager_comment: comment.into(),
    }
}

fn list_query() -> RequestListQuery {
    RequestListQuery {
        pagination: Pagination {
            page: None,
            per_page: None,
        },
        status: None,
        sort_order: None,
    }
}
