use autosalon_api::{
    error::AppError,
    middleware::auth::AuthUser,
    models::{RequestStatus, Role},
    routes::params::CarQuery,
    services::request_service::{can_edit, can_process, validate_phone},
};
use chrono::Utc;
use uuid::Uuid;

fn request_with(user_id: Uuid, status: RequestStatus) -> autosalon_api::entity::purchase_requests::Model {
    autosalon_api::entity::purchase_requests::Model {
        id: Uuid::new_v4(),
        user_id,
        car_id: Uuid::new_v4(),
        contact_name: "Ivan".into(),
        contact_phone: "+79991234567".into(),
        contact_email: "ivan@example.com".into(),
        message: String::new(),
        status,
        manager_comment: String::new(),
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

fn caller(role: Role) -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role,
    }
}

#[test]
fn phone_accepts_plus_seven_and_eight_forms() {
    assert!(validate_phone("+79991234567").is_ok());
    assert!(validate_phone("89991234567").is_ok());
    assert!(validate_phone("+7 (999) 123-45-67").is_ok());
    assert!(validate_phone("8 (999) 123-45-67").is_ok());
}

#[test]
fn phone_rejects_bare_country_code_and_short_numbers() {
    // Eleven digits but no +7/8 prefix form.
    assert!(validate_phone("79991234567").is_err());
    // Ten digits after the 8.
    assert!(validate_phone("8999123456").is_err());
    assert!(validate_phone("+7999123456").is_err());
    assert!(validate_phone("+799912345678").is_err());
    assert!(validate_phone("").is_err());
    assert!(validate_phone("+7abcdefghij").is_err());
}

#[test]
fn phone_failure_names_the_field() {
    match validate_phone("not-a-phone") {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "contact_phone"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn status_parse_round_trips() {
    for status in [
        RequestStatus::New,
        RequestStatus::InProgress,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Completed,
    ] {
        assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(RequestStatus::parse("cancelled"), None);
    assert_eq!(RequestStatus::parse(""), None);
}

#[test]
fn only_completed_is_terminal() {
    assert!(RequestStatus::Completed.is_terminal());
    assert!(!RequestStatus::New.is_terminal());
    assert!(!RequestStatus::Rejected.is_terminal());
}

#[test]
fn creator_may_edit_only_while_new_or_in_progress() {
    let owner = caller(Role::Client);
    for status in [RequestStatus::New, RequestStatus::InProgress] {
        assert!(can_edit(&owner, &request_with(owner.user_id, status)));
    }
    for status in [
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Completed,
    ] {
        assert!(!can_edit(&owner, &request_with(owner.user_id, status)));
    }

    let stranger = caller(Role::Client);
    assert!(!can_edit(&stranger, &request_with(owner.user_id, RequestStatus::New)));
}

#[test]
fn staff_may_process_anything_but_completed() {
    let owner_id = Uuid::new_v4();
    for role in [Role::Manager, Role::Admin] {
        let staff = caller(role);
        assert!(can_process(&staff, &request_with(owner_id, RequestStatus::New)));
        assert!(can_process(&staff, &request_with(owner_id, RequestStatus::Rejected)));
        assert!(!can_process(&staff, &request_with(owner_id, RequestStatus::Completed)));
    }

    let client = caller(Role::Client);
    assert!(!can_process(&client, &request_with(client.user_id, RequestStatus::New)));
}

#[test]
fn role_capabilities() {
    assert!(Role::Manager.is_staff());
    assert!(Role::Admin.is_staff());
    assert!(!Role::Client.is_staff());
    assert!(Role::Admin.is_admin());
    assert!(!Role::Manager.is_admin());
    assert_eq!(Role::parse("manager"), Some(Role::Manager));
    assert_eq!(Role::parse("superuser"), None);
}

#[test]
fn invalid_numeric_filters_are_treated_as_absent() {
    let query = CarQuery {
        min_price: Some("abc".into()),
        max_price: Some("100000".into()),
        min_year: Some("".into()),
        page: Some("zero".into()),
        brand: Some("not-a-uuid".into()),
        transmission: Some("warp-drive".into()),
        ..CarQuery::default()
    };
    let filters = query.filters();
    assert_eq!(filters.min_price, None);
    assert_eq!(filters.max_price, Some(100_000));
    assert_eq!(filters.min_year, None);
    assert_eq!(filters.page, 1);
    assert_eq!(filters.brand_id, None);
    assert!(filters.transmission.is_none());
}

#[test]
fn status_labels_are_human_readable() {
    assert_eq!(RequestStatus::New.label(), "New");
    assert_eq!(RequestStatus::InProgress.label(), "In progress");
    assert_eq!(RequestStatus::Completed.label(), "Completed");
}
