use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::requests::{
        CreateRequestPayload, RequestCounts, RequestDetail, RequestList, UpdateRequestStatusBody,
    },
    entity::{
        brands::Entity as Brands,
        cars::Entity as Cars,
        purchase_requests::{
            ActiveModel as RequestActive, Column as ReqCol, Entity as PurchaseRequests,
            Model as RequestModel,
        },
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_staff},
    models::{PurchaseRequest, RequestStatus},
    notify,
    response::{ApiResponse, Meta},
    routes::params::{RequestListQuery, SortOrder},
    state::AppState,
};

/// Accepted shapes after stripping whitespace, parentheses and hyphens:
/// `+7` followed by 10 digits, or `8` followed by 10 digits.
pub fn validate_phone(raw: &str) -> Result<(), AppError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '(' | ')' | '-')))
        .collect();

    let valid = if let Some(rest) = cleaned.strip_prefix("+7") {
        rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit())
    } else if let Some(rest) = cleaned.strip_prefix('8') {
        rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit())
    } else {
        false
    };

    if valid {
        Ok(())
    } else {
        Err(AppError::Validation {
            field: "contact_phone".into(),
            message: "Phone must start with +7 or 8 and contain 11 digits".into(),
        })
    }
}

fn validate_contact(payload: &CreateRequestPayload) -> Result<(), AppError> {
    if payload.contact_name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "contact_name".into(),
            message: "Contact name must not be empty".into(),
        });
    }
    if !payload.contact_email.contains('@') {
        return Err(AppError::Validation {
            field: "contact_email".into(),
            message: "Invalid email address".into(),
        });
    }
    validate_phone(&payload.contact_phone)
}

/// True iff the caller created the request and it is still early enough in
/// the lifecycle to be edited.
pub fn can_edit(caller: &AuthUser, request: &RequestModel) -> bool {
    caller.user_id == request.user_id
        && matches!(
            request.status,
            RequestStatus::New | RequestStatus::InProgress
        )
}

/// True iff the caller is staff and the request has not reached the terminal
/// state.
pub fn can_process(caller: &AuthUser, request: &RequestModel) -> bool {
    caller.role.is_staff() && !request.status.is_terminal()
}

/// A user may submit any number of requests for the same car; the contact
/// fields are stored as a snapshot, independent of later profile edits.
pub async fn create_request(
    state: &AppState,
    user: &AuthUser,
    car_id: Uuid,
    payload: CreateRequestPayload,
) -> AppResult<ApiResponse<PurchaseRequest>> {
    validate_contact(&payload)?;

    let car = Cars::find_by_id(car_id).one(&state.orm).await?;
    let car = match car {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let request = RequestActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        car_id: Set(car.id),
        contact_name: Set(payload.contact_name),
        contact_phone: Set(payload.contact_phone),
        contact_email: Set(payload.contact_email),
        message: Set(payload.message),
        status: Set(RequestStatus::New),
        manager_comment: Set(String::new()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Purchase request created",
        request_from_entity(request),
        Some(Meta::empty()),
    ))
}

pub async fn get_request(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<RequestDetail>> {
    let request = PurchaseRequests::find_by_id(id).one(&state.orm).await?;
    let request = match request {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if request.user_id != user.user_id && !user.role.is_staff() {
        return Err(AppError::Forbidden);
    }

    let detail = RequestDetail {
        can_edit: can_edit(user, &request),
        can_process: can_process(user, &request),
        request: request_from_entity(request),
    };
    Ok(ApiResponse::success("OK", detail, Some(Meta::empty())))
}

/// Staff-only status transition. The row is locked for the duration of the
/// transaction so two managers processing the same request serialize instead
/// of silently overwriting each other, and the completed check cannot be
/// bypassed by a concurrent write.
pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateRequestStatusBody,
) -> AppResult<ApiResponse<PurchaseRequest>> {
    ensure_staff(user)?;
    let new_status = RequestStatus::parse(&payload.status)
        .ok_or_else(|| AppError::BadRequest("Invalid request status".into()))?;

    let txn = state.orm.begin().await?;

    let existing = PurchaseRequests::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let existing = match existing {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };

    if existing.status.is_terminal() {
        return Err(AppError::InvalidTransition(
            "Completed requests cannot be modified".into(),
        ));
    }

    let old_status = existing.status;
    let creator_id = existing.user_id;
    let car_id = existing.car_id;

    let mut active: RequestActive = existing.into();
    active.status = Set(new_status);
    active.manager_comment = Set(payload.manager_comment.clone());
    active.updated_at = Set(Utc::now().into());
    let request = active.update(&txn).await?;

    txn.commit().await?;

    let text = status_change_message(state, car_id, old_status, new_status, &payload.manager_comment)
        .await;
    if let Err(err) = notify::send_notification(
        &state.pool,
        creator_id,
        "Purchase request status update",
        &text,
        "request_status_update",
    )
    .await
    {
        tracing::warn!(error = %err, "notification dispatch failed");
    }

    Ok(ApiResponse::success(
        "Request updated",
        request_from_entity(request),
        Some(Meta::empty()),
    ))
}

/// Staff see every request; clients only their own. The status counts are
/// computed over the same visibility set, ignoring pagination and the
/// optional status filter.
pub async fn list_for_caller(
    state: &AppState,
    user: &AuthUser,
    query: RequestListQuery,
) -> AppResult<ApiResponse<RequestList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut visibility = Condition::all();
    if !user.role.is_staff() {
        visibility = visibility.add(ReqCol::UserId.eq(user.user_id));
    }

    let mut condition = visibility.clone();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        let status = RequestStatus::parse(status)
            .ok_or_else(|| AppError::BadRequest("Invalid request status".into()))?;
        condition = condition.add(ReqCol::Status.eq(status));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    let mut finder = PurchaseRequests::find().filter(condition);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(ReqCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(ReqCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(request_from_entity)
        .collect();

    let counts = status_counts(state, visibility).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Purchase requests",
        RequestList { items, counts },
        Some(meta),
    ))
}

async fn status_counts(state: &AppState, visibility: Condition) -> AppResult<RequestCounts> {
    let count_for = |condition: Condition| {
        PurchaseRequests::find()
            .filter(condition)
            .count(&state.orm)
    };

    let total = count_for(visibility.clone()).await? as i64;
    let new = count_for(visibility.clone().add(ReqCol::Status.eq(RequestStatus::New))).await? as i64;
    let approved =
        count_for(visibility.clone().add(ReqCol::Status.eq(RequestStatus::Approved))).await? as i64;
    let rejected =
        count_for(visibility.add(ReqCol::Status.eq(RequestStatus::Rejected))).await? as i64;

    Ok(RequestCounts {
        total,
        new,
        approved,
        rejected,
    })
}

async fn status_change_message(
    state: &AppState,
    car_id: Uuid,
    old_status: RequestStatus,
    new_status: RequestStatus,
    manager_comment: &str,
) -> String {
    let car_label = match Cars::find_by_id(car_id)
        .find_also_related(Brands)
        .one(&state.orm)
        .await
    {
        Ok(Some((car, Some(brand)))) => format!("{} {}", brand.name, car.model),
        Ok(Some((car, None))) => car.model,
        _ => "the selected car".to_string(),
    };

    let mut text = format!(
        "Status of your request for {} changed from '{}' to '{}'",
        car_label,
        old_status.label(),
        new_status.label()
    );
    if !manager_comment.is_empty() {
        text.push_str(&format!(". Manager comment: {}", manager_comment));
    }
    text
}

fn request_from_entity(model: RequestModel) -> PurchaseRequest {
    PurchaseRequest {
        id: model.id,
        user_id: model.user_id,
        car_id: model.car_id,
        contact_name: model.contact_name,
        contact_phone: model.contact_phone,
        contact_email: model.contact_email,
        message: model.message,
        status: model.status,
        manager_comment: model.manager_comment,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
