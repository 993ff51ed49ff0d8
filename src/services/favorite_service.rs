use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::favorites::{FavoriteCarList, FavoriteCheck, ToggleFavoriteRequest, ToggleFavoriteResult},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Car, Favorite},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
};

/// Flip the (user, car) bookmark: delete it when present, create it when
/// absent. Two concurrent inserts can both pass the existence check; the DB
/// unique constraint decides the winner and the loser resolves to the row
/// that is already there.
pub async fn toggle(
    pool: &DbPool,
    user: &AuthUser,
    payload: ToggleFavoriteRequest,
) -> AppResult<ApiResponse<ToggleFavoriteResult>> {
    let car_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM cars WHERE id = $1")
        .bind(payload.car_id)
        .fetch_optional(pool)
        .await?;

    if car_exists.is_none() {
        return Err(AppError::NotFound);
    }

    let existing: Option<Favorite> =
        sqlx::query_as("SELECT * FROM favorites WHERE user_id = $1 AND car_id = $2")
            .bind(user.user_id)
            .bind(payload.car_id)
            .fetch_optional(pool)
            .await?;

    if let Some(fav) = existing {
        sqlx::query("DELETE FROM favorites WHERE id = $1")
            .bind(fav.id)
            .execute(pool)
            .await?;

        let result = ToggleFavoriteResult {
            status: "removed".to_string(),
            favorite: None,
        };
        return Ok(ApiResponse::success(
            "Removed from favorites",
            result,
            Some(Meta::empty()),
        ));
    }

    let insert = sqlx::query_as::<_, Favorite>(
        r#"
        INSERT INTO favorites (id, user_id, car_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(payload.car_id)
    .fetch_one(pool)
    .await;

    let favorite = match insert {
        Ok(fav) => fav,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Lost a race against another toggle; the pair already exists.
            sqlx::query_as::<_, Favorite>(
                "SELECT * FROM favorites WHERE user_id = $1 AND car_id = $2",
            )
            .bind(user.user_id)
            .bind(payload.car_id)
            .fetch_one(pool)
            .await?
        }
        Err(err) => return Err(err.into()),
    };

    let result = ToggleFavoriteResult {
        status: "added".to_string(),
        favorite: Some(favorite),
    };
    Ok(ApiResponse::success(
        "Added to favorites",
        result,
        Some(Meta::empty()),
    ))
}

pub async fn exists(
    pool: &DbPool,
    user: &AuthUser,
    car_id: Uuid,
) -> AppResult<ApiResponse<FavoriteCheck>> {
    let found: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM favorites WHERE user_id = $1 AND car_id = $2")
            .bind(user.user_id)
            .bind(car_id)
            .fetch_optional(pool)
            .await?;

    let data = FavoriteCheck {
        is_favorite: found.is_some(),
    };
    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn list_favorites(
    pool: &DbPool,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<FavoriteCarList>> {
    let (page, limit, offset) = pagination.normalize();
    let cars = sqlx::query_as::<_, Car>(
        r#"
        SELECT c.*
        FROM favorites f
        JOIN cars c ON c.id = f.car_id
        WHERE f.user_id = $1
        ORDER BY f.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user.user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_one(pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    let data = FavoriteCarList { items: cars };
    Ok(ApiResponse::success("OK", data, Some(meta)))
}
