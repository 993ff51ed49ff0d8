use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Record a notification for a user. Callers treat this as fire-and-forget:
/// a failed insert is logged and discarded, never propagated, so a broken
/// side-channel cannot block the operation that triggered it.
pub async fn send_notification(
    pool: &DbPool,
    user_id: Uuid,
    title: &str,
    message: &str,
    notification_type: &str,
) -> AppResult<()> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, title, message, notification_type)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(message)
    .bind(notification_type)
    .execute(pool)
    .await?;

    Ok(())
}
