use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications;

/// Fetch a user's notifications, unread first, then newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_asc(notifications::Column::IsRead)
        .order_by_desc(notifications::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Count unread notifications for a user.
pub async fn count_unread_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .count(db)
        .await
}

/// Fetch a single notification by ID.
pub async fn get_notification_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    notifications::Entity::find_by_id(id).one(db).await
}

/// Mark a single notification as read.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<notifications::Model, DbErr> {
    let notification = notifications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Notification not found".to_string()))?;

    let mut active: notifications::ActiveModel = notification.into();
    active.is_read = Set(true);

    active.update(db).await
}

/// Mark all of a user's notifications as read; returns the affected count.
pub async fn mark_all_read_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<u64, DbErr> {
    let result = notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, Expr::value(true))
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
