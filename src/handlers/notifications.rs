use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, CacheData, keys};
use crate::db::notifications as notification_db;
use crate::models::PaginationQuery;

/// Drop the cached unread badge so the next read sees fresh rows. Callers
/// that insert notification rows out of band (deal handlers) reuse this.
pub(crate) async fn invalidate_unread_count(cache: &CacheData, user_id: Uuid) {
    if let Err(e) = cache.delete(&keys::unread_notifications(user_id)).await {
        tracing::warn!("Failed to invalidate unread-notification cache: {e}");
    }
}

/// GET /api/notifications — the caller's notifications, unread first.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    match notification_db::get_notifications_for_user(
        db.get_ref(),
        user.0.id,
        query.page(),
        query.limit(),
    )
    .await
    {
        Ok(notifications) => HttpResponse::Ok().json(notifications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/notifications/unread-count — badge counter, cached briefly.
pub async fn get_unread_count(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> impl Responder {
    let cache_key = keys::unread_notifications(user.0.id);

    match cache.get::<u64>(&cache_key).await {
        Ok(Some(count)) => {
            return HttpResponse::Ok().json(serde_json::json!({ "unread": count }));
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed, falling through: {e}"),
    }

    match notification_db::count_unread_for_user(db.get_ref(), user.0.id).await {
        Ok(count) => {
            let ttl = CacheConfig::from_env().notification_ttl;
            if let Err(e) = cache.set(&cache_key, &count, Some(ttl.as_secs())).await {
                tracing::warn!("Cache write failed: {e}");
            }
            HttpResponse::Ok().json(serde_json::json!({ "unread": count }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/notifications/{id}/read — mark one notification as read
/// (recipient only).
pub async fn mark_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let notification = match notification_db::get_notification_by_id(db.get_ref(), id).await {
        Ok(Some(n)) => n,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Notification {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if notification.user_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only mark your own notifications as read",
        }));
    }

    match notification_db::mark_notification_read(db.get_ref(), id).await {
        Ok(updated) => {
            invalidate_unread_count(cache.get_ref(), user.0.id).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to mark notification as read: {e}"),
        })),
    }
}

/// PUT /api/notifications/read-all — mark everything as read.
pub async fn mark_all_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
) -> impl Responder {
    match notification_db::mark_all_read_for_user(db.get_ref(), user.0.id).await {
        Ok(updated) => {
            invalidate_unread_count(cache.get_ref(), user.0.id).await;
            HttpResponse::Ok().json(serde_json::json!({ "updated": updated }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
