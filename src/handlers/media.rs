use actix_multipart::Multipart;
use actix_web::{HttpResponse, Responder, web};
use futures_util::StreamExt;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::media as media_db;
use crate::models::media::OwnerType;
use crate::storage::{MediaStore, UploadError};

/// Who the uploaded file belongs to. Sent as query parameters alongside the
/// multipart body.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub owner_type: OwnerType,
    pub owner_id: Uuid,
}

fn upload_error_response(e: UploadError) -> HttpResponse {
    match e {
        UploadError::TooLarge | UploadError::UnsupportedType(_) | UploadError::MissingContentType => {
            HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
            }))
        }
        UploadError::Stream(_) | UploadError::Io(_) => {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string(),
            }))
        }
    }
}

/// POST /api/media — multipart upload.
///
/// The first file field is streamed to disk; on success a media row is
/// recorded and returned. Validation failures (size, mime) discard the
/// partial file before responding.
pub async fn upload_media(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<MediaStore>,
    query: web::Query<UploadQuery>,
    mut payload: Multipart,
) -> impl Responder {
    let mut field = loop {
        match payload.next().await {
            Some(Ok(field)) => break field,
            Some(Err(e)) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Malformed multipart payload: {e}"),
                }));
            }
            None => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": "No file field in upload",
                }));
            }
        }
    };

    let stored = match store.store_field(&mut field).await {
        Ok(stored) => stored,
        Err(e) => return upload_error_response(e),
    };

    match media_db::insert_media(
        db.get_ref(),
        user.0.id,
        query.owner_type.clone(),
        query.owner_id,
        stored.file_name,
        stored.mime_type,
        stored.kind,
        stored.relative_path.clone(),
        stored.size_bytes,
    )
    .await
    {
        Ok(media) => HttpResponse::Created().json(media),
        Err(e) => {
            // The file is on disk but the row failed; remove the orphan.
            if let Err(io) = store.remove(&stored.relative_path).await {
                tracing::warn!("Failed to remove orphaned upload {}: {io}", stored.relative_path);
            }
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to record upload: {e}"),
            }))
        }
    }
}

/// GET /api/media/{id} — media metadata.
pub async fn get_media(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    match media_db::get_media_by_id(db.get_ref(), id).await {
        Ok(Some(media)) => HttpResponse::Ok().json(media),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Media {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/media/owner/{owner_type}/{owner_id} — all media on an owner.
pub async fn get_media_by_owner(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(OwnerType, Uuid)>,
) -> impl Responder {
    let (owner_type, owner_id) = path.into_inner();
    match media_db::get_media_by_owner(db.get_ref(), owner_type, owner_id).await {
        Ok(media) => HttpResponse::Ok().json(media),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// DELETE /api/media/{id} — uploader removes their file and its row.
pub async fn delete_media(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    store: web::Data<MediaStore>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let media = match media_db::get_media_by_id(db.get_ref(), id).await {
        Ok(Some(media)) => media,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Media {id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if media.uploader_id != user.0.id {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete media you uploaded",
        }));
    }

    if let Err(e) = media_db::delete_media(db.get_ref(), id).await {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete media: {e}"),
        }));
    }

    // The row is gone; a leftover file is harmless but logged.
    if let Err(e) = store.remove(&media.path).await {
        tracing::warn!("Failed to remove media file {}: {e}", media.path);
    }

    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Media {id} deleted"),
    }))
}
