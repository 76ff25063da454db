use sea_orm::*;
use uuid::Uuid;

use crate::models::media::{self, Kind, OwnerType};

/// Insert a media row for a file that already passed size/mime validation
/// and landed on disk.
#[allow(clippy::too_many_arguments)]
pub async fn insert_media(
    db: &DatabaseConnection,
    uploader_id: Uuid,
    owner_type: OwnerType,
    owner_id: Uuid,
    file_name: String,
    mime_type: String,
    kind: Kind,
    path: String,
    size_bytes: i64,
) -> Result<media::Model, DbErr> {
    let new_media = media::ActiveModel {
        id: Set(Uuid::new_v4()),
        uploader_id: Set(uploader_id),
        owner_type: Set(owner_type),
        owner_id: Set(owner_id),
        file_name: Set(file_name),
        mime_type: Set(mime_type),
        kind: Set(kind),
        path: Set(path),
        size_bytes: Set(size_bytes),
        created_at: Set(chrono::Utc::now()),
    };

    new_media.insert(db).await
}

/// Fetch a single media row by ID.
pub async fn get_media_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<media::Model>, DbErr> {
    media::Entity::find_by_id(id).one(db).await
}

/// Fetch all media attached to an owner.
pub async fn get_media_by_owner(
    db: &DatabaseConnection,
    owner_type: OwnerType,
    owner_id: Uuid,
) -> Result<Vec<media::Model>, DbErr> {
    media::Entity::find()
        .filter(media::Column::OwnerType.eq(owner_type))
        .filter(media::Column::OwnerId.eq(owner_id))
        .order_by_desc(media::Column::CreatedAt)
        .all(db)
        .await
}

/// Delete a media row by ID.
pub async fn delete_media(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    media::Entity::delete_by_id(id).exec(db).await
}
