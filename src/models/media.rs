use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum accepted upload size: 10 MB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// What kind of entity a media row is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OwnerType {
    #[sea_orm(string_value = "company")]
    Company,
    #[sea_orm(string_value = "content_creator")]
    ContentCreator,
    #[sea_orm(string_value = "deal")]
    Deal,
    #[sea_orm(string_value = "message")]
    Message,
}

/// Broad media category, derived from the mime type; decides the storage
/// subdirectory under `uploads/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Kind {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "audio")]
    Audio,
    #[sea_orm(string_value = "misc")]
    Misc,
}

impl Kind {
    /// Map a mime type to a kind, or None when the type is not accepted.
    /// Accepted top-level types mirror the upload whitelist:
    /// image, video, audio, application.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let top = mime.split('/').next().unwrap_or_default();
        match top {
            "image" => Some(Kind::Image),
            "video" => Some(Kind::Video),
            "audio" => Some(Kind::Audio),
            "application" => Some(Kind::Misc),
            _ => None,
        }
    }

    /// Storage subdirectory under the uploads root.
    pub fn subdir(&self) -> &'static str {
        match self {
            Kind::Image => "images",
            Kind::Video => "videos",
            Kind::Audio => "audio",
            Kind::Misc => "misc",
        }
    }
}

/// SeaORM entity for the `media` table (uploaded file metadata).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub uploader_id: Uuid,
    pub owner_type: OwnerType,
    pub owner_id: Uuid,
    pub file_name: String,
    pub mime_type: String,
    pub kind: Kind,
    /// Path relative to the uploads root, e.g. `images/<uuid>.png`.
    pub path: String,
    pub size_bytes: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploaderId",
        to = "super::users::Column::Id"
    )]
    Uploader,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_whitelist_routing() {
        assert_eq!(Kind::from_mime("image/png"), Some(Kind::Image));
        assert_eq!(Kind::from_mime("video/mp4"), Some(Kind::Video));
        assert_eq!(Kind::from_mime("audio/mpeg"), Some(Kind::Audio));
        assert_eq!(Kind::from_mime("application/pdf"), Some(Kind::Misc));
        assert_eq!(Kind::from_mime("text/html"), None);
        assert_eq!(Kind::from_mime(""), None);
    }

    #[test]
    fn kind_subdirs() {
        assert_eq!(Kind::Image.subdir(), "images");
        assert_eq!(Kind::Video.subdir(), "videos");
        assert_eq!(Kind::Audio.subdir(), "audio");
        assert_eq!(Kind::Misc.subdir(), "misc");
    }
}
