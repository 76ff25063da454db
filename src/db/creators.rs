use sea_orm::*;
use uuid::Uuid;

use crate::models::creators::{self, UpdateCreator};

/// Fetch a creator profile by its own ID.
pub async fn get_creator_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<creators::Model>, DbErr> {
    creators::Entity::find_by_id(id).one(db).await
}

/// Fetch the creator profile belonging to a user.
pub async fn get_creator_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<creators::Model>, DbErr> {
    creators::Entity::find()
        .filter(creators::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// List creator profiles for discovery, newest first, offset-paginated.
pub async fn list_creators(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<creators::Model>, DbErr> {
    creators::Entity::find()
        .order_by_desc(creators::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Update a creator profile.
pub async fn update_creator(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCreator,
) -> Result<creators::Model, DbErr> {
    let creator = creators::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Creator not found".to_string()))?;

    let mut active: creators::ActiveModel = creator.into();

    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(category) = input.category {
        active.category = Set(Some(category));
    }
    if let Some(audience_size) = input.audience_size {
        active.audience_size = Set(Some(audience_size));
    }
    if let Some(pricing) = input.pricing {
        active.pricing = Set(Some(pricing));
    }
    if let Some(location) = input.location {
        active.location = Set(Some(location));
    }

    active.update(db).await
}
