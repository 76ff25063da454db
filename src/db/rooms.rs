use sea_orm::*;
use uuid::Uuid;

use crate::models::{room_participants, rooms};

/// Find an existing room whose participants are exactly {a, b}.
pub async fn find_room_between(
    db: &DatabaseConnection,
    a: Uuid,
    b: Uuid,
) -> Result<Option<rooms::Model>, DbErr> {
    // Rooms `a` belongs to, then filter to those that also contain `b`.
    let a_rows = room_participants::Entity::find()
        .filter(room_participants::Column::UserId.eq(a))
        .all(db)
        .await?;

    for row in a_rows {
        let has_b = room_participants::Entity::find()
            .filter(room_participants::Column::RoomId.eq(row.room_id))
            .filter(room_participants::Column::UserId.eq(b))
            .count(db)
            .await?
            > 0;
        if has_b {
            return rooms::Entity::find_by_id(row.room_id).one(db).await;
        }
    }
    Ok(None)
}

/// Create a room with its two participants in one transaction.
pub async fn insert_room_with_participants(
    db: &DatabaseConnection,
    a: Uuid,
    b: Uuid,
) -> Result<rooms::Model, DbErr> {
    let txn = db.begin().await?;

    let room_id = Uuid::new_v4();
    let new_room = rooms::ActiveModel {
        id: Set(room_id),
        created_at: Set(chrono::Utc::now()),
    };
    let room = new_room.insert(&txn).await?;

    for user_id in [a, b] {
        let participant = room_participants::ActiveModel {
            room_id: Set(room_id),
            user_id: Set(user_id),
            joined_at: Set(chrono::Utc::now()),
        };
        participant.insert(&txn).await?;
    }

    txn.commit().await?;
    Ok(room)
}

/// Fetch a room by ID.
pub async fn get_room_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<rooms::Model>, DbErr> {
    rooms::Entity::find_by_id(id).one(db).await
}

/// All room ids a user participates in.
pub async fn get_room_ids_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    let rows = room_participants::Entity::find()
        .filter(room_participants::Column::UserId.eq(user_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.room_id).collect())
}

/// Check room membership.
pub async fn is_participant(
    db: &DatabaseConnection,
    room_id: Uuid,
    user_id: Uuid,
) -> Result<bool, DbErr> {
    let count = room_participants::Entity::find()
        .filter(room_participants::Column::RoomId.eq(room_id))
        .filter(room_participants::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// All participant user ids of a room.
pub async fn get_participant_ids(
    db: &DatabaseConnection,
    room_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    let rows = room_participants::Entity::find()
        .filter(room_participants::Column::RoomId.eq(room_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.user_id).collect())
}
