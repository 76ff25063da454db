use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::verify_room_participant;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::messages as message_db;
use crate::db::rooms as room_db;
use crate::db::users as user_db;
use crate::models::messages::{ConversationSummary, MessageQuery, MessageResponse};
use crate::models::rooms::CreateRoom;

/// POST /api/rooms — open a chat room with another user, reusing the
/// existing one when the pair already has a room.
pub async fn create_room(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateRoom>,
) -> impl Responder {
    let peer_id = body.peer_id;

    if peer_id == user.0.id {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "You cannot open a room with yourself",
        }));
    }

    match user_db::get_user_by_id(db.get_ref(), peer_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("User {peer_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match room_db::find_room_between(db.get_ref(), user.0.id, peer_id).await {
        Ok(Some(existing)) => return HttpResponse::Ok().json(existing),
        Ok(None) => {}
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    }

    match room_db::insert_room_with_participants(db.get_ref(), user.0.id, peer_id).await {
        Ok(room) => HttpResponse::Created().json(room),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create room: {e}"),
        })),
    }
}

/// GET /api/rooms — the caller's rooms with last message,
/// peer and unread count, sorted by recency.
pub async fn get_conversations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    let room_ids = match room_db::get_room_ids_for_user(db.get_ref(), user.0.id).await {
        Ok(ids) => ids,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let unread_counts =
        match message_db::count_unread_for_rooms(db.get_ref(), room_ids.clone(), user.0.id).await {
            Ok(counts) => counts,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    let latest =
        match message_db::get_latest_messages_for_rooms(db.get_ref(), room_ids.clone()).await {
            Ok(latest) => latest,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    let mut conversations = Vec::with_capacity(room_ids.len());
    for room_id in room_ids {
        let participants = match room_db::get_participant_ids(db.get_ref(), room_id).await {
            Ok(ids) => ids,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

        let Some(other_user_id) = participants.into_iter().find(|id| *id != user.0.id) else {
            continue;
        };

        let other_user_name = match user_db::get_user_by_id(db.get_ref(), other_user_id).await {
            Ok(Some(other)) => other.display_name.or(Some(other.username)),
            _ => None,
        };

        let last = latest.get(&room_id);

        conversations.push(ConversationSummary {
            room_id,
            other_user_id,
            other_user_name,
            last_message: last.map(|m| m.content.clone()),
            last_message_at: last.map(|m| m.created_at),
            unread_count: unread_counts.get(&room_id).copied().unwrap_or(0),
        });
    }

    // Most recently active first; empty rooms sink to the bottom.
    conversations.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));

    HttpResponse::Ok().json(conversations)
}

/// GET /api/rooms/{room_id}/messages — cursor-paginated history, newest
/// first (participants only).
pub async fn get_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<MessageQuery>,
) -> impl Responder {
    let room_id = path.into_inner();

    if let Err(resp) = verify_room_participant(db.get_ref(), room_id, user.0.id).await {
        return resp;
    }

    match message_db::get_messages_by_room(
        db.get_ref(),
        room_id,
        query.limit(),
        query.cursor_created_at,
        query.cursor_id,
    )
    .await
    {
        Ok(messages) => {
            let response: Vec<MessageResponse> =
                messages.into_iter().map(MessageResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/rooms/{room_id}/read — mark everything the peer sent as read.
pub async fn mark_room_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let room_id = path.into_inner();

    if let Err(resp) = verify_room_participant(db.get_ref(), room_id, user.0.id).await {
        return resp;
    }

    match message_db::mark_all_read_for_room(db.get_ref(), room_id, user.0.id).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "updated": updated,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
