use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::jwt;
use crate::auth::middleware::JwtSecret;
use crate::chat::protocol::{ClientMessage, ServerMessage};
use crate::chat::server::ChatServer;
use crate::db::messages as message_db;
use crate::db::rooms as room_db;
use crate::models::messages::CreateMessage;

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/chat/ws/{room_id}?token=<jwt>
///
/// Upgrades the HTTP connection to a WebSocket.
/// Authenticates via query param token (browsers can't send Authorization
/// headers during the WebSocket handshake).
/// Validates that:
/// 1. The JWT is valid (expired tokens are rejected, never reissued).
/// 2. The room exists.
/// 3. The user is a participant of the room.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    path: web::Path<Uuid>,
    query: web::Query<WsQuery>,
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    chat_server: web::Data<Arc<ChatServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    let room_id = path.into_inner();
    let token = &query.token;

    // 1. Validate the JWT.
    let claims = jwt::validate_token(token, &secret.0)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;

    // 2. Verify the room exists.
    room_db::get_room_by_id(db.get_ref(), room_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?
        .ok_or_else(|| actix_web::error::ErrorNotFound(format!("Room {room_id} not found")))?;

    // 3. Verify the user is a participant.
    let is_member = room_db::is_participant(db.get_ref(), room_id, user_id)
        .await
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Database error: {e}")))?;

    if !is_member {
        return Err(actix_web::error::ErrorForbidden(
            "You are not a participant of this room",
        ));
    }

    // 4. Upgrade to WebSocket.
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    // 5. Join the room and get a receiver for outgoing messages.
    let rx = chat_server.join(room_id, user_id).await;

    // 6. Spawn the WebSocket session task.
    let db_clone = db.get_ref().clone();
    let chat_server_clone = chat_server.get_ref().clone();

    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        room_id,
        user_id,
        db_clone,
        chat_server_clone,
    ));

    Ok(response)
}

/// Drives the WebSocket session: reads incoming messages from the client,
/// sends outgoing messages from the chat server, and handles cleanup on
/// disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    room_id: Uuid,
    user_id: Uuid,
    db: DatabaseConnection,
    chat_server: Arc<ChatServer>,
) {
    loop {
        tokio::select! {
            // Incoming message from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        handle_client_message(
                            &text,
                            &mut session,
                            room_id,
                            user_id,
                            &db,
                            &chat_server,
                        )
                        .await;
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Outgoing message from the chat server to this client.
            Some(server_msg) = rx.recv() => {
                let json = match serde_json::to_string(&server_msg) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    // Clean up: leave the room.
    chat_server.leave(room_id, user_id).await;
    let _ = session.close(None).await;
}

/// A reader may mark a message as read only if it belongs to the room this
/// session is connected to and the reader is not its sender.
fn can_mark_read(message_room: Uuid, session_room: Uuid, sender_id: Uuid, reader_id: Uuid) -> bool {
    message_room == session_room && sender_id != reader_id
}

/// Parse and handle an incoming client message.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    room_id: Uuid,
    user_id: Uuid,
    db: &DatabaseConnection,
    chat_server: &ChatServer,
) {
    let client_msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let err = ServerMessage::Error {
                message: format!("Invalid message format: {e}"),
            };
            let _ = session
                .text(serde_json::to_string(&err).unwrap_or_default())
                .await;
            return;
        }
    };

    match client_msg {
        ClientMessage::SendMessage { content } => {
            if content.trim().is_empty() {
                let err = ServerMessage::Error {
                    message: "Message content cannot be empty".to_string(),
                };
                let _ = session
                    .text(serde_json::to_string(&err).unwrap_or_default())
                    .await;
                return;
            }

            // Persist the message before broadcasting.
            let input = CreateMessage {
                room_id,
                sender_id: user_id,
                content: content.clone(),
            };

            match message_db::insert_message(db, input).await {
                Ok(saved) => {
                    let msg = ServerMessage::NewMessage {
                        id: saved.id,
                        room_id: saved.room_id,
                        sender_id: saved.sender_id,
                        content: saved.content,
                        created_at: saved.created_at.to_rfc3339(),
                    };

                    // Broadcast to all participants (including sender, so
                    // they get the server-assigned id and timestamp).
                    chat_server.broadcast(room_id, msg, None).await;
                }
                Err(e) => {
                    let err = ServerMessage::Error {
                        message: format!("Failed to save message: {e}"),
                    };
                    let _ = session
                        .text(serde_json::to_string(&err).unwrap_or_default())
                        .await;
                }
            }
        }

        ClientMessage::MarkRead { message_id } => {
            // The client supplies the id; check the message actually lives in
            // this room and was sent by the other party before touching it.
            let message = match message_db::get_message_by_id(db, message_id).await {
                Ok(Some(m)) => m,
                Ok(None) => {
                    let err = ServerMessage::Error {
                        message: format!("Message {message_id} not found"),
                    };
                    let _ = session
                        .text(serde_json::to_string(&err).unwrap_or_default())
                        .await;
                    return;
                }
                Err(e) => {
                    let err = ServerMessage::Error {
                        message: format!("Failed to mark message as read: {e}"),
                    };
                    let _ = session
                        .text(serde_json::to_string(&err).unwrap_or_default())
                        .await;
                    return;
                }
            };

            if !can_mark_read(message.room_id, room_id, message.sender_id, user_id) {
                let err = ServerMessage::Error {
                    message: "You can only mark messages sent to you in this room".to_string(),
                };
                let _ = session
                    .text(serde_json::to_string(&err).unwrap_or_default())
                    .await;
                return;
            }

            match message_db::mark_message_as_read(db, message_id).await {
                Ok(_) => {
                    let msg = ServerMessage::MessageRead { message_id };
                    chat_server.broadcast(room_id, msg, None).await;
                }
                Err(e) => {
                    let err = ServerMessage::Error {
                        message: format!("Failed to mark message as read: {e}"),
                    };
                    let _ = session
                        .text(serde_json::to_string(&err).unwrap_or_default())
                        .await;
                }
            }
        }

        ClientMessage::Typing => {
            let msg = ServerMessage::UserTyping { user_id };
            // Only send to others — the sender already knows they're typing.
            chat_server.broadcast(room_id, msg, Some(user_id)).await;
        }

        ClientMessage::StopTyping => {
            let msg = ServerMessage::UserStopTyping { user_id };
            chat_server.broadcast(room_id, msg, Some(user_id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_can_mark_messages_in_own_room() {
        let room = Uuid::new_v4();
        let sender = Uuid::new_v4();
        let reader = Uuid::new_v4();
        assert!(can_mark_read(room, room, sender, reader));
    }

    #[test]
    fn messages_from_other_rooms_cannot_be_marked() {
        let sender = Uuid::new_v4();
        let reader = Uuid::new_v4();
        assert!(!can_mark_read(Uuid::new_v4(), Uuid::new_v4(), sender, reader));
    }

    #[test]
    fn senders_cannot_mark_their_own_messages() {
        let room = Uuid::new_v4();
        let sender = Uuid::new_v4();
        assert!(!can_mark_read(room, room, sender, sender));
    }
}
