use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::chat::protocol::ServerMessage;

/// A handle to send messages to a connected WebSocket client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub user_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Manages all active WebSocket connections, organized by room_id.
///
/// Each room maps to a list of connected client handles. This allows
/// broadcasting messages, typing indicators, presence updates and
/// negotiation events to all participants of a room.
pub struct ChatServer {
    /// room_id -> list of connected client handles
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl ChatServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new WebSocket connection for a room.
    /// Returns a receiver that the WebSocket session should listen on.
    pub async fn join(&self, room_id: Uuid, user_id: Uuid) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = ClientHandle {
            user_id,
            sender: tx,
        };

        // Notify existing participants that this user came online.
        let presence_msg = ServerMessage::Presence {
            user_id,
            online: true,
        };

        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(room_id).or_default();

        // Send presence to existing members before adding the new one.
        for client in room.iter() {
            if client.user_id != user_id {
                let _ = client.sender.send(presence_msg.clone());
            }
        }

        room.push(handle);

        rx
    }

    /// Remove a WebSocket connection for a room.
    pub async fn leave(&self, room_id: Uuid, user_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(&room_id) {
            // Remove the first matching handle for this user.
            // (A user could have multiple connections, so only remove one.)
            if let Some(pos) = room.iter().position(|c| c.user_id == user_id) {
                room.remove(pos);
            }

            // Check if this user still has other connections in this room.
            let still_connected = room.iter().any(|c| c.user_id == user_id);

            if !still_connected {
                let presence_msg = ServerMessage::Presence {
                    user_id,
                    online: false,
                };
                for client in room.iter() {
                    let _ = client.sender.send(presence_msg.clone());
                }
            }

            // Clean up empty rooms.
            if room.is_empty() {
                rooms.remove(&room_id);
            }
        }
    }

    /// Broadcast a message to all participants in a room, optionally
    /// excluding the sender.
    pub async fn broadcast(&self, room_id: Uuid, message: ServerMessage, exclude_user: Option<Uuid>) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&room_id) {
            for client in room {
                if Some(client.user_id) == exclude_user {
                    continue;
                }
                // If the send fails, the receiver has been dropped
                // (disconnected); leave() will clean it up.
                let _ = client.sender.send(message.clone());
            }
        }
    }

    /// Best-effort push to every connection a user has, in any room.
    /// Used for deal notifications — a persisted notification row is the
    /// source of truth, this is only the live nudge.
    pub async fn notify_user(&self, user_id: Uuid, message: ServerMessage) {
        let rooms = self.rooms.read().await;
        for room in rooms.values() {
            for client in room {
                if client.user_id == user_id {
                    let _ = client.sender.send(message.clone());
                }
            }
        }
    }

    /// Check if a specific user is currently online in a room.
    pub async fn is_user_online(&self, room_id: Uuid, user_id: Uuid) -> bool {
        let rooms = self.rooms.read().await;
        rooms
            .get(&room_id)
            .map(|room| room.iter().any(|c| c.user_id == user_id))
            .unwrap_or(false)
    }
}

impl Default for ChatServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn join_then_leave_updates_presence_and_membership() {
        let server = ChatServer::new();
        let room = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_rx = server.join(room, alice).await;
        assert!(server.is_user_online(room, alice).await);

        let _bob_rx = server.join(room, bob).await;

        // Alice sees Bob come online.
        let msg = alice_rx.recv().await.unwrap();
        assert!(matches!(
            msg,
            ServerMessage::Presence { user_id, online: true } if user_id == bob
        ));

        server.leave(room, bob).await;
        let msg = alice_rx.recv().await.unwrap();
        assert!(matches!(
            msg,
            ServerMessage::Presence { user_id, online: false } if user_id == bob
        ));
        assert!(!server.is_user_online(room, bob).await);
    }

    #[tokio::test]
    async fn broadcast_excludes_requested_user() {
        let server = ChatServer::new();
        let room = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut alice_rx = server.join(room, alice).await;
        let mut bob_rx = server.join(room, bob).await;
        let _ = alice_rx.recv().await; // drain Bob's presence

        server
            .broadcast(
                room,
                ServerMessage::UserTyping { user_id: alice },
                Some(alice),
            )
            .await;

        let msg = bob_rx.recv().await.unwrap();
        assert!(matches!(msg, ServerMessage::UserTyping { user_id } if user_id == alice));
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn notify_user_reaches_all_their_rooms() {
        let server = ChatServer::new();
        let user = Uuid::new_v4();
        let room_a = Uuid::new_v4();
        let room_b = Uuid::new_v4();

        let mut rx_a = server.join(room_a, user).await;
        let mut rx_b = server.join(room_b, user).await;

        server
            .notify_user(
                user,
                ServerMessage::Notification {
                    kind: "deal_request".to_string(),
                    body: "New deal request".to_string(),
                    deal_id: None,
                },
            )
            .await;

        assert!(matches!(
            rx_a.recv().await.unwrap(),
            ServerMessage::Notification { .. }
        ));
        assert!(matches!(
            rx_b.recv().await.unwrap(),
            ServerMessage::Notification { .. }
        ));
    }
}
