use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Client -> Server messages ──

/// Messages the client sends to the server over WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Send a chat message.
    SendMessage { content: String },
    /// Mark a specific message as read.
    MarkRead { message_id: Uuid },
    /// Notify the other party that the user is typing.
    Typing,
    /// Notify the other party that the user stopped typing.
    StopTyping,
}

// ── Server -> Client messages ──

/// Messages the server sends to the client over WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new message was received (or echo of the sender's own message).
    NewMessage {
        id: Uuid,
        room_id: Uuid,
        sender_id: Uuid,
        content: String,
        created_at: String,
    },
    /// A message was marked as read.
    MessageRead { message_id: Uuid },
    /// The other user is typing.
    UserTyping { user_id: Uuid },
    /// The other user stopped typing.
    UserStopTyping { user_id: Uuid },
    /// Presence update: a user came online or went offline in this room.
    Presence { user_id: Uuid, online: bool },
    /// A new negotiation term was added to a deal both parties share.
    NewTerm {
        term_id: Uuid,
        deal_id: Uuid,
        title: String,
    },
    /// A term crossed the confirmation threshold and is now accepted.
    TermConfirmed {
        term_id: Uuid,
        confirmations: u64,
    },
    /// An out-of-band notification (deal requests, status changes).
    Notification {
        kind: String,
        body: String,
        deal_id: Option<Uuid>,
    },
    /// An error occurred.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_snake_case_tags() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"send_message","content":"hi"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::SendMessage { content } if content == "hi"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"typing"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Typing));
    }

    #[test]
    fn unknown_client_message_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"join_room"}"#).is_err());
    }

    #[test]
    fn server_messages_serialize_with_snake_case_tags() {
        let json = serde_json::to_string(&ServerMessage::TermConfirmed {
            term_id: Uuid::nil(),
            confirmations: 2,
        })
        .unwrap();
        assert!(json.contains(r#""type":"term_confirmed""#));
        assert!(json.contains(r#""confirmations":2"#));
    }
}
