//! WebSocket Message Types
//!
//! Messages exchanged between dashboards and the update stream.

use serde::{Deserialize, Serialize};

use crate::store::ContentEvent;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
        /// Snapshot version being served right now
        version: u64,
    },
    /// Served payloads changed
    ContentUpdated {
        version: u64,
        /// Milliseconds since epoch
        timestamp: i64,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl From<ContentEvent> for ServerMessage {
    fn from(event: ContentEvent) -> Self {
        ServerMessage::ContentUpdated {
            version: event.version,
            timestamp: event.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_json() {
        let msg = ServerMessage::from(ContentEvent {
            version: 3,
            timestamp: 1_585_000_000_000,
        });
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"content_updated","version":3,"timestamp":1585000000000}"#
        );
        assert_eq!(serde_json::to_string(&ServerMessage::Pong).unwrap(), r#"{"type":"pong"}"#);
    }

    #[test]
    fn test_client_message_parse() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"subscribe"}"#).is_err());
    }
}
