//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::store::UpdateSubscription;

/// WebSocket upgrade handler
///
/// The update subscription is taken before the upgrade and moves into the
/// connection task; it is dropped, and so unsubscribed, when that task ends.
pub async fn updates_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let subscription = state.store.subscribe();
    let version = state.store.version().await;
    ws.on_upgrade(move |socket| handle_socket(socket, subscription, version))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, mut subscription: UpdateSubscription, version: u64) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    // Replies to client messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
        version,
    };
    if send_message(&mut sender, &connected).await.is_err() {
        tracing::debug!(connection_id = %connection_id, "Failed to send connected message");
        return;
    }

    tracing::info!(connection_id = %connection_id, version, "Update stream connected");

    let conn_id_for_send = connection_id.clone();

    // Task to forward replies and content updates to the WebSocket
    let mut send_task = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                reply = rx.recv() => match reply {
                    Some(msg) => msg,
                    None => break,
                },
                event = subscription.recv() => match event {
                    Some(event) => ServerMessage::from(event),
                    None => break,
                },
            };

            if send_message(&mut sender, &message).await.is_err() {
                tracing::debug!(
                    connection_id = %conn_id_for_send,
                    "WebSocket send failed, closing connection"
                );
                break;
            }
        }
    });

    let conn_id_for_recv = connection_id.clone();

    // Task to receive messages from the WebSocket
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&tx, &conn_id_for_recv, msg) {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    tracing::info!(connection_id = %connection_id, "Update stream disconnected");
}

async fn send_message<S>(sender: &mut S, message: &ServerMessage) -> Result<(), ()>
where
    S: futures_util::Sink<Message> + Unpin,
{
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            return Ok(());
        }
    };
    sender.send(Message::Text(text)).await.map_err(|_| ())
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
fn handle_ws_message(
    tx: &mpsc::UnboundedSender<ServerMessage>,
    connection_id: &str,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            let reply = match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Ping) => ServerMessage::Pong,
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    }
                }
            };
            tx.send(reply).is_ok()
        }
        Message::Binary(_) => tx
            .send(ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            })
            .is_ok(),
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}
