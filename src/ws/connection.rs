//! WebSocket connection state machine.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching inbound classroom events through the hub and draining the
//! connection's outbound queue to the socket. The connection's lifecycle
//! is `Connected → {joined rooms}* → Disconnected`; leaving rooms is
//! implicit on disconnect, clients never send an explicit leave.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::hub::BroadcastHub;
use super::messages::ClientMessage;
use super::rooms::ConnectionHandle;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads typed events from the client and dispatches them to the hub.
///   Malformed messages are dropped with a diagnostic; nothing is sent
///   back and nothing is broadcast.
/// - Forwards queued outbound messages (join acks and room fan-out) to
///   the client.
///
/// On socket close or error the connection is removed from every room it
/// had joined before the task exits.
pub async fn run_connection(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel();
    let handle = ConnectionHandle::new(out_tx);
    let conn_id = handle.id();

    tracing::debug!(%conn_id, "ws connection opened");

    loop {
        tokio::select! {
            // Incoming message from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(event) => hub.handle_message(&handle, event).await,
                            Err(err) => {
                                tracing::debug!(%conn_id, %err, "dropping malformed client message");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%conn_id, %err, "ws read error");
                        break;
                    }
                    _ => {}
                }
            }
            // Outbound message queued by the hub
            outbound = out_rx.recv() => {
                match outbound {
                    Some(message) => {
                        let json = serde_json::to_string(&message).unwrap_or_default();
                        if ws_tx.send(Message::text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    hub.disconnect(conn_id).await;
    tracing::debug!(%conn_id, "ws connection closed");
}
