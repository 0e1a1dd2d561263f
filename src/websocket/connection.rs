use axum::extract::ws::{Message as WsMessage, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    models::message::{ClientMessage, ServerEvent},
    state::AppState,
};

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>, address: String) {
    let (outbox, mut rx) = mpsc::unbounded_channel::<Arc<ServerEvent>>();
    let id = state.hub.lock().await.open(address, outbox).id;

    // Split socket into sender and receiver
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Drain the outbox in order; the hub never waits on this side.
    let send_id = id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match event.encode() {
                Ok(text) => text,
                Err(e) => {
                    warn!(connection_id = %send_id, error = %e, "Failed to encode event");
                    continue;
                }
            };
            if ws_sender.send(WsMessage::Text(text.into())).await.is_err() {
                debug!(connection_id = %send_id, "Send failed, closing connection");
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_id = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(WsMessage::Text(text)) => match ClientMessage::decode(text.as_str()) {
                    Ok(message) => recv_state.hub.lock().await.handle(&recv_id, message),
                    Err(e) => {
                        warn!(connection_id = %recv_id, error = %e, "Dropping malformed message");
                    }
                },
                Ok(WsMessage::Close(_)) => break,
                Ok(_) => continue,
                Err(e) => {
                    debug!(connection_id = %recv_id, error = %e, "Receive failed");
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.hub.lock().await.disconnect(&id);
}
