use crate::hub::ClientSink;
use crate::listener::AppState;
use crate::protocol::RelayProtocolHandler;
use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use swivel_core::{ClientMessage, ConnId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Sink backed by the connection's unbounded outbound queue. Sending never
/// blocks; a queue whose drain task died just drops the message.
struct WsClientSink {
    conn_id: ConnId,
    tx: mpsc::UnboundedSender<Message>,
}

#[async_trait]
impl ClientSink for WsClientSink {
    async fn deliver(&self, msg: ServerMessage) {
        match serde_json::to_string(&msg) {
            Ok(json) => {
                if self.tx.send(Message::Text(json.into())).is_err() {
                    debug!("outbound queue closed for {}", self.conn_id);
                }
            }
            Err(e) => error!("failed to serialize message for {}: {e}", self.conn_id),
        }
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let conn_id = ConnId::new();
    ws.on_upgrade(move |socket| handle_socket(socket, conn_id, state))
}

async fn handle_socket(socket: WebSocket, conn_id: ConnId, state: AppState) {
    info!("websocket connected: {conn_id}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.hub.register(conn_id, Arc::new(WsClientSink { conn_id, tx }));
    let mut handler = RelayProtocolHandler::new(conn_id, state.hub.clone());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => handler.handle_message(client_msg).await,
                    // Unrecognized frames are ignored, never fatal.
                    Err(e) => warn!("unrecognized frame from {conn_id}: {e}"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }

        handler.handle_disconnect();
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Backstop for the aborted-recv-task path; unregister is idempotent.
    state.hub.unregister(conn_id);
    info!("websocket disconnected: {conn_id}");
}
