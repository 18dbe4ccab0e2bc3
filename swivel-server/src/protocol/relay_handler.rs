use crate::hub::{ConnectionHub, HubError, JoinOutcome};
use crate::protocol::ConnState;
use std::sync::Arc;
use swivel_core::{ClientMessage, ConnId, GyroEvent, JoinResult, Role, ServerMessage};
use tracing::{debug, info, warn};

/// Message-level state machine applied per connection:
/// `Connected -> RoleKnown -> Joined -> Closed`.
///
/// Room creation is not handled here; it arrives over HTTP, is role-agnostic
/// and touches no connection state, so the listener calls the registry
/// directly.
pub struct RelayProtocolHandler {
    conn_id: ConnId,
    state: ConnState,
    hub: Arc<ConnectionHub>,
}

impl RelayProtocolHandler {
    pub fn new(conn_id: ConnId, hub: Arc<ConnectionHub>) -> Self {
        Self {
            conn_id,
            state: ConnState::Connected,
            hub,
        }
    }

    pub fn conn_id(&self) -> ConnId {
        self.conn_id
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub async fn handle_message(&mut self, msg: ClientMessage) {
        if self.state == ConnState::Closed {
            return;
        }
        match msg {
            ClientMessage::JoinRoom { room, source } => self.handle_join(room, source).await,
            ClientMessage::Gyro(event) => self.handle_gyro(event).await,
        }
    }

    /// Transport-level disconnect, valid from any state. Idempotent.
    pub fn handle_disconnect(&mut self) {
        if self.state == ConnState::Closed {
            return;
        }
        self.state = ConnState::Closed;
        self.hub.unregister(self.conn_id);
        info!("connection {} closed", self.conn_id);
    }

    async fn handle_join(&mut self, room: String, source: Role) {
        // Codes are typed by hand on a phone; normalize before gating.
        let code = room.trim().to_ascii_uppercase();
        info!("[{source}] {} is joining room #{code}", self.conn_id);

        if let Err(e) = self.hub.bind_role(self.conn_id, source) {
            self.report_join_error(&code, e).await;
            return;
        }
        if self.state == ConnState::Connected {
            self.state = ConnState::RoleKnown;
        }

        match self.hub.join_room(self.conn_id, &code) {
            Ok(JoinOutcome::Joined { role }) => {
                self.state = ConnState::Joined;
                // Members that were already in the room learn who arrived,
                // then everyone (the joiner included, it is a member by now)
                // gets the room-wide outcome.
                self.hub
                    .broadcast(
                        &code,
                        &ServerMessage::UserJoined { id: self.conn_id },
                        Some(self.conn_id),
                    )
                    .await;
                self.hub
                    .broadcast(
                        &code,
                        &ServerMessage::JoinResult(JoinResult::joined(&code, role)),
                        None,
                    )
                    .await;
            }
            Ok(JoinOutcome::Mismatch) => {
                let result = ServerMessage::JoinResult(JoinResult::mismatch(&code));
                // The outcome goes to whoever currently holds the target code,
                // and to the requester so it can prompt for re-entry.
                self.hub.broadcast(&code, &result, Some(self.conn_id)).await;
                self.hub.send_to(self.conn_id, &result).await;
            }
            Err(e) => self.report_join_error(&code, e).await,
        }
    }

    async fn handle_gyro(&mut self, event: GyroEvent) {
        if self.state != ConnState::Joined {
            debug!("dropping gyro event from {} (not joined)", self.conn_id);
            return;
        }
        let Some(room) = event.room.filter(|room| !room.is_empty()) else {
            debug!("dropping gyro event from {} (no room)", self.conn_id);
            return;
        };

        let msg = ServerMessage::Gyro {
            room: room.clone(),
            delta: event.delta,
            gyro: event.gyro,
            id: self.conn_id,
        };
        self.hub.broadcast(&room, &msg, Some(self.conn_id)).await;
    }

    /// An unexpected failure while processing a join is recovered locally and
    /// reported to the requester only; the connection stays open.
    async fn report_join_error(&self, code: &str, err: HubError) {
        warn!("join processing failed for {}: {err}", self.conn_id);
        let result = ServerMessage::JoinResult(JoinResult::error(code, err.to_string()));
        self.hub.send_to(self.conn_id, &result).await;
    }
}
