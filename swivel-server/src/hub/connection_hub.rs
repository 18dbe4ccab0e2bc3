use crate::hub::ClientSink;
use crate::registry::RoomRegistry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use swivel_core::{ConnId, Role, ServerMessage};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum HubError {
    #[error("unknown connection {0}")]
    UnknownConnection(ConnId),
    #[error("connection {0} has no role bound")]
    RoleUnbound(ConnId),
}

/// What `join_room` decided. Mismatch is the sole join gate; the hub imposes
/// no role-exclusivity cap on rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined { role: Role },
    Mismatch,
}

struct ConnectionEntry {
    role: Option<Role>,
    room: Option<String>,
    sink: Arc<dyn ClientSink>,
}

/// Live connections, their room membership, and message fan-out.
///
/// Connections and member sets live in separate maps; no method holds a guard
/// on both at once, and no guard is held across an await.
pub struct ConnectionHub {
    registry: Arc<RoomRegistry>,
    connections: DashMap<ConnId, ConnectionEntry>,
    members: DashMap<String, HashMap<ConnId, Role>>,
}

impl ConnectionHub {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            registry,
            connections: DashMap::new(),
            members: DashMap::new(),
        }
    }

    /// Creates a connection record with role unset.
    pub fn register(&self, id: ConnId, sink: Arc<dyn ClientSink>) {
        self.connections.insert(
            id,
            ConnectionEntry {
                role: None,
                room: None,
                sink,
            },
        );
    }

    /// Sets the connection's role. Overwriting with a different role is
    /// allowed (idempotent overwrite) but anomalous.
    pub fn bind_role(&self, id: ConnId, role: Role) -> Result<(), HubError> {
        let mut entry = self
            .connections
            .get_mut(&id)
            .ok_or(HubError::UnknownConnection(id))?;
        if let Some(existing) = entry.role
            && existing != role
        {
            warn!("connection {id} re-binding role {existing} -> {role}");
        }
        entry.role = Some(role);
        Ok(())
    }

    /// Validates `code` against the registry (consulted fresh on every call)
    /// and on match adds the connection to the room's member set under its
    /// bound role. A connection is in at most one room at a time; joining a
    /// different room leaves the previous one.
    pub fn join_room(&self, id: ConnId, code: &str) -> Result<JoinOutcome, HubError> {
        if !self.registry.is_active(code) {
            debug!("join rejected for {id}: {code} is not the active room");
            return Ok(JoinOutcome::Mismatch);
        }

        let (role, previous) = {
            let entry = self
                .connections
                .get(&id)
                .ok_or(HubError::UnknownConnection(id))?;
            (entry.role.ok_or(HubError::RoleUnbound(id))?, entry.room.clone())
        };

        if let Some(previous) = previous
            && previous != code
        {
            self.remove_member(&previous, id);
        }

        self.members
            .entry(code.to_string())
            .or_default()
            .insert(id, role);
        if let Some(mut entry) = self.connections.get_mut(&id) {
            entry.room = Some(code.to_string());
        }

        info!("[{role}] {id} joined room {code}");
        Ok(JoinOutcome::Joined { role })
    }

    /// Delivers `msg` to every member of `code` except `exclude`. Best-effort
    /// fire-and-forget: sinks are snapshotted first and delivery happens
    /// outside any map guard, so one peer can never stall another.
    pub async fn broadcast(&self, code: &str, msg: &ServerMessage, exclude: Option<ConnId>) {
        let targets: Vec<ConnId> = match self.members.get(code) {
            Some(members) => members
                .keys()
                .copied()
                .filter(|id| Some(*id) != exclude)
                .collect(),
            None => return,
        };

        let mut sinks = Vec::with_capacity(targets.len());
        for id in targets {
            if let Some(entry) = self.connections.get(&id) {
                sinks.push(entry.sink.clone());
            }
        }

        for sink in sinks {
            sink.deliver(msg.clone()).await;
        }
    }

    /// Unicast to a single connection; silently a no-op if it is gone.
    pub async fn send_to(&self, id: ConnId, msg: &ServerMessage) {
        let sink = match self.connections.get(&id) {
            Some(entry) => entry.sink.clone(),
            None => return,
        };
        sink.deliver(msg.clone()).await;
    }

    /// Removes the connection from its room (if any) and discards its record.
    /// Idempotent.
    pub fn unregister(&self, id: ConnId) {
        let Some((_, entry)) = self.connections.remove(&id) else {
            return;
        };
        if let Some(code) = entry.room {
            self.remove_member(&code, id);
            info!("connection {id} left room {code}");
        }
    }

    pub fn is_registered(&self, id: ConnId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn connection_room(&self, id: ConnId) -> Option<String> {
        self.connections.get(&id).and_then(|entry| entry.room.clone())
    }

    pub fn members_of(&self, code: &str) -> Vec<ConnId> {
        self.members
            .get(code)
            .map(|members| members.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn room_size(&self, code: &str) -> usize {
        self.members.get(code).map(|members| members.len()).unwrap_or(0)
    }

    fn remove_member(&self, code: &str, id: ConnId) {
        if let Some(mut members) = self.members.get_mut(code) {
            members.remove(&id);
        }
        self.members.remove_if(code, |_, members| members.is_empty());
    }
}
