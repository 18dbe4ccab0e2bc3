use crate::model::connection::ConnId;
use crate::model::role::Role;
use serde::{Deserialize, Serialize};

/// A gyroscope reading as it appears on the wire. Remotes are free to send
/// numbers or pre-formatted strings (e.g. `delta` rounded with `toFixed`);
/// the relay forwards whichever it got, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

/// A single orientation sample from a remote. `delta` is the signed change
/// in heading since the previous sample, `gyro` the recalibrated absolute
/// heading, both in (-180, 180] degrees. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GyroEvent {
    /// Target room. Events without one are dropped, not rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub delta: Reading,
    pub gyro: Reading,
}

/// Messages a client may send over the persistent channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom { room: String, source: Role },
    Gyro(GyroEvent),
}

/// Why a join did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinReason {
    RoomMismatch,
    Error,
}

/// Outcome of a join attempt, broadcast to the target room's members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinResult {
    pub success: bool,
    pub room: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<JoinReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JoinResult {
    pub fn joined(room: impl Into<String>, source: Role) -> Self {
        Self {
            success: true,
            room: room.into(),
            source: Some(source),
            reason: None,
            message: None,
        }
    }

    pub fn mismatch(room: impl Into<String>) -> Self {
        Self {
            success: false,
            room: room.into(),
            source: None,
            reason: Some(JoinReason::RoomMismatch),
            message: None,
        }
    }

    pub fn error(room: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            room: room.into(),
            source: None,
            reason: Some(JoinReason::Error),
            message: Some(message.into()),
        }
    }
}

/// Messages the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    JoinResult(JoinResult),
    Gyro {
        room: String,
        delta: Reading,
        gyro: Reading,
        /// Originating connection, attached by the relay so recipients can
        /// tell senders apart.
        id: ConnId,
    },
    /// A peer entered the room; sent to the members that were already there.
    UserJoined { id: ConnId },
}
