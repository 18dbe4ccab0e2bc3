mod code;
mod connection;
mod message;
mod role;

pub use code::{CODE_ALPHABET, DEFAULT_CODE_LENGTH, generate_code};
pub use connection::ConnId;
pub use message::{ClientMessage, GyroEvent, JoinReason, JoinResult, Reading, ServerMessage};
pub use role::Role;
