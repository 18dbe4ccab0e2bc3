use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a pairing a connection plays: the desktop display or the
/// mobile remote driving it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Desktop,
    Remote,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Desktop => write!(f, "desktop"),
            Role::Remote => write!(f, "remote"),
        }
    }
}
