use std::time::Instant;

/// Registry-side record of a pairing room. Membership is tracked by the
/// connection hub, not here: in the source system fan-out membership outlives
/// the join-gate (a superseded room keeps relaying for its existing members),
/// so the two live in separate maps.
#[derive(Debug, Clone)]
pub struct Room {
    pub code: String,
    pub created_at: Instant,
}

impl Room {
    pub fn new(code: String) -> Self {
        Self {
            code,
            created_at: Instant::now(),
        }
    }
}
