/// Per-connection protocol state. Joins may be retried from `RoleKnown`
/// (or re-confirmed from `Joined`); `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    Connected,
    RoleKnown,
    Joined,
    Closed,
}
