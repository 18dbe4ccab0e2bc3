use async_trait::async_trait;
use swivel_core::ServerMessage;

/// Outbound seam between room logic and the transport. The hub hands every
/// fan-out message to a sink; the WebSocket layer implements it with a
/// per-connection queue, tests implement it with a capturing mock.
///
/// Delivery is best-effort and must not block: a slow or dead peer is the
/// sink's problem, never the broadcaster's.
#[async_trait]
pub trait ClientSink: Send + Sync {
    async fn deliver(&self, msg: ServerMessage);
}
