use async_trait::async_trait;
use std::sync::Arc;
use swivel_core::{ConnId, JoinResult, ServerMessage};
use swivel_server::ClientSink;
use tokio::sync::{Mutex, mpsc};

/// Mock ClientSink that captures everything the relay delivers to one
/// connection.
pub struct MockClientSink {
    /// Channel mirroring every delivery, for tests that want to await one.
    tx: mpsc::UnboundedSender<ServerMessage>,
    /// All captured messages (for verification).
    messages: Arc<Mutex<Vec<ServerMessage>>>,
}

impl MockClientSink {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(Self {
            tx,
            messages: Arc::new(Mutex::new(Vec::new())),
        });
        (sink, rx)
    }

    pub async fn received(&self) -> Vec<ServerMessage> {
        self.messages.lock().await.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn join_results(&self) -> Vec<JoinResult> {
        self.messages
            .lock()
            .await
            .iter()
            .filter_map(|msg| match msg {
                ServerMessage::JoinResult(result) => Some(result.clone()),
                _ => None,
            })
            .collect()
    }

    /// Gyro deliveries originating from `id`, in delivery order.
    pub async fn gyro_from(&self, id: ConnId) -> Vec<ServerMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|msg| matches!(msg, ServerMessage::Gyro { id: sender, .. } if *sender == id))
            .cloned()
            .collect()
    }

    pub async fn user_joined_ids(&self) -> Vec<ConnId> {
        self.messages
            .lock()
            .await
            .iter()
            .filter_map(|msg| match msg {
                ServerMessage::UserJoined { id } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ClientSink for MockClientSink {
    async fn deliver(&self, msg: ServerMessage) {
        self.messages.lock().await.push(msg.clone());
        let _ = self.tx.send(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swivel_core::Role;

    #[tokio::test]
    async fn mock_sink_captures_deliveries() {
        let (sink, mut rx) = MockClientSink::new();
        let msg = ServerMessage::JoinResult(JoinResult::joined("AB23", Role::Desktop));

        sink.deliver(msg.clone()).await;

        assert_eq!(rx.recv().await.unwrap(), msg);
        assert_eq!(sink.received().await, vec![msg]);
        assert_eq!(sink.join_results().await.len(), 1);
    }
}
