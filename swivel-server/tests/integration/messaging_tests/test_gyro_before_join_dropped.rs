use swivel_core::{Reading, Role};

use crate::integration::{init_tracing, single_active_relay};
use crate::utils::TestClient;

/// Orientation events are only relayed for joined connections, even when the
/// payload names a live room.
#[tokio::test]
async fn test_gyro_before_join_dropped() {
    init_tracing();

    let (registry, hub) = single_active_relay();
    let code = registry.create_room();

    let mut desktop = TestClient::connect(&hub);
    desktop.join(&code, Role::Desktop).await;

    let mut lurker = TestClient::connect(&hub);
    lurker
        .send_gyro(&code, Reading::Number(10.0), Reading::Number(20.0))
        .await;

    assert!(desktop.sink.gyro_from(lurker.conn_id).await.is_empty());
}
