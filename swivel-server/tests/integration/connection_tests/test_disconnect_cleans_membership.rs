use swivel_core::{Reading, Role};
use swivel_server::ConnState;

use crate::integration::{init_tracing, single_active_relay};
use crate::utils::TestClient;

#[tokio::test]
async fn test_disconnect_cleans_membership() {
    init_tracing();

    let (registry, hub) = single_active_relay();
    let code = registry.create_room();

    let mut desktop = TestClient::connect(&hub);
    let mut remote = TestClient::connect(&hub);
    desktop.join(&code, Role::Desktop).await;
    remote.join(&code, Role::Remote).await;
    assert_eq!(hub.room_size(&code), 2);

    desktop.disconnect();
    assert_eq!(desktop.state(), ConnState::Closed);
    assert_eq!(hub.room_size(&code), 1, "member count decreases by exactly one");
    assert!(!hub.is_registered(desktop.conn_id));

    // Idempotent: a second disconnect causes no second decrement or error.
    desktop.disconnect();
    assert_eq!(hub.room_size(&code), 1);

    // No further broadcast targets the closed connection.
    let before = desktop.sink.message_count().await;
    remote
        .send_gyro(&code, Reading::Number(0.5), Reading::Number(90.0))
        .await;
    assert_eq!(desktop.sink.message_count().await, before);
}
