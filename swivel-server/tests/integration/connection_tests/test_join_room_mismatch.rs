use swivel_core::{JoinReason, Role};
use swivel_server::ConnState;

use crate::integration::{init_tracing, single_active_relay};
use crate::utils::TestClient;

#[tokio::test]
async fn test_join_room_mismatch() {
    init_tracing();

    let (registry, hub) = single_active_relay();
    let code = registry.create_room();

    let mut desktop = TestClient::connect(&hub);
    desktop.join(&code, Role::Desktop).await;

    // A code that cannot be the active one: the alphabet has no '0'.
    let mut remote = TestClient::connect(&hub);
    remote.join("0000", Role::Remote).await;

    assert_eq!(remote.state(), ConnState::RoleKnown, "failed join must not advance");
    let results = remote.join_results().await;
    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(results[0].room, "0000");
    assert_eq!(results[0].reason, Some(JoinReason::RoomMismatch));

    // The active room's membership is unchanged.
    assert_eq!(hub.members_of(&code), vec![desktop.conn_id]);
    assert_eq!(hub.room_size("0000"), 0);
    // The desktop was not addressed by the failure (it sits in a different room).
    assert_eq!(desktop.sink.message_count().await, 1);
}
