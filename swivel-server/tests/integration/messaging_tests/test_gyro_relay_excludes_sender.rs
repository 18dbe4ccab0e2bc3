use swivel_core::{Reading, Role, ServerMessage};

use crate::integration::{init_tracing, single_active_relay};
use crate::utils::TestClient;

#[tokio::test]
async fn test_gyro_relay_excludes_sender() {
    init_tracing();

    let (registry, hub) = single_active_relay();
    let code = registry.create_room();

    let mut desktop = TestClient::connect(&hub);
    let mut remote = TestClient::connect(&hub);
    desktop.join(&code, Role::Desktop).await;
    remote.join(&code, Role::Remote).await;

    remote
        .send_gyro(&code, Reading::Number(-3.5), Reading::Number(177.25))
        .await;

    let delivered = desktop.sink.gyro_from(remote.conn_id).await;
    assert_eq!(delivered.len(), 1);
    let ServerMessage::Gyro { room, delta, gyro, id } = &delivered[0] else {
        panic!("expected a gyro delivery");
    };
    assert_eq!(room, &code);
    assert_eq!(delta, &Reading::Number(-3.5));
    assert_eq!(gyro, &Reading::Number(177.25));
    assert_eq!(*id, remote.conn_id);

    // Never echoed back to the sender.
    assert!(remote.sink.gyro_from(remote.conn_id).await.is_empty());
}
