use crate::hub::ConnectionHub;
use crate::listener::ws_handler;
use crate::registry::RoomRegistry;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub hub: Arc<ConnectionHub>,
}

/// HTTP surface of the relay: room creation, liveness, and the WebSocket
/// upgrade. CORS is wide open; the room code is the only gate this service
/// has.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/new-room", get(new_room))
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct NewRoomResponse {
    room: String,
}

/// `GET /api/new-room` — allocates a room and returns its code. Not
/// idempotent: under the single-active-room policy each call supersedes the
/// previous code.
async fn new_room(State(state): State<AppState>) -> Json<NewRoomResponse> {
    let room = state.registry.create_room();
    Json(NewRoomResponse { room })
}

async fn healthz() -> &'static str {
    "ok"
}
