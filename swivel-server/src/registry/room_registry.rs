use crate::registry::Room;
use dashmap::DashMap;
use std::sync::Mutex;
use std::time::Duration;
use swivel_core::generate_code;
use tracing::info;

/// How the registry decides which codes are valid join targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryPolicy {
    /// Source-compatible behavior: a single current-room pointer. Creating a
    /// new room invalidates the previous code for join purposes. Members that
    /// already joined the old room keep relaying.
    SingleActive,
    /// Rooms keyed by code with independent lifetimes; entries expire `ttl`
    /// after creation, checked lazily on access.
    MultiRoom { ttl: Duration },
}

/// In-memory map of active room codes. Join validity is consulted fresh on
/// every call; nothing here is cached by callers.
pub struct RoomRegistry {
    policy: RegistryPolicy,
    code_length: usize,
    rooms: DashMap<String, Room>,
    /// Current-room pointer, only meaningful under `SingleActive`.
    current: Mutex<Option<String>>,
}

impl RoomRegistry {
    pub fn new(policy: RegistryPolicy, code_length: usize) -> Self {
        Self {
            policy,
            code_length,
            rooms: DashMap::new(),
            current: Mutex::new(None),
        }
    }

    /// Allocates a fresh room and returns its code. Generation retries until
    /// the code is unused among active rooms, so uniqueness holds even though
    /// the generator itself makes no such promise.
    pub fn create_room(&self) -> String {
        if let RegistryPolicy::MultiRoom { ttl } = self.policy {
            self.rooms.retain(|_, room| room.created_at.elapsed() < ttl);
        }

        let code = loop {
            let candidate = generate_code(self.code_length);
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        if self.policy == RegistryPolicy::SingleActive {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(previous) = current.take() {
                self.rooms.remove(&previous);
            }
            *current = Some(code.clone());
        }

        self.rooms.insert(code.clone(), Room::new(code.clone()));
        info!("created room {code}");
        code
    }

    /// Whether `code` is currently a valid join target.
    pub fn is_active(&self, code: &str) -> bool {
        match self.policy {
            RegistryPolicy::SingleActive => {
                let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
                current.as_deref() == Some(code)
            }
            RegistryPolicy::MultiRoom { ttl } => {
                let expired = match self.rooms.get(code) {
                    Some(room) => room.created_at.elapsed() >= ttl,
                    None => return false,
                };
                if expired {
                    self.rooms.remove(code);
                    return false;
                }
                true
            }
        }
    }

    /// Not-found is a `None`, not an error.
    pub fn get_room(&self, code: &str) -> Option<Room> {
        if !self.is_active(code) {
            return None;
        }
        self.rooms.get(code).map(|room| room.clone())
    }
}
