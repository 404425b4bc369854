use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use tracing::debug;

use crate::rooms::room::{Room, RoomId};

/// Entry guard for one room. Holding it is the room's critical section.
pub type RoomGuard<'a> = RefMut<'a, RoomId, Room>;

/// Process-wide room table.
///
/// Rooms are created on first join and dropped once an empty lobby is left
/// behind. Callers must release a `RoomGuard` before calling any other
/// registry method; DashMap shard locks are not re-entrant.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    pub fn get_or_create(&self, id: &RoomId) -> RoomGuard<'_> {
        self.rooms.entry(id.clone()).or_insert_with(|| {
            debug!(room = %id, "[ROOMS] Creating room");
            Room::new(id.clone())
        })
    }

    pub fn get(&self, id: &RoomId) -> Option<RoomGuard<'_>> {
        self.rooms.get_mut(id)
    }

    /// Drop the room when it is an empty lobby. Returns whether it was removed.
    pub fn remove_if_empty(&self, id: &RoomId) -> bool {
        let removed = self
            .rooms
            .remove_if(id, |_, room| room.is_empty_lobby())
            .is_some();
        if removed {
            debug!(room = %id, "[ROOMS] Removed empty room");
        }
        removed
    }

    /// Whether a room with this exact identifier is live.
    pub fn contains(&self, code: &str) -> bool {
        RoomId::normalize(code).is_some_and(|id| self.rooms.contains_key(&id))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
