//! Rooms: per-room state, the coordinator state machine and the registry.

pub mod coordinator;
pub mod registry;
pub mod room;

#[cfg(test)]
mod tests_props_coordinator;

pub use coordinator::{
    clean_nickname, GameOver, GameView, JoinKind, JoinResult, LeaveResult, MoveResult,
    ResetResult, Snapshot, StartResult, DEFAULT_NICKNAME,
};
pub use registry::{RoomGuard, RoomRegistry};
pub use room::{ConnId, Phase, PlayerEntry, Room, RoomId, Roster, MAX_ROOM_ID_LEN};
