//! Room code allocation.
//!
//! Room codes are 4-digit zero-padded decimal strings. A code is handed out
//! only if no live room uses it, but it is not reserved: two clients may race
//! for the same fresh code and end up in one room.

use rand::Rng;

use crate::errors::GameError;
use crate::rooms::RoomRegistry;

/// Number of distinct room codes.
pub const KEYSPACE: u32 = 10_000;

/// Random draws before falling back to a linear scan.
const RANDOM_ATTEMPTS: u32 = KEYSPACE * 4;

/// Allocate a room code that is not live in `registry`.
pub fn allocate_room_code(registry: &RoomRegistry) -> Result<String, GameError> {
    allocate_with(&mut rand::rng(), |code| registry.contains(code))
}

/// Allocate a code using `rng`, treating codes for which `is_live` returns
/// true as taken.
pub fn allocate_with<R, F>(rng: &mut R, is_live: F) -> Result<String, GameError>
where
    R: Rng,
    F: Fn(&str) -> bool,
{
    for _ in 0..RANDOM_ATTEMPTS {
        let code = format_code(rng.random_range(0..KEYSPACE));
        if !is_live(&code) {
            return Ok(code);
        }
    }

    (0..KEYSPACE)
        .map(format_code)
        .find(|code| !is_live(code))
        .ok_or(GameError::RoomCodesExhausted)
}

fn format_code(n: u32) -> String {
    format!("{n:04}")
}
