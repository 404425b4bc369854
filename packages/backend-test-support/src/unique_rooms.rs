//! Unique room names for test isolation.
//!
//! Every integration test talks to a single shared server process per test,
//! but tests in one binary run concurrently and may share a registry when a
//! fixture is reused. Room names built here never collide across tests.

use ulid::Ulid;

/// Generate a unique room name with the given prefix.
///
/// The result only contains characters from the room charset
/// (`[A-Za-z0-9._-]`), so it survives room-name normalization unchanged.
///
/// # Examples
/// ```
/// use backend_test_support::unique_rooms::unique_room;
///
/// let a = unique_room("lobby");
/// let b = unique_room("lobby");
/// assert_ne!(a, b);
/// assert!(a.starts_with("lobby-"));
/// ```
pub fn unique_room(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

