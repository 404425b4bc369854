//! WebSocket layer: wire protocol, broadcast groups and the two socket actors.

pub mod allocator;
pub mod hub;
pub mod protocol;
pub mod session;
