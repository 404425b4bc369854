//! Services: orchestration between room state and the socket layer.

pub mod rooms;
