//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, room-name generation for isolated game rooms,
//! and Problem Details assertions for HTTP error responses.

pub mod problem_details;
pub mod test_logging;
pub mod unique_rooms;
