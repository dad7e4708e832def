//! Room lifecycle management for Riftdraft.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! [`riftdraft_core::DraftSession`], its member channels, and the
//! 1-second clock that drives the session.
//!
//! # Key types
//!
//! - [`RoomManager`] — creates/destroys rooms, routes players by code
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomOutbound`] — what a member's connection handler receives

mod error;
mod manager;
mod room;

pub use error::RoomError;
pub use manager::RoomManager;
pub use room::{LeaveInfo, PlayerSender, RoomHandle, RoomInfo, RoomOutbound};
