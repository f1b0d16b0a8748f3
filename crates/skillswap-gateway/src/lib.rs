//! # skillswap-gateway
//!
//! Realtime hub: the in-memory presence map, chat room membership, and the
//! WebSocket event loop. This crate is a library; the API server mounts
//! its `/ws` route so HTTP and realtime share one process.

pub mod events;
pub mod handlers;
pub mod presence;
pub mod server;

pub use events::{ClientEvent, ServerEvent};
pub use presence::PresenceHub;
pub use server::{ws_handler, HubState};
