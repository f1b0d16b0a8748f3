//! # skillswap-api
//!
//! HTTP server for the skill-exchange marketplace. Mounts the REST surface
//! and the realtime `/ws` route in a single process.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
