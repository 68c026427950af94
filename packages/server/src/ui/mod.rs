//! HTTP / WebSocket surface of the relay.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::MAX_FRAME_BYTES;
pub use server::Server;
pub use state::AppState;
