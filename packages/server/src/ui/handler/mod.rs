mod http;
mod websocket;

pub use http::{debug_sessions, health_check};
pub use websocket::{MAX_FRAME_BYTES, conversation_handler, roster_handler};
