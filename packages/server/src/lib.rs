//! Two-party realtime chat relay.
//!
//! Conversation connections are keyed by a `(userId, recipientId)` pair and
//! roster connections by `userId`. Messages are persisted, delivered to the
//! peer when it is connected, and every send refreshes both rosters.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
