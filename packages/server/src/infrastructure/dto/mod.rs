//! Data Transfer Objects (DTOs) for the chat relay.
//!
//! DTOs are organized by purpose:
//! - `websocket`: outbound WebSocket frame DTOs
//! - `seed`: user seed file DTOs
//!
//! `encoder` implements the domain `FrameEncoder` on top of the websocket DTOs.

pub mod conversion;
pub mod encoder;
pub mod seed;
pub mod websocket;
