//! Utilities shared by the Taiwa binaries and their tests.

pub mod logger;
pub mod time;
