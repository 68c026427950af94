//! OfflineNotifier implementations.

pub mod log;

pub use log::LoggingOfflineNotifier;
