//! Infrastructure layer
//!
//! ドメイン層の trait の具体的な実装と、外部とやり取りする DTO。

pub mod dto;
pub mod notifier;
pub mod repository;
pub mod seed;
pub mod session_registry;
