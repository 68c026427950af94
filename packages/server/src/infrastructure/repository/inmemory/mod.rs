//! In-memory implementations of the store traits.

pub mod chat;

pub use chat::InMemoryChatRepository;
