//! UseCase 層
//!
//! 接続の確立・切断、メッセージ送信、既読化、ロスター更新を扱う。
//! Domain 層の trait（ChatRepository, SessionRegistry, OfflineNotifier）にだけ依存する。

pub mod connect_conversation;
pub mod connect_roster;
pub mod disconnect_session;
pub mod error;
pub mod list_sessions;
pub mod read_receipt;
pub mod refresh_roster;
pub mod relay;
pub mod send_message;

#[cfg(test)]
mod test_support;

pub use connect_conversation::{
    ConnectConversationUseCase, ConnectedConversation, ConversationSession,
};
pub use connect_roster::{ConnectRosterUseCase, RosterSession};
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{ConnectError, RefreshRosterError, SendMessageError};
pub use list_sessions::ListSessionsUseCase;
pub use read_receipt::ReadReceiptUseCase;
pub use refresh_roster::{RefreshOutcome, RefreshRosterUseCase};
pub use relay::RelayOrchestrator;
pub use send_message::{OFFLINE_PREVIEW_CHARS, SendMessageUseCase, SendReceipt};
