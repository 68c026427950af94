//! Domain layer
//!
//! ## 構成
//!
//! - `value_object`: ID・本文・時刻・セッションキー
//! - `encoder`: 送信フレームのエンコード trait
//! - `entity`: ユーザー、メッセージ、ロスターの派生ビュー
//! - `handshake`: 接続時クエリ文字列の位置指定パース
//! - `repository`: ストアの trait
//! - `session`: Session Registry の trait と接続ハンドル
//! - `notifier`: オフライン通知の trait

pub mod encoder;
pub mod entity;
pub mod error;
pub mod handshake;
pub mod notifier;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::{
    HydratedMessage, Message, NewMessage, RosterEntry, RosterPeer, User, last_read_for,
    sort_roster,
};
pub use encoder::FrameEncoder;
pub use error::{FrameEncodeError, MessagePushError, RepositoryError, ValueObjectError};
pub use handshake::{ConversationParams, HandshakeError, parse_conversation_query, parse_roster_query};
pub use notifier::OfflineNotifier;
pub use repository::ChatRepository;
#[cfg(test)]
pub use repository::MockChatRepository;
pub use session::{PushFrame, PusherChannel, SessionHandle, SessionRegistry};
pub use value_object::{ConnectionId, MessageContent, MessageId, SessionKey, Timestamp, UserId};
