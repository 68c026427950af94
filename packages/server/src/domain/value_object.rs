//! Value Objects
//!
//! 不変で、値そのものが同一性を表すドメインの基本型。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValueObjectError;

/// ユーザー ID（ストアの users テーブルの主キー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<&str> for UserId {
    type Error = ValueObjectError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        raw.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidUserId(raw.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メッセージ ID（永続化時にストアが採番する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メッセージ本文
///
/// 空文字列や空白のみの本文は作れない。長さの上限はこの層では設けず、
/// トランスポートのフレーム上限（128 KiB）に委ねる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(content: String) -> Result<Self, ValueObjectError> {
        if content.trim().is_empty() {
            return Err(ValueObjectError::BlankContent);
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns at most `max_chars` characters of the content.
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.0.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

/// Unix timestamp (milliseconds, UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 1 本の WebSocket 接続を識別する ID
///
/// 同じ [`SessionKey`] に後から別の接続が登録された場合でも、
/// 古い接続の切断処理が新しい接続の登録を消さないようにするために使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session Registry のキー
///
/// - `Roster`: 会話一覧の接続。ユーザーごとに 1 本（`"{userId}"`）
/// - `Conversation`: 会話の接続。閲覧者 → 相手の向きを持つ（`"{userId}_{recipientId}"`）
///
/// 会話キーは向き付きで、`A_B` と `B_A` は別の接続を指す。
/// 相手への配信はこの規約（`recipientId_userId` の逆引き）に依存している。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKey {
    Roster(UserId),
    Conversation { user: UserId, recipient: UserId },
}

impl SessionKey {
    pub fn roster(user: UserId) -> Self {
        Self::Roster(user)
    }

    pub fn conversation(user: UserId, recipient: UserId) -> Self {
        Self::Conversation { user, recipient }
    }

    /// The key of the peer's connection for the same conversation.
    ///
    /// Roster keys have no peer and return `None`.
    pub fn reversed(&self) -> Option<Self> {
        match *self {
            Self::Roster(_) => None,
            Self::Conversation { user, recipient } => Some(Self::Conversation {
                user: recipient,
                recipient: user,
            }),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster(user) => write!(f, "{}", user),
            Self::Conversation { user, recipient } => write!(f, "{}_{}", user, recipient),
        }
    }
}
