//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{FrameEncodeError, MessageId, MessagePushError, RepositoryError, UserId};

/// 接続確立（ハンドシェイク検証）のエラー
///
/// いずれも終端エラーで、接続は理由付きで閉じられる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// userId が無い・数値でない・存在しない
    #[error("invalid userId")]
    InvalidUserId,

    /// recipientId が無い・数値でない・存在しない
    #[error("invalid recipientId")]
    InvalidRecipientId,

    /// 自分自身との会話
    #[error("sender and recipient are the same user")]
    SameParticipant,

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ConnectError {
    /// Close reason sent to the client.
    pub fn close_reason(&self) -> &'static str {
        match self {
            Self::InvalidUserId => "Invalid userId",
            Self::InvalidRecipientId => "Invalid recipientId",
            Self::SameParticipant => "Sender ID and recipient ID are the same",
            Self::Repository(_) => "Internal server error",
        }
    }
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    /// 空・空白のみの本文（無視される）
    #[error("message content is blank")]
    EmptyContent,

    /// 送信者がストアに存在しない（接続を閉じる）
    #[error("sender {0} does not exist")]
    InvalidSender(UserId),

    #[error("saved message {0} could not be loaded")]
    MessageNotFound(MessageId),

    #[error(transparent)]
    Encode(#[from] FrameEncodeError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// ロスター再計算・送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshRosterError {
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Encode(#[from] FrameEncodeError),

    #[error("push error: {0}")]
    Push(#[from] MessagePushError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_close_reasons() {
        // テスト項目: ハンドシェイクエラーごとの close 理由
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(ConnectError::InvalidUserId.close_reason(), "Invalid userId");
        assert_eq!(
            ConnectError::InvalidRecipientId.close_reason(),
            "Invalid recipientId"
        );
        assert_eq!(
            ConnectError::SameParticipant.close_reason(),
            "Sender ID and recipient ID are the same"
        );
        assert_eq!(
            ConnectError::Repository(RepositoryError::Storage("down".to_string())).close_reason(),
            "Internal server error"
        );
    }
}
