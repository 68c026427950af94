//! ドメイン層のエラー型

use thiserror::Error;

/// Value Object の生成に失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("invalid user id: '{0}'")]
    InvalidUserId(String),

    #[error("message content must not be blank")]
    BlankContent,
}

/// ストア操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// 接続へのフレーム送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("session '{0}' is not registered")]
    SessionNotFound(String),

    #[error("session '{0}' is closed")]
    SessionClosed(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// フレームのエンコードに失敗した
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to encode frame: {0}")]
pub struct FrameEncodeError(pub String);
