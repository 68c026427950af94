//! Session Registry の trait 定義と接続ハンドル
//!
//! ## 責務
//!
//! - 論理的な識別子（[`SessionKey`]）から生きている接続ハンドルを引く
//! - put / get / remove を複数の接続から並行に呼べること
//!
//! レジストリは接続を所有しない。ハンドルは接続ごとの送信チャンネルの
//! クローンで、取得後に接続が閉じている可能性があるため、送信前に
//! [`SessionHandle::is_open`] を確認すること。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, SessionKey};

/// 接続の送信ループに渡すフレーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushFrame {
    /// テキストフレームを送る
    Text(String),
    /// 理由付きで接続を閉じる
    Close(String),
}

/// クライアントへのメッセージ送信用チャンネル
pub type PusherChannel = mpsc::UnboundedSender<PushFrame>;

/// 1 本の接続への送信ハンドル
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: ConnectionId,
    channel: PusherChannel,
}

impl SessionHandle {
    pub fn new(channel: PusherChannel) -> Self {
        Self {
            id: ConnectionId::generate(),
            channel,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The connection's pusher loop is still draining this handle's channel.
    pub fn is_open(&self) -> bool {
        !self.channel.is_closed()
    }

    pub fn send_text(&self, content: impl Into<String>) -> Result<(), MessagePushError> {
        self.channel
            .send(PushFrame::Text(content.into()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    pub fn close(&self, reason: impl Into<String>) -> Result<(), MessagePushError> {
        self.channel
            .send(PushFrame::Close(reason.into()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

/// Session Registry trait
///
/// `put` は同じキーの既存ハンドルを上書きする（後勝ち）。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// ハンドルを登録し、上書きされた以前のハンドルを返す
    async fn put(&self, key: SessionKey, handle: SessionHandle) -> Option<SessionHandle>;

    /// 登録済みのハンドルを取得
    async fn get(&self, key: &SessionKey) -> Option<SessionHandle>;

    /// キーの登録を無条件に削除
    async fn remove(&self, key: &SessionKey) -> Option<SessionHandle>;

    /// キーに登録されているのが `connection` の場合だけ削除する
    ///
    /// 後から同じキーで登録された接続を、古い接続の切断処理が消さないようにする。
    async fn remove_connection(&self, key: &SessionKey, connection: ConnectionId) -> bool;

    /// 登録済みのキー一覧
    async fn keys(&self) -> Vec<SessionKey>;

    /// キーに登録された接続が開いていればテキストフレームを送る
    async fn push_to(&self, key: &SessionKey, content: &str) -> Result<(), MessagePushError> {
        let handle = self
            .get(key)
            .await
            .ok_or_else(|| MessagePushError::SessionNotFound(key.to_string()))?;
        if !handle.is_open() {
            return Err(MessagePushError::SessionClosed(key.to_string()));
        }
        handle.send_text(content)
    }
}
