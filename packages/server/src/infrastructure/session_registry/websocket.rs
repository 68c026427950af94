//! WebSocket 接続の Session Registry 実装
//!
//! ## 責務
//!
//! - [`SessionKey`] → [`SessionHandle`] のマップを管理
//! - 並行する接続ライフサイクルからの put / get / remove を直列化
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された送信チャンネルをハンドルとして受け取り、キーで引けるようにするだけです。
//! マップはロックの外へハンドルのクローンを返すので、送信中にロックを保持しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, SessionHandle, SessionKey, SessionRegistry};

/// WebSocket 接続の Session Registry
///
/// サーバーが 1 インスタンスを所有し、会話接続とロスター接続の両方のハンドラに渡す。
/// 会話キー（`"1_2"`）とロスターキー（`"1"`）は型で区別されるので衝突しない。
#[derive(Default)]
pub struct WebSocketSessionRegistry {
    /// Key: SessionKey
    /// Value: 接続ごとの送信ハンドル
    sessions: Mutex<HashMap<SessionKey, SessionHandle>>,
}

impl WebSocketSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for WebSocketSessionRegistry {
    async fn put(&self, key: SessionKey, handle: SessionHandle) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock().await;
        let connection = handle.id();
        let previous = sessions.insert(key, handle);
        match &previous {
            Some(old) => tracing::debug!(
                "Session '{}' re-registered: {} replaces {}",
                key,
                connection,
                old.id()
            ),
            None => tracing::debug!("Session '{}' registered ({})", key, connection),
        }
        previous
    }

    async fn get(&self, key: &SessionKey) -> Option<SessionHandle> {
        let sessions = self.sessions.lock().await;
        sessions.get(key).cloned()
    }

    async fn remove(&self, key: &SessionKey) -> Option<SessionHandle> {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(key);
        if removed.is_some() {
            tracing::debug!("Session '{}' unregistered", key);
        }
        removed
    }

    async fn remove_connection(&self, key: &SessionKey, connection: ConnectionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(key) {
            Some(current) if current.id() == connection => {
                sessions.remove(key);
                tracing::debug!("Session '{}' unregistered ({})", key, connection);
                true
            }
            Some(current) => {
                tracing::debug!(
                    "Session '{}' now belongs to {}, leaving it registered",
                    key,
                    current.id()
                );
                false
            }
            None => false,
        }
    }

    async fn keys(&self) -> Vec<SessionKey> {
        let sessions = self.sessions.lock().await;
        let mut keys: Vec<SessionKey> = sessions.keys().copied().collect();
        keys.sort();
        keys
    }
}
