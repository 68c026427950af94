//! UseCase: 接続の切断（セッション登録の解除）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::conversation() / roster()
//!
//! ### なぜこのテストが必要か
//! - 古い接続の切断が、同じキーで再接続した新しい接続を消さないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：自分の登録だけが消える
//! - エッジケース：既に上書きされている、二重に切断される

use std::sync::Arc;

use crate::domain::{SessionKey, SessionRegistry, UserId};

use super::connect_conversation::ConversationSession;

/// 切断のユースケース
pub struct DisconnectSessionUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl DisconnectSessionUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 会話接続の切断
    ///
    /// レジストリに残っているのがこの接続のハンドルの場合だけ削除する。
    pub async fn conversation(&self, session: &ConversationSession) -> bool {
        let removed = self
            .registry
            .remove_connection(&session.key, session.handle.id())
            .await;
        if removed {
            tracing::info!(key = %session.key, "Conversation disconnected");
        } else {
            tracing::debug!(key = %session.key, "Conversation already replaced or removed");
        }
        removed
    }

    /// ロスター接続の切断（キーを無条件に削除）
    pub async fn roster(&self, user: UserId) -> bool {
        let key = SessionKey::roster(user);
        let removed = self.registry.remove(&key).await.is_some();
        tracing::info!(%key, removed, "Roster disconnected");
        removed
    }
}
