//! UseCase: 会話接続の確立
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectConversationUseCase::execute() メソッド
//! - ハンドシェイク検証、セッション登録、接続時の既読化とロスター送信
//!
//! ### なぜこのテストが必要か
//! - 検証順序によって close 理由が変わるため、順序を固定する
//! - 不正な接続がレジストリに残らないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：userId_recipientId で登録され、相手からの未読が既読になる
//! - 異常系：userId / recipientId の欠落・不正・未登録、自分自身との会話
//! - エッジケース：同じキーでの再接続は新しいハンドルで上書き

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    ChatRepository, HandshakeError, SessionHandle, SessionKey, SessionRegistry, UserId,
    parse_conversation_query,
};

use super::error::ConnectError;
use super::relay::RelayOrchestrator;

/// 確立済みの会話接続
///
/// ハンドラーが接続の間ずっと保持し、送信・切断に渡す。
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub user: UserId,
    pub recipient: UserId,
    pub key: SessionKey,
    /// この接続自身のハンドル（送信確認の宛先）
    pub handle: SessionHandle,
}

/// 接続確立の結果
pub struct ConnectedConversation {
    pub session: ConversationSession,
    /// 接続時の既読化とロスター送信
    pub followup: JoinHandle<()>,
}

/// 会話接続のユースケース
pub struct ConnectConversationUseCase {
    repository: Arc<dyn ChatRepository>,
    registry: Arc<dyn SessionRegistry>,
    orchestrator: Arc<RelayOrchestrator>,
}

impl ConnectConversationUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        registry: Arc<dyn SessionRegistry>,
        orchestrator: Arc<RelayOrchestrator>,
    ) -> Self {
        Self {
            repository,
            registry,
            orchestrator,
        }
    }

    /// 会話接続を検証して登録する
    ///
    /// # Arguments
    ///
    /// * `query` - 接続 URL の生のクエリ文字列（`userId=..&recipientId=..`）
    /// * `handle` - この接続へのプッシュ用ハンドル
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectedConversation)` - 登録済み。既読化とロスター送信はバックグラウンドで進む
    /// * `Err(ConnectError)` - 検証失敗。何も登録されていない
    pub async fn execute(
        &self,
        query: Option<&str>,
        handle: SessionHandle,
    ) -> Result<ConnectedConversation, ConnectError> {
        // 1. クエリの解析（位置ベース）
        let params = parse_conversation_query(query).map_err(|e| match e {
            HandshakeError::InvalidUserId => ConnectError::InvalidUserId,
            HandshakeError::InvalidRecipientId => ConnectError::InvalidRecipientId,
        })?;
        let (user, recipient) = (params.user, params.recipient);

        // 2. 自分自身との会話は存在確認より先に弾く
        if user == recipient {
            return Err(ConnectError::SameParticipant);
        }

        // 3. 両ユーザーの存在確認
        if self.repository.find_user_by_id(user).await?.is_none() {
            return Err(ConnectError::InvalidUserId);
        }
        if self.repository.find_user_by_id(recipient).await?.is_none() {
            return Err(ConnectError::InvalidRecipientId);
        }

        // 4. セッション登録（同じキーの古いハンドルは上書き）
        let key = SessionKey::conversation(user, recipient);
        if let Some(previous) = self.registry.put(key, handle.clone()).await {
            tracing::info!(%key, previous = %previous.id(), "Replaced existing conversation session");
        }

        match self.repository.count_unread_for_recipient(user).await {
            Ok(total) => tracing::info!(%key, unread_total = total, "Conversation connected"),
            Err(e) => tracing::warn!(%key, "Failed to count unread messages: {}", e),
        }

        // 5. 相手からの未読を既読にしてから自分のロスターを更新
        let followup = self
            .orchestrator
            .sweep_then_refresh(recipient, user, vec![user]);

        Ok(ConnectedConversation {
            session: ConversationSession {
                user,
                recipient,
                key,
                handle,
            },
            followup,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockChatRepository, RepositoryError};
    use crate::infrastructure::session_registry::WebSocketSessionRegistry;
    use crate::usecase::read_receipt::ReadReceiptUseCase;
    use crate::usecase::refresh_roster::RefreshRosterUseCase;
    use crate::usecase::test_support::{drain, encoder, handle, seeded_repository, send, text_json};

    fn build(
        repo: Arc<dyn ChatRepository>,
        registry: Arc<WebSocketSessionRegistry>,
    ) -> ConnectConversationUseCase {
        let orchestrator = Arc::new(RelayOrchestrator::new(
            Arc::new(ReadReceiptUseCase::new(repo.clone())),
            Arc::new(RefreshRosterUseCase::new(
                repo.clone(),
                registry.clone(),
                encoder(),
            )),
        ));
        ConnectConversationUseCase::new(repo, registry, orchestrator)
    }

    #[tokio::test]
    async fn test_execute_registers_and_clears_unread() {
        // テスト項目: 登録後、相手からの未読が既読になりロスターが送られる
        // given (前提条件):
        let repo = seeded_repository();
        send(&repo, 2, 1, "x").await;
        send(&repo, 2, 1, "y").await;
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let (roster_handle, mut roster_rx) = handle();
        registry
            .put(SessionKey::roster(UserId::new(1)), roster_handle)
            .await;
        let usecase = build(repo.clone(), registry.clone());
        let (conversation_handle, _rx) = handle();

        // when (操作):
        let connected = usecase
            .execute(Some("userId=1&recipientId=2"), conversation_handle)
            .await
            .unwrap();
        connected.followup.await.unwrap();

        // then (期待する結果):
        let key = SessionKey::conversation(UserId::new(1), UserId::new(2));
        assert_eq!(connected.session.key, key);
        assert!(registry.get(&key).await.is_some());
        assert_eq!(
            repo.count_unread(UserId::new(2), UserId::new(1)).await.unwrap(),
            0
        );
        let frames = drain(&mut roster_rx);
        assert_eq!(frames.len(), 1);
        assert_eq!(text_json(&frames[0])[0]["unreadCount"], 0);
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_handshakes() {
        // テスト項目: 不正なハンドシェイクは登録せずに close 理由付きで失敗する
        // given (前提条件):
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let usecase = build(seeded_repository(), registry.clone());
        let cases = [
            (None, ConnectError::InvalidUserId),
            (Some("userId=abc&recipientId=2"), ConnectError::InvalidUserId),
            (Some("userId=1"), ConnectError::InvalidRecipientId),
            (Some("userId=1&recipientId=x"), ConnectError::InvalidRecipientId),
            (Some("userId=99&recipientId=2"), ConnectError::InvalidUserId),
            (Some("userId=1&recipientId=99"), ConnectError::InvalidRecipientId),
            (Some("userId=1&recipientId=1"), ConnectError::SameParticipant),
            // 自分自身の判定は存在確認より先
            (Some("userId=99&recipientId=99"), ConnectError::SameParticipant),
        ];

        for (query, expected) in cases {
            // when (操作):
            let (conversation_handle, _rx) = handle();
            let result = usecase.execute(query, conversation_handle).await;

            // then (期待する結果):
            assert_eq!(result.err(), Some(expected), "query: {query:?}");
        }
        assert!(registry.keys().await.is_empty());
    }

    #[tokio::test]
    async fn test_execute_reconnect_overwrites_handle() {
        // テスト項目: 同じキーで再接続すると新しいハンドルが登録される
        // given (前提条件):
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let usecase = build(seeded_repository(), registry.clone());
        let (first, _rx1) = handle();
        let (second, _rx2) = handle();
        let second_id = second.id();

        // when (操作):
        usecase
            .execute(Some("userId=1&recipientId=2"), first)
            .await
            .unwrap();
        usecase
            .execute(Some("userId=1&recipientId=2"), second)
            .await
            .unwrap();

        // then (期待する結果):
        let key = SessionKey::conversation(UserId::new(1), UserId::new(2));
        assert_eq!(registry.get(&key).await.unwrap().id(), second_id);
        assert_eq!(registry.keys().await, vec![key]);
    }

    #[tokio::test]
    async fn test_execute_storage_failure_is_internal_error() {
        // テスト項目: ユーザー検索の障害は内部エラーになり登録されない
        // given (前提条件):
        let mut mock = MockChatRepository::new();
        mock.expect_find_user_by_id()
            .returning(|_| Err(RepositoryError::Storage("unavailable".to_string())));
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let usecase = build(Arc::new(mock), registry.clone());
        let (conversation_handle, _rx) = handle();

        // when (操作):
        let err = usecase
            .execute(Some("userId=1&recipientId=2"), conversation_handle)
            .await
            .err()
            .unwrap();

        // then (期待する結果):
        assert_eq!(err.close_reason(), "Internal server error");
        assert!(registry.keys().await.is_empty());
    }
}
