//! UseCase: ロスター（会話一覧）の再計算と送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RefreshRosterUseCase::build_roster() / push_to_handle() / execute()
//!
//! ### なぜこのテストが必要か
//! - 未読数・lastRead・並び順はクライアント表示の根拠になる
//! - ロスター接続が無い場合は何もしないこと（no-op）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：相手ごとの最新メッセージと未読数を新しい順に送る
//! - エッジケース：会話が一件も無い場合はフレームを送らない
//! - エッジケース：ロスター接続が無い・閉じている
//! - 異常系：ストア障害

use std::sync::Arc;

use crate::domain::{
    ChatRepository, FrameEncoder, RosterEntry, SessionHandle, SessionKey, SessionRegistry, UserId,
    sort_roster,
};

use super::error::RefreshRosterError;

/// ロスター送信の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// `n` 件のエントリを 1 フレームで送った
    Pushed(usize),
    /// 会話が無いので送らなかった
    Empty,
    /// ロスター接続が無い、または閉じている
    NoSession,
}

/// ロスター再計算のユースケース
pub struct RefreshRosterUseCase {
    repository: Arc<dyn ChatRepository>,
    registry: Arc<dyn SessionRegistry>,
    encoder: Arc<dyn FrameEncoder>,
}

impl RefreshRosterUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        registry: Arc<dyn SessionRegistry>,
        encoder: Arc<dyn FrameEncoder>,
    ) -> Self {
        Self {
            repository,
            registry,
            encoder,
        }
    }

    /// `viewer` のロスターを計算する
    ///
    /// 会話相手ごとに 1 エントリ。最新メッセージの新しい順、同時刻は相手 ID 順。
    pub async fn build_roster(&self, viewer: UserId) -> Result<Vec<RosterEntry>, RefreshRosterError> {
        let peers = self.repository.find_roster_peers(viewer).await?;

        let mut entries = Vec::with_capacity(peers.len());
        for peer in peers {
            let peer_id = peer.peer.id;
            let last_read = self.repository.last_read_flag(viewer, peer_id).await?;
            let unread_count = self.repository.count_unread(peer_id, viewer).await?;
            entries.push(RosterEntry::new(viewer, peer, last_read, unread_count));
        }

        sort_roster(&mut entries);
        Ok(entries)
    }

    /// ロスターを計算して指定のハンドルへ送る
    pub async fn push_to_handle(
        &self,
        viewer: UserId,
        handle: &SessionHandle,
    ) -> Result<RefreshOutcome, RefreshRosterError> {
        let entries = self.build_roster(viewer).await?;
        if entries.is_empty() {
            tracing::debug!(%viewer, "Roster is empty, nothing to push");
            return Ok(RefreshOutcome::Empty);
        }

        let count = entries.len();
        let frame = self.encoder.encode_roster(entries)?;
        handle.send_text(frame)?;

        tracing::debug!(%viewer, entries = count, "Pushed roster");
        Ok(RefreshOutcome::Pushed(count))
    }

    /// `viewer` のロスター接続へ最新のロスターを送る
    ///
    /// ロスター接続が登録されていない、または閉じている場合は何もしない。
    pub async fn execute(&self, viewer: UserId) -> Result<RefreshOutcome, RefreshRosterError> {
        match self.registry.get(&SessionKey::roster(viewer)).await {
            Some(handle) if handle.is_open() => self.push_to_handle(viewer, &handle).await,
            _ => Ok(RefreshOutcome::NoSession),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockChatRepository, PushFrame, RepositoryError};
    use crate::infrastructure::session_registry::WebSocketSessionRegistry;
    use crate::usecase::test_support::{drain, encoder, handle, seeded_repository, send, text_json};
    use serde_json::json;

    #[tokio::test]
    async fn test_build_roster_orders_by_latest_message() {
        // テスト項目: 相手ごとの最新メッセージ・未読数・lastRead を新しい順に返す
        // given (前提条件):
        let repo = seeded_repository();
        send(&repo, 2, 1, "from two").await;
        send(&repo, 1, 3, "to three").await;
        send(&repo, 2, 1, "two again").await;
        let usecase = RefreshRosterUseCase::new(
            repo.clone(),
            Arc::new(WebSocketSessionRegistry::new()),
            encoder(),
        );

        // when (操作):
        let roster = usecase.build_roster(UserId::new(1)).await.unwrap();

        // then (期待する結果):
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].peer.id, UserId::new(2));
        assert_eq!(roster[0].last_message.as_str(), "two again");
        assert_eq!(roster[0].unread_count, 2);
        assert!(!roster[0].last_read);
        assert_eq!(roster[1].peer.id, UserId::new(3));
        assert_eq!(roster[1].unread_count, 0);
        // 自分が送った最新メッセージは既読扱い
        assert!(roster[1].last_read);
    }

    #[tokio::test]
    async fn test_execute_pushes_one_json_array_frame() {
        // テスト項目: ロスター接続へ JSON 配列 1 フレームを送る
        // given (前提条件):
        let repo = seeded_repository();
        send(&repo, 2, 1, "hello").await;
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let (roster_handle, mut rx) = handle();
        registry
            .put(SessionKey::roster(UserId::new(1)), roster_handle)
            .await;
        let usecase = RefreshRosterUseCase::new(repo, registry, encoder());

        // when (操作):
        let outcome = usecase.execute(UserId::new(1)).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, RefreshOutcome::Pushed(1));
        let frames = drain(&mut rx);
        assert_eq!(frames.len(), 1);
        let body = text_json(&frames[0]);
        assert_eq!(body[0]["recipientId"], json!(2));
        assert_eq!(body[0]["senderId"], json!(1));
        assert_eq!(body[0]["lastMessage"], json!("hello"));
        assert_eq!(body[0]["unreadCount"], json!(1));
        assert_eq!(body[0]["lastRead"], json!(false));
    }

    #[tokio::test]
    async fn test_execute_without_session_is_noop() {
        // テスト項目: ロスター接続が無い場合は何もしない
        // given (前提条件):
        let repo = seeded_repository();
        send(&repo, 2, 1, "hello").await;
        let usecase = RefreshRosterUseCase::new(
            repo,
            Arc::new(WebSocketSessionRegistry::new()),
            encoder(),
        );

        // when (操作):
        let outcome = usecase.execute(UserId::new(1)).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, RefreshOutcome::NoSession);
    }

    #[tokio::test]
    async fn test_execute_with_closed_session_is_noop() {
        // テスト項目: 閉じたロスター接続には送らない
        // given (前提条件):
        let repo = seeded_repository();
        send(&repo, 2, 1, "hello").await;
        let registry = Arc::new(WebSocketSessionRegistry::new());
        let (roster_handle, rx) = handle();
        registry
            .put(SessionKey::roster(UserId::new(1)), roster_handle)
            .await;
        drop(rx);
        let usecase = RefreshRosterUseCase::new(repo, registry, encoder());

        // when (操作):
        let outcome = usecase.execute(UserId::new(1)).await.unwrap();

        // then (期待する結果):
        assert_eq!(outcome, RefreshOutcome::NoSession);
    }

    #[tokio::test]
    async fn test_push_to_handle_skips_empty_roster() {
        // テスト項目: 会話が無いユーザーにはフレームを送らない
        // given (前提条件):
        let usecase = RefreshRosterUseCase::new(
            seeded_repository(),
            Arc::new(WebSocketSessionRegistry::new()),
            encoder(),
        );
        let (roster_handle, mut rx) = handle();

        // when (操作):
        let outcome = usecase
            .push_to_handle(UserId::new(3), &roster_handle)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(outcome, RefreshOutcome::Empty);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_push_to_handle_reports_storage_failure() {
        // テスト項目: ストア障害時はフレームを送らずにエラーを返す
        // given (前提条件):
        let mut mock = MockChatRepository::new();
        mock.expect_find_roster_peers()
            .returning(|_| Err(RepositoryError::Storage("timeout".to_string())));
        let usecase = RefreshRosterUseCase::new(
            Arc::new(mock),
            Arc::new(WebSocketSessionRegistry::new()),
            encoder(),
        );
        let (roster_handle, mut rx) = handle();

        // when (操作):
        let result = usecase.push_to_handle(UserId::new(1), &roster_handle).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RefreshRosterError::Repository(RepositoryError::Storage(
                "timeout".to_string()
            )))
        );
        let frames: Vec<PushFrame> = drain(&mut rx);
        assert!(frames.is_empty());
    }
}
