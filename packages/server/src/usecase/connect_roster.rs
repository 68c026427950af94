//! UseCase: ロスター接続の確立
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectRosterUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録後すぐに現在のロスターが 1 フレーム届く
//! - 異常系：userId の欠落・不正・未登録
//! - エッジケース：会話が無いユーザー（フレームなし、登録はされる）

use std::sync::Arc;

use crate::domain::{
    ChatRepository, SessionHandle, SessionKey, SessionRegistry, UserId, parse_roster_query,
};

use super::error::ConnectError;
use super::refresh_roster::{RefreshOutcome, RefreshRosterUseCase};

/// 確立済みのロスター接続
#[derive(Debug, Clone)]
pub struct RosterSession {
    pub user: UserId,
    pub key: SessionKey,
    pub handle: SessionHandle,
}

/// ロスター接続のユースケース
pub struct ConnectRosterUseCase {
    repository: Arc<dyn ChatRepository>,
    registry: Arc<dyn SessionRegistry>,
    refresh_roster: Arc<RefreshRosterUseCase>,
}

impl ConnectRosterUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        registry: Arc<dyn SessionRegistry>,
        refresh_roster: Arc<RefreshRosterUseCase>,
    ) -> Self {
        Self {
            repository,
            registry,
            refresh_roster,
        }
    }

    /// ロスター接続を検証・登録し、最初のロスターを送る
    pub async fn execute(
        &self,
        query: Option<&str>,
        handle: SessionHandle,
    ) -> Result<RosterSession, ConnectError> {
        let user = parse_roster_query(query).map_err(|_| ConnectError::InvalidUserId)?;
        if self.repository.find_user_by_id(user).await?.is_none() {
            return Err(ConnectError::InvalidUserId);
        }

        let key = SessionKey::roster(user);
        self.registry.put(key, handle.clone()).await;
        tracing::info!(%key, "Roster connected");

        self.push_initial(user, &handle).await;

        Ok(RosterSession { user, key, handle })
    }

    async fn push_initial(&self, user: UserId, handle: &SessionHandle) {
        match self.refresh_roster.push_to_handle(user, handle).await {
            Ok(RefreshOutcome::Pushed(entries)) => {
                tracing::debug!(%user, entries, "Initial roster pushed")
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(%user, "Failed to push initial roster: {}", e),
        }
    }
}
