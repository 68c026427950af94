//! UseCase: 登録済みセッションの一覧（デバッグ用）

use std::sync::Arc;

use crate::domain::{SessionKey, SessionRegistry};

/// セッション一覧取得のユースケース
pub struct ListSessionsUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl ListSessionsUseCase {
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 登録済みのキーをソート済みで返す
    pub async fn execute(&self) -> Vec<SessionKey> {
        self.registry.keys().await
    }
}
