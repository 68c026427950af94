//! UseCase: 既読化（read-receipt sweep）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReadReceiptUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：sender → recipient 方向の未読だけが既読になる
//! - エッジケース：未読が無い場合は 0 件
//! - 異常系：ストア障害はそのまま呼び出し元へ返す

use std::sync::Arc;

use crate::domain::{ChatRepository, MessageId, RepositoryError, UserId};

/// 未読メッセージを既読にするユースケース
pub struct ReadReceiptUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl ReadReceiptUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// `sender` から `recipient` 宛ての未読メッセージをすべて既読にする
    ///
    /// 既読に変わった件数を返す。
    pub async fn execute(&self, sender: UserId, recipient: UserId) -> Result<usize, RepositoryError> {
        let unread = self.repository.find_unread(sender, recipient).await?;
        if unread.is_empty() {
            return Ok(0);
        }

        let ids: Vec<MessageId> = unread.iter().map(|message| message.id).collect();
        let flipped = self.repository.mark_read(ids).await?;
        tracing::debug!(%sender, %recipient, flipped, "Marked messages as read");
        Ok(flipped)
    }
}
