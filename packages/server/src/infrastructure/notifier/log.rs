//! ログに残すだけの OfflineNotifier 実装

use async_trait::async_trait;

use crate::domain::{OfflineNotifier, User, UserId};

/// 相手がオフラインだったことをログに記録する
///
/// プッシュ通知の連携先が無い構成で使う。
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingOfflineNotifier;

#[async_trait]
impl OfflineNotifier for LoggingOfflineNotifier {
    async fn notify_offline(&self, recipient: UserId, sender: &User, preview: &str) {
        tracing::info!(
            recipient = %recipient,
            sender = %sender.id,
            "User {} is offline, would notify: {}: {}",
            recipient,
            sender.first_name,
            preview
        );
    }
}
