//! UseCase: メッセージ送信（永続化 → 配信 → 既読化 → ロスター更新）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 相手が接続中かどうかで既読フラグと配信先が変わる
//! - 送信者への送信確認、双方のロスター更新が漏れないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：相手が接続中（即時既読・相手へ配信）
//! - 正常系：相手が未接続（未読のまま保存・オフライン通知）
//! - 異常系：空白のみの本文、送信者の消失
//! - エッジケース：相手の接続が閉じている

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    ChatRepository, FrameEncoder, MessageContent, MessageId, NewMessage, OfflineNotifier,
    SessionRegistry,
};

use super::connect_conversation::ConversationSession;
use super::error::SendMessageError;
use super::read_receipt::ReadReceiptUseCase;
use super::relay::RelayOrchestrator;

/// オフライン通知に載せる本文の最大文字数
pub const OFFLINE_PREVIEW_CHARS: usize = 100;

/// 送信結果
pub struct SendReceipt {
    pub message_id: MessageId,
    /// 相手の会話接続へ配信できたか
    pub delivered_to_peer: bool,
    /// 逆方向の既読化と双方のロスター更新
    pub followup: JoinHandle<()>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
    registry: Arc<dyn SessionRegistry>,
    read_receipt: Arc<ReadReceiptUseCase>,
    orchestrator: Arc<RelayOrchestrator>,
    notifier: Arc<dyn OfflineNotifier>,
    encoder: Arc<dyn FrameEncoder>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        registry: Arc<dyn SessionRegistry>,
        read_receipt: Arc<ReadReceiptUseCase>,
        orchestrator: Arc<RelayOrchestrator>,
        notifier: Arc<dyn OfflineNotifier>,
        encoder: Arc<dyn FrameEncoder>,
    ) -> Self {
        Self {
            repository,
            registry,
            read_receipt,
            orchestrator,
            notifier,
            encoder,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信元の会話接続
    /// * `payload` - 受信したテキストフレームの本文
    ///
    /// # Returns
    ///
    /// * `Ok(SendReceipt)` - 永続化済み
    /// * `Err(SendMessageError::EmptyContent)` - 空白のみ。何もしていない
    /// * `Err(SendMessageError::InvalidSender)` - エラーフレームと close を送信済み
    pub async fn execute(
        &self,
        session: &ConversationSession,
        payload: String,
    ) -> Result<SendReceipt, SendMessageError> {
        let content = MessageContent::new(payload).map_err(|_| SendMessageError::EmptyContent)?;
        let (user, recipient) = (session.user, session.recipient);

        // 1. 送信者がまだ存在するか
        let Some(sender) = self.repository.find_user_by_id(user).await? else {
            tracing::warn!(%user, "Sender no longer exists, closing conversation");
            if let Err(e) = session.handle.send_text(format!("Invalid userId: {user}")) {
                tracing::debug!("Failed to send error frame: {}", e);
            }
            if let Err(e) = session.handle.close("invalid user") {
                tracing::debug!("Failed to close conversation: {}", e);
            }
            return Err(SendMessageError::InvalidSender(user));
        };

        // 2. 永続化
        let preview = content.preview(OFFLINE_PREVIEW_CHARS).to_string();
        let saved = self
            .repository
            .save_message(NewMessage::new(user, recipient, content))
            .await?;
        let message_id = saved.id;

        let hydrated = self
            .repository
            .find_message_by_id(message_id)
            .await?
            .ok_or(SendMessageError::MessageNotFound(message_id))?;
        let frame = self.encoder.encode_message(hydrated)?;

        // 3. 相手が同じ会話を開いていれば既読にしてから配信
        let delivered_to_peer = match session.key.reversed() {
            Some(peer_key) => match self.registry.get(&peer_key).await {
                Some(peer) if peer.is_open() => {
                    if let Err(e) = self.read_receipt.execute(user, recipient).await {
                        tracing::warn!(%peer_key, "Read sweep before delivery failed: {}", e);
                    }
                    match self.registry.push_to(&peer_key, &frame).await {
                        Ok(()) => true,
                        Err(e) => {
                            tracing::warn!(%peer_key, "Failed to deliver message: {}", e);
                            false
                        }
                    }
                }
                _ => false,
            },
            None => false,
        };
        if !delivered_to_peer {
            self.notifier
                .notify_offline(recipient, &sender, &preview)
                .await;
        }

        // 4. 送信者自身への送信確認
        if let Err(e) = session.handle.send_text(frame) {
            tracing::debug!(key = %session.key, "Failed to echo message to sender: {}", e);
        }

        // 5. 逆方向の既読化と双方のロスター更新
        let followup = self
            .orchestrator
            .sweep_then_refresh(recipient, user, vec![recipient, user]);

        tracing::info!(%message_id, %user, %recipient, delivered_to_peer, "Message sent");
        Ok(SendReceipt {
            message_id,
            delivered_to_peer,
            followup,
        })
    }
}
