//! 相手がオフラインのときの通知の拡張ポイント

use async_trait::async_trait;

use super::{User, UserId};

/// 相手の会話接続が開いていないときに呼ばれる通知先
///
/// 実装はプッシュ通知サービスなどに橋渡しする。失敗はログに残して握りつぶすこと。
#[async_trait]
pub trait OfflineNotifier: Send + Sync {
    /// `preview` は本文を先頭から切り詰めたもの
    async fn notify_offline(&self, recipient: UserId, sender: &User, preview: &str);
}
