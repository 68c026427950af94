//! Repository trait 定義
//!
//! チャットメッセージとユーザーを永続化するストアへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各操作はストア境界でトランザクション安全であることを前提とし、
//! 複数の操作をまたぐアプリケーションレベルのトランザクションは張らない。

use async_trait::async_trait;

use super::{
    HydratedMessage, Message, MessageId, NewMessage, RepositoryError, RosterPeer, User, UserId,
};

/// Chat Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// メッセージを保存する。id と timestamp はストアが割り当てる
    async fn save_message(&self, message: NewMessage) -> Result<Message, RepositoryError>;

    /// `sender` から `recipient` 宛ての未読メッセージを取得
    async fn find_unread(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<Vec<Message>, RepositoryError>;

    /// メッセージを既読にする（false → true のみ）。実際に既読へ変わった件数を返す
    async fn mark_read(&self, ids: Vec<MessageId>) -> Result<usize, RepositoryError>;

    /// `sender` から `recipient` 宛ての未読件数
    async fn count_unread(&self, sender: UserId, recipient: UserId)
    -> Result<u64, RepositoryError>;

    /// `recipient` 宛ての全相手からの未読件数
    async fn count_unread_for_recipient(&self, recipient: UserId) -> Result<u64, RepositoryError>;

    /// `viewer` と `peer` の最新メッセージについての lastRead 判定
    ///
    /// メッセージが 1 件も無い場合は true。
    async fn last_read_flag(&self, viewer: UserId, peer: UserId) -> Result<bool, RepositoryError>;

    /// `user` と 1 件以上メッセージをやり取りした相手と、それぞれの最新メッセージ
    async fn find_roster_peers(&self, user: UserId) -> Result<Vec<RosterPeer>, RepositoryError>;

    /// ID でユーザーを取得
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// ID でメッセージを取得し、送信者の表示用フィールドを結合して返す
    async fn find_message_by_id(
        &self,
        id: MessageId,
    ) -> Result<Option<HydratedMessage>, RepositoryError>;

    /// 2 人の間のメッセージ履歴（向きを問わず、時刻順）
    async fn find_chat_history(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, RepositoryError>;
}
