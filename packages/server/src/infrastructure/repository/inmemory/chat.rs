//! InMemory Chat Repository 実装
//!
//! ドメイン層が定義する ChatRepository trait の具体的な実装。
//! ユーザーとメッセージを Mutex で守った HashMap / Vec に保持します。
//!
//! メッセージ ID は 1 から順に採番し、タイムスタンプは注入された Clock から取得したうえで
//! ストア内で単調増加になるよう補正します（同じミリ秒に 2 件保存しても順序が決まる）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use taiwa_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    ChatRepository, HydratedMessage, Message, MessageId, NewMessage, RepositoryError, RosterPeer,
    Timestamp, User, UserId, last_read_for,
};

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    messages: Vec<Message>,
    next_id: i64,
    last_timestamp: i64,
}

impl StoreState {
    fn next_timestamp(&mut self, now: i64) -> Timestamp {
        let timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp = timestamp;
        Timestamp::new(timestamp)
    }

    fn latest_between(&self, a: UserId, b: UserId) -> Option<&Message> {
        self.messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .max_by(|x, y| x.recency_cmp(y))
    }
}

/// インメモリ Chat Repository 実装
pub struct InMemoryChatRepository {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChatRepository {
    /// ユーザーを登録済みの状態で作成
    pub fn with_users(users: impl IntoIterator<Item = User>, clock: Arc<dyn Clock>) -> Self {
        let users = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            state: Mutex::new(StoreState {
                users,
                next_id: 1,
                ..StoreState::default()
            }),
            clock,
        }
    }

    /// 保存済みメッセージ数
    pub async fn count_messages(&self) -> usize {
        self.state.lock().await.messages.len()
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn save_message(&self, message: NewMessage) -> Result<Message, RepositoryError> {
        let now = self.clock.now_millis();
        let mut state = self.state.lock().await;

        let id = MessageId::new(state.next_id);
        state.next_id += 1;
        let timestamp = state.next_timestamp(now);

        let saved = Message {
            id,
            sender: message.sender,
            recipient: message.recipient,
            content: message.content,
            timestamp,
            read: false,
        };
        state.messages.push(saved.clone());
        tracing::debug!(
            "Saved message {} ({} -> {})",
            saved.id,
            saved.sender,
            saved.recipient
        );
        Ok(saved)
    }

    async fn find_unread(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.sender == sender && m.recipient == recipient && !m.read)
            .cloned()
            .collect())
    }

    async fn mark_read(&self, ids: Vec<MessageId>) -> Result<usize, RepositoryError> {
        let mut state = self.state.lock().await;
        let mut flipped = 0;
        for message in state.messages.iter_mut() {
            if !message.read && ids.contains(&message.id) {
                message.read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn count_unread(
        &self,
        sender: UserId,
        recipient: UserId,
    ) -> Result<u64, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.sender == sender && m.recipient == recipient && !m.read)
            .count() as u64)
    }

    async fn count_unread_for_recipient(&self, recipient: UserId) -> Result<u64, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.recipient == recipient && !m.read)
            .count() as u64)
    }

    async fn last_read_flag(&self, viewer: UserId, peer: UserId) -> Result<bool, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .latest_between(viewer, peer)
            .map(|last| last_read_for(viewer, last))
            .unwrap_or(true))
    }

    async fn find_roster_peers(&self, user: UserId) -> Result<Vec<RosterPeer>, RepositoryError> {
        let state = self.state.lock().await;

        let mut latest: HashMap<UserId, &Message> = HashMap::new();
        for message in &state.messages {
            let Some(peer) = message.counterpart_of(user) else {
                continue;
            };
            if peer == user {
                continue;
            }
            latest
                .entry(peer)
                .and_modify(|current| {
                    if message.recency_cmp(current).is_gt() {
                        *current = message;
                    }
                })
                .or_insert(message);
        }

        // Peers without a user record are skipped, like an inner join on users.
        let mut peers: Vec<RosterPeer> = latest
            .into_iter()
            .filter_map(|(peer, last)| {
                state.users.get(&peer).map(|u| RosterPeer {
                    peer: u.clone(),
                    last_message: last.clone(),
                })
            })
            .collect();
        peers.sort_by(|a, b| b.last_message.recency_cmp(&a.last_message));
        Ok(peers)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_message_by_id(
        &self,
        id: MessageId,
    ) -> Result<Option<HydratedMessage>, RepositoryError> {
        let state = self.state.lock().await;
        let Some(message) = state.messages.iter().find(|m| m.id == id) else {
            return Ok(None);
        };
        let sender = state
            .users
            .get(&message.sender)
            .cloned()
            .ok_or_else(|| RepositoryError::UserNotFound(message.sender.to_string()))?;
        Ok(Some(HydratedMessage {
            message: message.clone(),
            sender,
        }))
    }

    async fn find_chat_history(
        &self,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let state = self.state.lock().await;
        let mut history: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| m.is_between(a, b))
            .cloned()
            .collect();
        history.sort_by(|x, y| x.recency_cmp(y));
        Ok(history)
    }
}
