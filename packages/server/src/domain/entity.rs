//! Entities
//!
//! ストアが所有するレコード（User, Message）と、ロスター表示用に
//! 毎回計算し直す派生ビュー（RosterEntry）。

use std::cmp::Ordering;

use super::value_object::{MessageContent, MessageId, Timestamp, UserId};

/// ユーザーレコード（表示用フィールドとオンライン状態）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_no: String,
    pub online_status: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 永続化前のメッセージ
///
/// id と timestamp は保存時にストアが割り当てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: UserId,
    pub recipient: UserId,
    pub content: MessageContent,
}

impl NewMessage {
    pub fn new(sender: UserId, recipient: UserId, content: MessageContent) -> Self {
        Self {
            sender,
            recipient,
            content,
        }
    }
}

/// 永続化済みのメッセージ
///
/// `read` は false → true にしか変化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: UserId,
    pub recipient: UserId,
    pub content: MessageContent,
    pub timestamp: Timestamp,
    pub read: bool,
}

impl Message {
    /// Whether this message belongs to the (unordered) pair `a`/`b`.
    pub fn is_between(&self, a: UserId, b: UserId) -> bool {
        (self.sender == a && self.recipient == b) || (self.sender == b && self.recipient == a)
    }

    /// The other participant of this message as seen from `viewer`.
    pub fn counterpart_of(&self, viewer: UserId) -> Option<UserId> {
        if self.sender == viewer {
            Some(self.recipient)
        } else if self.recipient == viewer {
            Some(self.sender)
        } else {
            None
        }
    }

    /// Ordering used to pick the most recent message of a conversation.
    pub fn recency_cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then(self.id.cmp(&other.id))
    }
}

/// 送信者の表示用フィールドを結合したメッセージ（配信フレームの元データ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydratedMessage {
    pub message: Message,
    pub sender: User,
}

/// ロスター計算の入力: 会話相手と、その相手との最新メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterPeer {
    pub peer: User,
    pub last_message: Message,
}

/// 会話一覧の 1 行（派生ビュー、永続化しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// 一覧を見ているユーザー
    pub viewer: UserId,
    pub peer: User,
    pub last_message: MessageContent,
    pub last_timestamp: Timestamp,
    pub last_read: bool,
    pub unread_count: u64,
}

impl RosterEntry {
    pub fn new(viewer: UserId, peer: RosterPeer, last_read: bool, unread_count: u64) -> Self {
        Self {
            viewer,
            peer: peer.peer,
            last_message: peer.last_message.content,
            last_timestamp: peer.last_message.timestamp,
            last_read,
            unread_count,
        }
    }
}

/// `lastRead` の判定
///
/// 最新メッセージを閲覧者自身が送った場合は true、相手が送った場合はその既読フラグ。
pub fn last_read_for(viewer: UserId, last_message: &Message) -> bool {
    if last_message.sender == viewer {
        true
    } else {
        last_message.read
    }
}

/// 最新メッセージの新しい順に並べる（同時刻は相手の ID 順）
pub fn sort_roster(entries: &mut [RosterEntry]) {
    entries.sort_by(|a, b| {
        b.last_timestamp
            .cmp(&a.last_timestamp)
            .then(a.peer.id.cmp(&b.peer.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, sender: i64, recipient: i64, timestamp: i64, read: bool) -> Message {
        Message {
            id: MessageId::new(id),
            sender: UserId::new(sender),
            recipient: UserId::new(recipient),
            content: MessageContent::new(format!("message {}", id)).unwrap(),
            timestamp: Timestamp::new(timestamp),
            read,
        }
    }

    fn user(id: i64) -> User {
        User {
            id: UserId::new(id),
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            email: format!("user{}@example.com", id),
            phone_no: format!("0900000000{}", id),
            online_status: false,
        }
    }

    #[test]
    fn test_last_read_is_true_when_viewer_sent_last() {
        // テスト項目: 最新メッセージを閲覧者が送った場合、未読でも lastRead は true
        // given (前提条件):
        let last = message(1, 1, 2, 1000, false);

        // when (操作):
        let result = last_read_for(UserId::new(1), &last);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_last_read_follows_read_flag_when_peer_sent_last() {
        // テスト項目: 最新メッセージを相手が送った場合、lastRead は既読フラグに従う
        // given (前提条件):
        let unread = message(1, 2, 1, 1000, false);
        let read = message(2, 2, 1, 2000, true);

        // when (操作):
        let unread_result = last_read_for(UserId::new(1), &unread);
        let read_result = last_read_for(UserId::new(1), &read);

        // then (期待する結果):
        assert!(!unread_result);
        assert!(read_result);
    }

    #[test]
    fn test_counterpart_of() {
        // テスト項目: 閲覧者から見た相手の ID が得られ、無関係なユーザーには None
        // given (前提条件):
        let msg = message(1, 1, 2, 1000, false);

        // when (操作) / then (期待する結果):
        assert_eq!(msg.counterpart_of(UserId::new(1)), Some(UserId::new(2)));
        assert_eq!(msg.counterpart_of(UserId::new(2)), Some(UserId::new(1)));
        assert_eq!(msg.counterpart_of(UserId::new(3)), None);
        assert!(msg.is_between(UserId::new(2), UserId::new(1)));
    }

    #[test]
    fn test_sort_roster_orders_by_last_timestamp_desc() {
        // テスト項目: ロスターが最新メッセージの新しい順に並ぶ
        // given (前提条件):
        let viewer = UserId::new(1);
        let mut entries = vec![
            RosterEntry::new(
                viewer,
                RosterPeer {
                    peer: user(2),
                    last_message: message(1, 2, 1, 1000, false),
                },
                false,
                1,
            ),
            RosterEntry::new(
                viewer,
                RosterPeer {
                    peer: user(3),
                    last_message: message(2, 1, 3, 3000, false),
                },
                true,
                0,
            ),
            RosterEntry::new(
                viewer,
                RosterPeer {
                    peer: user(4),
                    last_message: message(3, 4, 1, 2000, true),
                },
                true,
                0,
            ),
        ];

        // when (操作):
        sort_roster(&mut entries);

        // then (期待する結果):
        let order: Vec<i64> = entries.iter().map(|e| e.peer.id.value()).collect();
        assert_eq!(order, vec![3, 4, 2]);
    }
}
