//! Fixtures shared by the use case tests.

use std::sync::Arc;

use taiwa_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::domain::{
    ChatRepository, FrameEncoder, Message, MessageContent, NewMessage, PushFrame, SessionHandle,
    User, UserId,
};
use crate::infrastructure::dto::encoder::JsonFrameEncoder;
use crate::infrastructure::repository::InMemoryChatRepository;

pub fn user(id: i64) -> User {
    User {
        id: UserId::new(id),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        email: format!("user{id}@example.com"),
        phone_no: format!("090-0000-000{id}"),
        online_status: false,
    }
}

/// Store with users 1, 2 and 3 and a fixed clock.
pub fn seeded_repository() -> Arc<InMemoryChatRepository> {
    Arc::new(InMemoryChatRepository::with_users(
        vec![user(1), user(2), user(3)],
        Arc::new(FixedClock::new(1_000)),
    ))
}

pub fn encoder() -> Arc<dyn FrameEncoder> {
    Arc::new(JsonFrameEncoder)
}

pub async fn send(repo: &InMemoryChatRepository, from: i64, to: i64, text: &str) -> Message {
    repo.save_message(NewMessage::new(
        UserId::new(from),
        UserId::new(to),
        MessageContent::new(text.to_string()).unwrap(),
    ))
    .await
    .unwrap()
}

pub fn handle() -> (SessionHandle, mpsc::UnboundedReceiver<PushFrame>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SessionHandle::new(tx), rx)
}

/// Drains every frame already queued on the channel.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<PushFrame>) -> Vec<PushFrame> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

pub fn text_json(frame: &PushFrame) -> serde_json::Value {
    match frame {
        PushFrame::Text(text) => serde_json::from_str(text).unwrap(),
        PushFrame::Close(reason) => panic!("expected text frame, got close: {reason}"),
    }
}
