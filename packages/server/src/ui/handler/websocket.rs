//! WebSocket connection handlers.
//!
//! Every connection splits its socket into a receive loop (inbound frames,
//! handled one at a time) and a pusher loop (drains the connection's channel
//! into the socket). When either ends, the other is aborted and the session
//! is unregistered.

use std::sync::Arc;

use axum::{
    extract::{
        RawQuery, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::Instrument;

use crate::{
    domain::{PushFrame, SessionHandle},
    ui::state::AppState,
    usecase::{ConversationSession, RosterSession, SendMessageError},
};

/// 1 フレーム（1 メッセージ）の最大サイズ
pub const MAX_FRAME_BYTES: usize = 128 * 1024;

/// `GET /websocket-chat?userId=<u>&recipientId=<r>`
pub async fn conversation_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    ws.max_message_size(MAX_FRAME_BYTES)
        .max_frame_size(MAX_FRAME_BYTES)
        .on_upgrade(move |socket| handle_conversation_socket(socket, state, query))
}

/// `GET /websocket-userlist?userId=<u>`
pub async fn roster_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    ws.max_message_size(MAX_FRAME_BYTES)
        .max_frame_size(MAX_FRAME_BYTES)
        .on_upgrade(move |socket| handle_roster_socket(socket, state, query))
}

fn close_message(reason: String) -> Message {
    Message::Close(Some(CloseFrame {
        code: close_code::NORMAL,
        reason: reason.into(),
    }))
}

/// Closes a socket that never got registered.
async fn reject(mut socket: WebSocket, reason: &str) {
    if let Err(e) = socket.send(close_message(reason.to_string())).await {
        tracing::debug!("Failed to send close frame: {}", e);
    }
}

/// Spawns a task that drains the connection's channel into the WebSocket sink.
///
/// `PushFrame::Close` sends a close frame with its reason and ends the loop.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<PushFrame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                PushFrame::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                PushFrame::Close(reason) => {
                    if let Err(e) = sender.send(close_message(reason)).await {
                        tracing::debug!("Failed to send close frame: {}", e);
                    }
                    break;
                }
            }
        }
    })
}

async fn handle_conversation_socket(socket: WebSocket, state: Arc<AppState>, query: Option<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = SessionHandle::new(tx);

    let connected = match state
        .connect_conversation_usecase
        .execute(query.as_deref(), handle)
        .await
    {
        Ok(connected) => connected,
        Err(e) => {
            tracing::warn!(query = ?query, "Rejected conversation connection: {}", e);
            reject(socket, e.close_reason()).await;
            return;
        }
    };
    let session: ConversationSession = connected.session;
    let span = tracing::info_span!("conversation", key = %session.key);

    let (sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_session = session.clone();
    let mut recv_task = tokio::spawn(
        async move {
            while let Some(msg) = receiver.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!("WebSocket error: {}", e);
                        break;
                    }
                };

                match msg {
                    Message::Text(text) => {
                        match recv_state
                            .send_message_usecase
                            .execute(&recv_session, text.to_string())
                            .await
                        {
                            Ok(_) => {}
                            Err(SendMessageError::EmptyContent) => {
                                tracing::debug!("Ignored blank message");
                            }
                            // エラーフレームと close は送信済み。pusher loop の終了を待つ
                            Err(SendMessageError::InvalidSender(user)) => {
                                tracing::warn!(%user, "Closing conversation of unknown sender");
                            }
                            Err(e) => tracing::error!("Failed to handle message: {}", e),
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Client requested close");
                        break;
                    }
                    _ => {}
                }
            }
        }
        .instrument(span),
    );

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_session_usecase
        .conversation(&session)
        .await;
}

async fn handle_roster_socket(socket: WebSocket, state: Arc<AppState>, query: Option<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = SessionHandle::new(tx);

    let session: RosterSession = match state
        .connect_roster_usecase
        .execute(query.as_deref(), handle)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(query = ?query, "Rejected roster connection: {}", e);
            reject(socket, e.close_reason()).await;
            return;
        }
    };
    let span = tracing::info_span!("roster", key = %session.key);

    let (sender, mut receiver) = socket.split();

    let recv_state = state.clone();
    let recv_session = session.clone();
    let mut recv_task = tokio::spawn(
        async move {
            while let Some(msg) = receiver.next().await {
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::warn!("WebSocket error: {}", e);
                        break;
                    }
                };

                match msg {
                    // 任意のテキストフレームは再送要求として扱う
                    Message::Text(_) => {
                        if let Err(e) = recv_state
                            .refresh_roster_usecase
                            .push_to_handle(recv_session.user, &recv_session.handle)
                            .await
                        {
                            tracing::error!("Failed to refresh roster: {}", e);
                        }
                    }
                    Message::Close(_) => {
                        tracing::info!("Client requested close");
                        break;
                    }
                    _ => {}
                }
            }
        }
        .instrument(span),
    );

    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_session_usecase.roster(session.user).await;
}
