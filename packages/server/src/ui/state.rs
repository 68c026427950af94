//! Shared application state.

use std::sync::Arc;

use crate::domain::{ChatRepository, FrameEncoder, OfflineNotifier, SessionRegistry};
use crate::usecase::{
    ConnectConversationUseCase, ConnectRosterUseCase, DisconnectSessionUseCase,
    ListSessionsUseCase, ReadReceiptUseCase, RefreshRosterUseCase, RelayOrchestrator,
    SendMessageUseCase,
};

/// Use cases reachable from the handlers
pub struct AppState {
    /// ConnectConversationUseCase（会話接続のユースケース）
    pub connect_conversation_usecase: Arc<ConnectConversationUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ConnectRosterUseCase（ロスター接続のユースケース）
    pub connect_roster_usecase: Arc<ConnectRosterUseCase>,
    /// RefreshRosterUseCase（ロスター再送のユースケース）
    pub refresh_roster_usecase: Arc<RefreshRosterUseCase>,
    /// DisconnectSessionUseCase（切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ListSessionsUseCase（セッション一覧のユースケース）
    pub list_sessions_usecase: Arc<ListSessionsUseCase>,
}

impl AppState {
    /// Builds every use case on top of the given infrastructure.
    ///
    /// Order: ReadReceipt → RefreshRoster → RelayOrchestrator → the rest.
    pub fn wire(
        repository: Arc<dyn ChatRepository>,
        registry: Arc<dyn SessionRegistry>,
        notifier: Arc<dyn OfflineNotifier>,
        encoder: Arc<dyn FrameEncoder>,
    ) -> Self {
        let read_receipt = Arc::new(ReadReceiptUseCase::new(repository.clone()));
        let refresh_roster = Arc::new(RefreshRosterUseCase::new(
            repository.clone(),
            registry.clone(),
            encoder.clone(),
        ));
        let orchestrator = Arc::new(RelayOrchestrator::new(
            read_receipt.clone(),
            refresh_roster.clone(),
        ));

        Self {
            connect_conversation_usecase: Arc::new(ConnectConversationUseCase::new(
                repository.clone(),
                registry.clone(),
                orchestrator.clone(),
            )),
            send_message_usecase: Arc::new(SendMessageUseCase::new(
                repository.clone(),
                registry.clone(),
                read_receipt,
                orchestrator,
                notifier,
                encoder,
            )),
            connect_roster_usecase: Arc::new(ConnectRosterUseCase::new(
                repository,
                registry.clone(),
                refresh_roster.clone(),
            )),
            refresh_roster_usecase: refresh_roster,
            disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(registry.clone())),
            list_sessions_usecase: Arc::new(ListSessionsUseCase::new(registry)),
        }
    }
}
