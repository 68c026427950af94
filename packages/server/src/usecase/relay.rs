//! Background follow-up work shared by the conversation use cases.
//!
//! Connect and send both finish with the same tail: clear the unread messages
//! the peer sent to the active user, then refresh the affected rosters. That
//! tail runs on its own task so the receive loop is never blocked by it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::domain::UserId;

use super::read_receipt::ReadReceiptUseCase;
use super::refresh_roster::RefreshRosterUseCase;

pub struct RelayOrchestrator {
    read_receipt: Arc<ReadReceiptUseCase>,
    refresh_roster: Arc<RefreshRosterUseCase>,
}

impl RelayOrchestrator {
    pub fn new(
        read_receipt: Arc<ReadReceiptUseCase>,
        refresh_roster: Arc<RefreshRosterUseCase>,
    ) -> Self {
        Self {
            read_receipt,
            refresh_roster,
        }
    }

    /// Marks `peer -> viewer` unread messages as read, then refreshes the
    /// rosters of `refresh_targets` in order.
    ///
    /// Failures are logged. The sweep failing does not stop the refresh.
    pub fn sweep_then_refresh(
        &self,
        peer: UserId,
        viewer: UserId,
        refresh_targets: Vec<UserId>,
    ) -> JoinHandle<()> {
        let read_receipt = self.read_receipt.clone();
        let refresh_roster = self.refresh_roster.clone();
        let span = tracing::debug_span!("relay_followup", %peer, %viewer);

        tokio::spawn(
            async move {
                if let Err(e) = read_receipt.execute(peer, viewer).await {
                    tracing::warn!("Read sweep failed: {}", e);
                }
                for target in refresh_targets {
                    if let Err(e) = refresh_roster.execute(target).await {
                        tracing::warn!(user = %target, "Roster refresh failed: {}", e);
                    }
                }
            }
            .instrument(span),
        )
    }
}
