//! JSON implementation of the domain `FrameEncoder`.

use crate::domain::{FrameEncodeError, FrameEncoder, HydratedMessage, RosterEntry};
use crate::infrastructure::dto::websocket as dto;

/// Encodes frames as JSON through the websocket DTOs
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFrameEncoder;

impl FrameEncoder for JsonFrameEncoder {
    fn encode_message(&self, message: HydratedMessage) -> Result<String, FrameEncodeError> {
        serde_json::to_string(&dto::ConversationMessageDto::from(message))
            .map_err(|e| FrameEncodeError(e.to_string()))
    }

    fn encode_roster(&self, entries: Vec<RosterEntry>) -> Result<String, FrameEncodeError> {
        let dtos: Vec<dto::RosterEntryDto> = entries.into_iter().map(Into::into).collect();
        serde_json::to_string(&dtos).map_err(|e| FrameEncodeError(e.to_string()))
    }
}
