//! Conversion logic between DTOs and domain entities.

use taiwa_shared::time::timestamp_to_rfc3339;

use crate::domain::{HydratedMessage, RosterEntry, User, UserId};
use crate::infrastructure::dto::{seed, websocket as dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<seed::UserSeedDto> for User {
    fn from(dto: seed::UserSeedDto) -> Self {
        Self {
            id: UserId::new(dto.id),
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone_no: dto.phone_no,
            online_status: dto.online_status,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<HydratedMessage> for dto::ConversationMessageDto {
    fn from(model: HydratedMessage) -> Self {
        let HydratedMessage { message, sender } = model;
        Self {
            message_id: message.id.value(),
            sender: message.sender.value(),
            recipient: message.recipient.value(),
            message: message.content.into_string(),
            timestamp: timestamp_to_rfc3339(message.timestamp.value()),
            user: dto::MessageSenderDto {
                first_name: sender.first_name,
                last_name: sender.last_name,
                user_id: sender.id.value(),
                phone_no: sender.phone_no,
            },
        }
    }
}

impl From<RosterEntry> for dto::RosterEntryDto {
    fn from(model: RosterEntry) -> Self {
        let full_name = model.peer.full_name();
        Self {
            recipient_id: model.peer.id.value(),
            first_name: model.peer.first_name,
            last_name: model.peer.last_name,
            email: model.peer.email,
            full_name,
            online_status: model.peer.online_status,
            phone_no: model.peer.phone_no,
            sender_id: model.viewer.value(),
            last_message: model.last_message.into_string(),
            last_timestamp: timestamp_to_rfc3339(model.last_timestamp.value()),
            last_read: model.last_read,
            unread_count: model.unread_count,
        }
    }
}
