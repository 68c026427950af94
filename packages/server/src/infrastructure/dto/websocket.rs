//! WebSocket で送る JSON フレームの DTO

use serde::Serialize;

/// 会話接続に送るメッセージフレーム
///
/// `{messageId, sender, recipient, message, timestamp, user:{firstName, lastName, userid, phoneNo}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessageDto {
    pub message_id: i64,
    pub sender: i64,
    pub recipient: i64,
    pub message: String,
    /// RFC 3339 (UTC)
    pub timestamp: String,
    pub user: MessageSenderDto,
}

/// 送信者の表示用フィールド
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSenderDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "userid")]
    pub user_id: i64,
    pub phone_no: String,
}

/// ロスターフレームの 1 要素（フレーム自体はこの配列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryDto {
    pub recipient_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub full_name: String,
    pub online_status: bool,
    pub phone_no: String,
    /// ロスターを見ているユーザー
    pub sender_id: i64,
    pub last_message: String,
    /// RFC 3339 (UTC)
    pub last_timestamp: String,
    pub last_read: bool,
    pub unread_count: u64,
}
