//! ハンドシェイクのクエリ文字列の解釈
//!
//! クエリパラメータは名前ではなく位置で解釈する。`&` で分割し、
//! 各セグメントを `=` で分割した値部分を使う。
//!
//! - 会話接続: 1 番目 = userId, 2 番目 = recipientId
//! - ロスター接続: 1 番目 = userId

use super::{UserId, ValueObjectError};

/// 会話接続のハンドシェイクで渡される ID の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationParams {
    pub user: UserId,
    pub recipient: UserId,
}

/// ハンドシェイクの解釈エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeError {
    /// userId が無い、または数値でない
    InvalidUserId,
    /// recipientId が無い、または数値でない
    InvalidRecipientId,
}

/// Returns the value part of the `index`-th `&`-separated segment.
fn positional_value(query: &str, index: usize) -> Option<&str> {
    let segment = query.split('&').nth(index)?;
    let (_, value) = segment.split_once('=')?;
    Some(value)
}

fn parse_user_id(query: Option<&str>, index: usize) -> Result<UserId, ValueObjectError> {
    let value = query.and_then(|q| positional_value(q, index)).unwrap_or("");
    UserId::try_from(value)
}

/// Parses the roster handshake (`?userId=<u>`).
pub fn parse_roster_query(query: Option<&str>) -> Result<UserId, HandshakeError> {
    parse_user_id(query, 0).map_err(|_| HandshakeError::InvalidUserId)
}

/// Parses the conversation handshake (`?userId=<u>&recipientId=<r>`).
pub fn parse_conversation_query(query: Option<&str>) -> Result<ConversationParams, HandshakeError> {
    let user = parse_user_id(query, 0).map_err(|_| HandshakeError::InvalidUserId)?;
    let recipient = parse_user_id(query, 1).map_err(|_| HandshakeError::InvalidRecipientId)?;
    Ok(ConversationParams { user, recipient })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversation_query_success() {
        // テスト項目: userId と recipientId が位置で解釈される
        // given (前提条件):
        let query = Some("userId=1&recipientId=2");

        // when (操作):
        let result = parse_conversation_query(query);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(ConversationParams {
                user: UserId::new(1),
                recipient: UserId::new(2),
            })
        );
    }

    #[test]
    fn test_parse_conversation_query_is_positional() {
        // テスト項目: パラメータ名ではなく順序で解釈される
        // given (前提条件):
        let query = Some("recipientId=5&userId=9");

        // when (操作):
        let result = parse_conversation_query(query).unwrap();

        // then (期待する結果): 1 番目が userId として扱われる
        assert_eq!(result.user, UserId::new(5));
        assert_eq!(result.recipient, UserId::new(9));
    }

    #[test]
    fn test_parse_conversation_query_missing_recipient() {
        // テスト項目: recipientId が無い場合は InvalidRecipientId
        // given (前提条件):
        let query = Some("userId=1");

        // when (操作):
        let result = parse_conversation_query(query);

        // then (期待する結果):
        assert_eq!(result, Err(HandshakeError::InvalidRecipientId));
    }

    #[test]
    fn test_parse_conversation_query_non_numeric_user() {
        // テスト項目: userId が数値でない場合は InvalidUserId
        // given (前提条件):
        let query = Some("userId=abc&recipientId=2");

        // when (操作):
        let result = parse_conversation_query(query);

        // then (期待する結果):
        assert_eq!(result, Err(HandshakeError::InvalidUserId));
    }

    #[test]
    fn test_parse_queries_without_query_string() {
        // テスト項目: クエリ文字列が無い場合は InvalidUserId
        // given (前提条件):
        let query = None;

        // when (操作):
        let conversation = parse_conversation_query(query);
        let roster = parse_roster_query(query);

        // then (期待する結果):
        assert_eq!(conversation, Err(HandshakeError::InvalidUserId));
        assert_eq!(roster, Err(HandshakeError::InvalidUserId));
    }

    #[test]
    fn test_parse_roster_query_ignores_extra_segments() {
        // テスト項目: ロスター接続は 1 番目のセグメントだけを使う
        // given (前提条件):
        let query = Some("userId=3&token=xyz");

        // when (操作):
        let result = parse_roster_query(query);

        // then (期待する結果):
        assert_eq!(result, Ok(UserId::new(3)));
    }
}
