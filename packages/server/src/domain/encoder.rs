//! Outbound frame encoding trait
//!
//! UseCase 層はこの trait でフレームを作り、ワイヤー形式（JSON の DTO）には依存しない。

use super::{FrameEncodeError, HydratedMessage, RosterEntry};

/// Frame Encoder trait
pub trait FrameEncoder: Send + Sync {
    /// 会話接続へ送るメッセージフレーム
    fn encode_message(&self, message: HydratedMessage) -> Result<String, FrameEncodeError>;

    /// ロスター接続へ送る 1 フレーム（エントリの配列）
    fn encode_roster(&self, entries: Vec<RosterEntry>) -> Result<String, FrameEncodeError>;
}
