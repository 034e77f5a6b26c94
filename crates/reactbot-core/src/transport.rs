//! Outbound transport seam: sending and deleting messages.
//!
//! The real gateway client lives behind [`Transport`] so the dispatcher and
//! the command bodies never touch a platform type directly.

use async_trait::async_trait;
use reactbot_common::{ChannelId, MessageId};

/// Discord JSON error code for missing bot permissions.
pub const ERROR_MISSING_PERMISSIONS: i64 = 50013;

/// Discord JSON error code for an overloaded API resource.
pub const ERROR_API_OVERLOADED: i64 = 130_000;

/// Failure raised by the platform client, not by a command body.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The platform rejected the request with a JSON error code.
    #[error("api error (code {code}): {message}")]
    Api {
        /// Platform error code, e.g. 50013 for missing permissions.
        code: i64,
        /// Human-readable message from the platform.
        message: String,
    },

    /// Anything that never reached the platform (connection, serialization).
    #[error("platform error: {0}")]
    Platform(String),
}

/// Handle to a message this bot has sent, kept for transient cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyHandle {
    /// Channel the reply was sent to.
    pub channel_id: ChannelId,
    /// Id of the sent message; for a split send, the last one.
    pub message_id: MessageId,
}

/// Narrow interface to the chat platform's outbound surface.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `content` to a channel. With `split` set, the content is
    /// broken into transport-sized messages on line boundaries and the
    /// handle of the last message is returned.
    async fn send(
        &self,
        channel: ChannelId,
        content: &str,
        split: bool,
    ) -> Result<ReplyHandle, TransportError>;

    /// Deletes a message. Callers that treat deletion as best-effort are
    /// expected to swallow the error themselves.
    async fn delete(&self, channel: ChannelId, message: MessageId) -> Result<(), TransportError>;
}
