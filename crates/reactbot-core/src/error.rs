//! Failure taxonomy raised by command bodies, consumed by the dispatcher.

use crate::transport::TransportError;

/// Everything a command execution can fail with.
///
/// The dispatcher matches this exhaustively to pick the user-visible
/// response; anything that does not fit a specific kind travels in
/// [`CommandError::Other`] and surfaces as a generic apology.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The caller supplied fewer arguments than the command's minimum.
    #[error("{0}")]
    NotEnoughArguments(String),

    /// The arguments parse but are semantically invalid.
    #[error("{0}")]
    InvalidArguments(String),

    /// A referenced entity (user, role, command, ...) could not be resolved.
    #[error("{0}")]
    InstanceNotFound(String),

    /// The platform client rejected a request.
    #[error(transparent)]
    Api(#[from] TransportError),

    /// Unclassified failure; logged server-side, never shown to the caller.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
