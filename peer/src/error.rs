use thiserror::Error;

use crate::transport::{RecvError, SendError};

/// Errors raised when a role transition or role-bound action is not allowed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoleError {
    /// Hider may only be chosen before anyone else has joined
    #[error("Cannot become Hider while {connected_peers} peer(s) are connected")]
    GroupAlreadyFormed { connected_peers: usize },

    /// Local participant is already the Hider
    #[error("Already playing as Hider")]
    AlreadyHider,

    /// Action was attempted from the other role
    #[error("{operation} requires the {required} role")]
    WrongRole {
        operation: &'static str,
        required: &'static str,
    },
}

/// Errors surfaced to the host through [`crate::ErrorEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerError {
    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Recv(#[from] RecvError),

    #[error(transparent)]
    Role(#[from] RoleError),

    /// Underlying tracking or connection failure. Recoverable by resetting
    /// local anchor state.
    #[error("The shared session failed: {reason}")]
    TransportFailed { reason: String },
}
