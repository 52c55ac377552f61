//! Error types for the game layer.

use buzztag_protocol::{ActionError, UserId};

/// Errors that can occur while registering players or dispatching
/// actions.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A player with this identifier is already registered.
    #[error("user {0} already exists")]
    UserAlreadyExists(UserId),

    /// No player with this identifier is registered.
    ///
    /// When this surfaces from an action call that already passed
    /// session authentication, it means the gateway let the two
    /// registries drift apart - a server-side fault, not a client error.
    /// The gateway is responsible for that distinction.
    #[error("user {0} doesn't exist")]
    UserDoesntExist(UserId),

    /// The action was refused: bad structure, wrong API name or version,
    /// or an impossible request. The inner [`ActionError`] carries the
    /// specific reason; callers treat them all as one kind of failure.
    #[error("invalid user action: {0}")]
    InvalidAction(#[from] ActionError),
}
