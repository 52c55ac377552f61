//! Unified error type for the gateway.

use buzztag_game::GameError;
use buzztag_session::SessionError;

/// Top-level error that wraps the store-specific errors.
///
/// Callers of the gateway deal with this single type instead of
/// importing errors from each sub-crate. The `#[from]` attributes
/// auto-generate `From` impls, so `?` converts store errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum BuzztagError {
    /// A session-level failure: bad credentials (reserved) or an
    /// unusable session reference. A transport above maps this to
    /// "unauthorized".
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A game-level failure the caller can correct: a bad action, or a
    /// membership operation on the wrong player. A transport above maps
    /// this to "bad request".
    #[error(transparent)]
    Game(#[from] GameError),

    /// The player registry and the session registry disagree: a request
    /// passed session checks but its player is missing (or vice versa).
    /// The gateway is the component responsible for keeping the two in
    /// sync, so this is a server-side fault, never a client error.
    #[error("player registry out of sync with session store: {0}")]
    StateMismatch(#[source] GameError),
}
