//! Error types for the session layer.

/// Errors that can occur during ticket management.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Credentials were rejected when issuing a session.
    ///
    /// Reserved: the current store issues tickets without checking
    /// credentials, so nothing constructs this yet. It stays in the
    /// taxonomy so the gateway's error mapping does not change when an
    /// authenticating store appears.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session reference is unusable: malformed, unknown, or expired.
    ///
    /// The three causes are deliberately not distinguished to the
    /// caller - a destroyed or expired ticket must look the same as one
    /// that never existed. The message is for logs, not for branching.
    #[error("invalid session: {0}")]
    InvalidSession(String),
}
