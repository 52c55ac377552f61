//! Ticket types: the data structures that represent an issued session.

use std::time::Instant;

use buzztag_protocol::TicketId;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for ticket expiry behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime (in seconds) granted to a freshly issued ticket.
    ///
    /// Default: 100 seconds. Set to 0 to issue tickets that are already
    /// at their expiry instant - useful in tests.
    pub expiry_timeout_s: u64,

    /// Lifetime (in seconds) granted on each successful extension,
    /// measured from the moment of the extension (sliding expiry).
    ///
    /// Default: 20 seconds.
    pub expiry_sliding_window_s: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_timeout_s: 100,
            expiry_sliding_window_s: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A single issued session ticket.
///
/// A ticket is live iff `now <= expiry`. Liveness is evaluated lazily at
/// lookup time; there is no separate "expired" flag to keep in sync, and
/// a dead ticket may sit in the store until the next sweep reclaims it.
///
/// `Instant` is the monotonic clock - it always moves forward and is not
/// affected by system clock changes, which is what expiry comparison
/// needs.
#[derive(Debug, Clone)]
pub struct Ticket {
    /// The ticket's unique identifier. Opaque to the caller; the gateway
    /// also uses it as the player's identity in the game engine.
    pub id: TicketId,

    /// The absolute instant at which this ticket stops being live.
    ///
    /// Moves forward on a successful extend, and is forced to "now"
    /// (immediately in the past for any later observer) on destroy.
    pub expiry: Instant,
}

impl Ticket {
    /// Whether the ticket is live at the given instant.
    pub fn is_live(&self, now: Instant) -> bool {
        now <= self.expiry
    }
}
