//! Identifier newtypes.
//!
//! Both identifiers wrap a UUID. The session store hands out `TicketId`s
//! and the game engine tracks `UserId`s; the gateway registers a player
//! under the same UUID its ticket carries, so the two registries stay
//! correlated by value alone. Nothing is shared by reference.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for a registered player.
///
/// This is a newtype wrapper: wrapping the `Uuid` in a named struct means
/// you cannot pass a `TicketId` where a `UserId` is expected, even though
/// both are UUIDs underneath.
///
/// `#[serde(transparent)]` serializes this as the bare UUID string, not
/// as a one-field object, so a `UserId` in a response body reads as
/// `"3f2b..."` rather than `{"0": "3f2b..."}`.
///
/// `Ord` is derived because the game engine collects selection candidates
/// in sorted order; see `buzztag-game`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique identifier for a session ticket.
///
/// Same newtype pattern as [`UserId`]. A ticket is the opaque credential
/// a caller holds between requests; its UUID doubles as the player's
/// identity in the game engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TicketId(pub Uuid);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The gateway registers each player under their ticket's UUID.
impl From<TicketId> for UserId {
    fn from(ticket: TicketId) -> Self {
        Self(ticket.0)
    }
}
