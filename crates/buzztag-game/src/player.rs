//! Per-player state types.

use std::time::Instant;

use buzztag_protocol::UserId;

// ---------------------------------------------------------------------------
// AlertState
// ---------------------------------------------------------------------------

/// A player's alert flag, modelled as three values rather than a
/// nullable boolean.
///
/// `Unset` and `Clear` both read externally as "not alerted"; the
/// distinction exists only to mark a player who has never acted and has
/// never been targeted. Collapsing to a boolean happens at the response
/// boundary via [`is_alerted`](Self::is_alerted), nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    /// The player has registered but never pressed, never been
    /// targeted, and never seen a STOP.
    Unset,

    /// The player's alert has been explicitly cleared (by their own
    /// press or by a STOP).
    Clear,

    /// The player has been tagged by another player's press or by a
    /// START.
    Alerted,
}

impl AlertState {
    /// Collapses the tri-state to the boolean callers see.
    pub fn is_alerted(self) -> bool {
        matches!(self, Self::Alerted)
    }
}

// ---------------------------------------------------------------------------
// PlayerState
// ---------------------------------------------------------------------------

/// Everything the engine tracks about one registered player.
///
/// Created on registration with `alert_state = Unset` and no press
/// recorded; destroyed on deregistration. A `PlayerState` exists for
/// exactly the set of currently-registered players.
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// The player's identifier.
    pub user_id: UserId,

    /// When the player last pressed the button, if ever.
    pub last_pressed: Option<Instant>,

    /// The player's position in the alert state machine.
    pub alert_state: AlertState,
}

impl PlayerState {
    /// A freshly registered player: never pressed, never alerted.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            last_pressed: None,
            alert_state: AlertState::Unset,
        }
    }
}
