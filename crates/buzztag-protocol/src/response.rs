//! Action response types.
//!
//! Every successful action returns the same envelope: who acted, what
//! they sent (echoed back verbatim), and a small result payload whose
//! shape depends on the action.

use serde::{Deserialize, Serialize};

use crate::{UserAction, UserId};

/// The result payload of an action.
///
/// `#[serde(untagged)]` means the variant name never appears in JSON;
/// the payload is just `{"success": true}` or `{"alerted": false}`.
/// Deserialization still works because the field names are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// BUTTON_PRESS, START, and STOP acknowledge with a success flag.
    Success { success: bool },
    /// CHECK_IF_ALERTED reports the player's collapsed alert state.
    /// A player who has never acted reads as not alerted.
    Alerted { alerted: bool },
}

/// A successful action's response, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    /// The acting player.
    pub user_id: UserId,
    /// The action exactly as the caller sent it.
    pub user_action: UserAction,
    /// The action-specific result.
    pub response: ResponsePayload,
}

impl ActionResponse {
    /// Acknowledges a state-changing action (BUTTON_PRESS, START, STOP).
    pub fn success(user_id: UserId, user_action: UserAction) -> Self {
        Self {
            user_id,
            user_action,
            response: ResponsePayload::Success { success: true },
        }
    }

    /// Answers a CHECK_IF_ALERTED query.
    pub fn alerted(user_id: UserId, user_action: UserAction, alerted: bool) -> Self {
        Self {
            user_id,
            user_action,
            response: ResponsePayload::Alerted { alerted },
        }
    }
}
