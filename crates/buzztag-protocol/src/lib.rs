//! The action contract for Buzztag.
//!
//! This crate defines the "language" that the gateway and the game engine
//! agree on:
//!
//! - **Identifiers** ([`UserId`], [`TicketId`]) - newtype wrappers so a
//!   session ticket can never be confused with a player at compile time,
//!   even though the gateway correlates them by value.
//! - **User actions** ([`UserAction`], [`ActionCode`]) - the structure a
//!   caller must send to act in the game, plus the explicit structural
//!   validation that turns untrusted JSON into a typed action.
//! - **Responses** ([`ActionResponse`]) - what a successful action
//!   returns, echoing the action back to the caller.
//! - **Errors** ([`ActionError`]) - every reason an action can be
//!   refused, each with a stable human-readable message.
//!
//! # How it fits in the stack
//!
//! ```text
//! Gateway (above)      - parses requests, composes the two stores
//!     |
//! Protocol (this crate) - action contract, shared by both stores' callers
//!     |
//! Session / Game (peers) - neither store depends on the other
//! ```

mod action;
mod error;
mod ids;
mod response;

pub use action::{
    ActionBody, ActionCode, ApiHeader, UserAction, API_NAME, API_VERSION,
};
pub use error::ActionError;
pub use ids::{TicketId, UserId};
pub use response::{ActionResponse, ResponsePayload};
