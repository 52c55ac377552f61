//! The Buzztag game engine.
//!
//! A small multiplayer "tag"-style game: players press a shared button
//! and propagate an "alert" flag to each other. This crate owns the
//! per-player state and the rules:
//!
//! - [`GameEngine`] - registers players, validates and dispatches
//!   actions
//! - [`AlertState`] - the per-player tri-state alert flag
//! - [`RandomSource`] - pluggable randomness, so tests can script the
//!   exact propagation targets instead of asserting statistically
//!
//! # The state machine
//!
//! ```text
//!   unset --(own BUTTON_PRESS or STOP)--> clear
//!   clear --(targeted by another press, or START)--> alerted
//! alerted --(own BUTTON_PRESS or STOP)--> clear
//! ```
//!
//! There is no terminal state; players cycle for the lifetime of their
//! registration. `unset` and `clear` both read externally as "not
//! alerted" - the distinction only marks a player who has never acted.
//!
//! # How it fits in the stack
//!
//! ```text
//! Gateway (above)      - gates actions on a live session ticket
//!     |
//! Game (this crate)    - owns the player registry and the rules
//!     |
//! Protocol (below)     - provides UserId, UserAction, ActionResponse
//! ```

mod config;
mod engine;
mod error;
mod player;
mod random;

pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::GameError;
pub use player::{AlertState, PlayerState};
pub use random::{RandomSource, ThreadRandom};
