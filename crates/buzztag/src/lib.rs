//! # Buzztag
//!
//! A small multiplayer "tag"-style game: players register, press a
//! shared button, and propagate an "alert" flag to other players. A
//! session layer grants anonymous tickets that gate access to game
//! actions.
//!
//! This crate is the composition layer. The two stores underneath are
//! independent leaves - `buzztag-session` owns tickets and expiry,
//! `buzztag-game` owns player state and the propagation rules - and the
//! [`Gateway`] here is the only place that knows about both. It keeps
//! the two registries in sync: a player is created when their session is
//! issued and removed when their session is destroyed or swept.
//!
//! An HTTP (or any other) transport sits above this crate and maps
//! [`BuzztagError`] values onto its own status codes; no wire surface is
//! provided here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use buzztag::{spawn_sweeper, Gateway};
//! use buzztag_game::GameConfig;
//! use buzztag_session::SessionConfig;
//!
//! # async fn run() -> Result<(), buzztag::BuzztagError> {
//! let gateway = Arc::new(Gateway::new(
//!     SessionConfig::default(),
//!     GameConfig::default(),
//! ));
//! spawn_sweeper(Arc::clone(&gateway), Duration::from_secs(5));
//!
//! let ticket = gateway.login(&serde_json::json!({})).await?;
//! let sref = serde_json::json!({ "id": ticket.id.to_string() });
//! let action = serde_json::json!({
//!     "api": { "name": "buzztag", "version": 1 },
//!     "action": { "code": "BUTTON_PRESS" }
//! });
//! let response = gateway.action(&sref, &action).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod gateway;

pub use error::BuzztagError;
pub use gateway::{spawn_sweeper, Gateway};

/// Installs a global `tracing` subscriber reading the `RUST_LOG`
/// environment variable.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
