//! The gateway: composes the ticket store and the game engine.
//!
//! Each user-facing operation follows the same shape: check the session,
//! slide its expiry, then touch the game. The two stores never see each
//! other; this module correlates them purely by identifier value (a
//! player is registered under their ticket's UUID).
//!
//! # Lock ordering
//!
//! Both stores sit behind their own mutex. Whenever an operation needs
//! both, it takes the session lock BEFORE the game lock, never the
//! reverse. The sweeper task follows the same order, so a sweep and a
//! request can never deadlock against each other.

use std::sync::Arc;
use std::time::Duration;

use buzztag_game::{GameConfig, GameEngine, GameError, RandomSource, ThreadRandom};
use buzztag_protocol::{ActionResponse, TicketId, UserId};
use buzztag_session::{SessionConfig, Ticket, TicketStore};
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::BuzztagError;

/// The composition point: one ticket store, one game engine, and the
/// discipline that keeps their registries in sync.
///
/// Wrap it in an [`Arc`] to share it between request handlers and the
/// sweeper task.
pub struct Gateway<R: RandomSource = ThreadRandom> {
    tickets: Mutex<TicketStore>,
    game: Mutex<GameEngine<R>>,
}

impl Gateway<ThreadRandom> {
    /// Creates a gateway over fresh, empty stores.
    pub fn new(session_config: SessionConfig, game_config: GameConfig) -> Self {
        Self::with_random(session_config, game_config, ThreadRandom)
    }
}

impl<R: RandomSource> Gateway<R> {
    /// Creates a gateway with an explicit random source for the engine.
    pub fn with_random(
        session_config: SessionConfig,
        game_config: GameConfig,
        random: R,
    ) -> Self {
        Self {
            tickets: Mutex::new(TicketStore::new(session_config)),
            game: Mutex::new(GameEngine::with_random(game_config, random)),
        }
    }

    /// Issues a session ticket and registers the matching player.
    ///
    /// Credentials are accepted without verification; by current design
    /// this operation does not fail for any caller-visible reason.
    ///
    /// # Errors
    /// [`BuzztagError::StateMismatch`] if the fresh identifier is somehow
    /// already registered in the game - an internal fault, not a login
    /// failure.
    pub async fn login(&self, credentials: &Value) -> Result<Ticket, BuzztagError> {
        let mut tickets = self.tickets.lock().await;
        let mut game = self.game.lock().await;

        let ticket = tickets.new_session(credentials);
        game.add_user(UserId::from(ticket.id))
            .map_err(BuzztagError::StateMismatch)?;

        Ok(ticket)
    }

    /// Extends a session without touching the game.
    ///
    /// # Errors
    /// [`BuzztagError::Session`] if the reference is malformed, unknown,
    /// or expired.
    pub async fn extend(&self, sref: &Value) -> Result<Ticket, BuzztagError> {
        let mut tickets = self.tickets.lock().await;
        Ok(tickets.extend_session(sref)?)
    }

    /// Destroys a session and deregisters the matching player.
    ///
    /// # Errors
    /// - [`BuzztagError::Session`] if the reference is unusable
    /// - [`BuzztagError::StateMismatch`] if the session existed but its
    ///   player did not - the registries had already drifted
    pub async fn signout(&self, sref: &Value) -> Result<(), BuzztagError> {
        let mut tickets = self.tickets.lock().await;
        let mut game = self.game.lock().await;

        let id = tickets.destroy_session(sref)?;
        game.remove_user(UserId::from(id))
            .map_err(BuzztagError::StateMismatch)?;

        Ok(())
    }

    /// Authenticates and extends a session, then dispatches the action.
    ///
    /// # Errors
    /// - [`BuzztagError::Session`] if the ticket check fails
    /// - [`BuzztagError::Game`] if the action itself is refused
    /// - [`BuzztagError::StateMismatch`] if the player is missing even
    ///   though their session checked out
    pub async fn action(
        &self,
        sref: &Value,
        user_action: &Value,
    ) -> Result<ActionResponse, BuzztagError> {
        let user_id = {
            let mut tickets = self.tickets.lock().await;
            tickets.authenticate_session(sref)?;
            let ticket = tickets.extend_session(sref)?;
            UserId::from(ticket.id)
        };

        let mut game = self.game.lock().await;
        game.user_action(user_id, user_action).map_err(|err| match err {
            // The session was live, so a missing player means the
            // gateway failed to keep the registries in sync.
            GameError::UserDoesntExist(_) => BuzztagError::StateMismatch(err),
            other => BuzztagError::Game(other),
        })
    }

    /// Reclaims expired tickets and deregisters their players.
    ///
    /// Returns the reclaimed identifiers. Safe to call on any cadence;
    /// an identifier is never reported by two sweeps.
    pub async fn sweep(&self) -> Vec<TicketId> {
        let mut tickets = self.tickets.lock().await;
        let expired = tickets.sweep_expired();

        if !expired.is_empty() {
            let mut game = self.game.lock().await;
            for id in &expired {
                if let Err(err) = game.remove_user(UserId::from(*id)) {
                    tracing::warn!(
                        %id,
                        error = %err,
                        "swept session had no matching player"
                    );
                }
            }
        }

        expired
    }
}

/// Spawns a background task that sweeps the gateway on a fixed cadence.
///
/// Missed ticks are skipped rather than bunched up, so a slow pass never
/// causes a burst of catch-up sweeps.
pub fn spawn_sweeper<R>(
    gateway: Arc<Gateway<R>>,
    every: Duration,
) -> JoinHandle<()>
where
    R: RandomSource + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let swept = gateway.sweep().await;
            if !swept.is_empty() {
                tracing::debug!(count = swept.len(), "sweeper pass complete");
            }
        }
    })
}

// =========================================================================
// Tests
// =========================================================================
