//! The game engine: player registry and action dispatch.
//!
//! # Concurrency note
//!
//! `GameEngine` is NOT thread-safe by itself - the gateway owns it
//! behind a single mutex. That single lock is load-bearing for
//! correctness, not just convenience: BUTTON_PRESS reads every other
//! player's alert state and then writes some of them, and that
//! read-then-write must be atomic with respect to concurrent presses.
//! Two interleaved presses over a finer-grained lock could double-select
//! a target or mis-clamp the eligible set. Each call is O(players) and
//! never blocks, so serializing all actions costs little.

use std::collections::HashMap;
use std::time::Instant;

use buzztag_protocol::{
    ActionCode, ActionError, ActionResponse, UserAction, UserId, API_NAME,
    API_VERSION,
};
use serde_json::Value;

use crate::{AlertState, GameConfig, GameError, PlayerState, RandomSource, ThreadRandom};

/// Owns the per-player state and enforces the game rules.
///
/// Generic over its [`RandomSource`] so tests can script the exact
/// propagation targets; production code uses the [`ThreadRandom`]
/// default and never names the parameter.
pub struct GameEngine<R: RandomSource = ThreadRandom> {
    /// All registered players, keyed by identifier.
    players: HashMap<UserId, PlayerState>,

    /// Game-balance knobs, validated at construction.
    config: GameConfig,

    /// Where the engine gets its randomness.
    random: R,
}

impl GameEngine<ThreadRandom> {
    /// Creates an empty engine using the thread-local random generator.
    pub fn new(config: GameConfig) -> Self {
        Self::with_random(config, ThreadRandom)
    }
}

impl<R: RandomSource> GameEngine<R> {
    /// Creates an empty engine with an explicit random source.
    pub fn with_random(config: GameConfig, random: R) -> Self {
        Self {
            players: HashMap::new(),
            config: config.validated(),
            random,
        }
    }

    /// Registers a new player.
    ///
    /// The player starts in the `Unset` alert state with no press
    /// recorded.
    ///
    /// # Errors
    /// [`GameError::UserAlreadyExists`] if the identifier is taken.
    pub fn add_user(&mut self, user_id: UserId) -> Result<(), GameError> {
        if self.players.contains_key(&user_id) {
            return Err(GameError::UserAlreadyExists(user_id));
        }
        self.players.insert(user_id, PlayerState::new(user_id));

        tracing::info!(%user_id, players = self.players.len(), "user joined");
        Ok(())
    }

    /// Deregisters a player, discarding their state.
    ///
    /// # Errors
    /// [`GameError::UserDoesntExist`] if the identifier is unknown.
    pub fn remove_user(&mut self, user_id: UserId) -> Result<(), GameError> {
        if self.players.remove(&user_id).is_none() {
            return Err(GameError::UserDoesntExist(user_id));
        }

        tracing::info!(%user_id, players = self.players.len(), "user left");
        Ok(())
    }

    /// Discards all player state. Reset hook for tests and restarts.
    pub fn clean_up(&mut self) {
        self.players.clear();
        tracing::info!("game state cleared");
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Validates and dispatches a raw user action.
    ///
    /// Checks run in a fixed order so failure reasons are predictable:
    /// structure first, then API name, then API version, then that the
    /// acting player is registered, and only then the action itself.
    ///
    /// # Errors
    /// - [`GameError::InvalidAction`] for any structural violation,
    ///   API mismatch, or impossible request
    /// - [`GameError::UserDoesntExist`] if `user_id` is not registered
    pub fn user_action(
        &mut self,
        user_id: UserId,
        raw: &Value,
    ) -> Result<ActionResponse, GameError> {
        let action = UserAction::from_value(raw)?;
        if action.api.name != API_NAME {
            return Err(ActionError::ApiNameMismatch(action.api.name).into());
        }
        if action.api.version != API_VERSION {
            return Err(ActionError::ApiVersionMismatch(action.api.version).into());
        }
        self.find_state(user_id)?;

        match action.action.code {
            ActionCode::ButtonPress => self.handle_button_press(user_id, action),
            ActionCode::CheckIfAlerted => {
                self.handle_check_if_alerted(user_id, action)
            }
            ActionCode::Start => self.handle_start(user_id, action),
            ActionCode::Stop => Ok(self.handle_stop(user_id, action)),
        }
    }

    /// BUTTON_PRESS: record the press, clear the actor's own alert, and
    /// tag one or two eligible players.
    ///
    /// Pressing always clears your own alert, unconditionally - even a
    /// press that finds nobody to tag still succeeds. Eligible targets
    /// are the other registered players who are not already alerted;
    /// whether that exclusion is game balance or history is an open
    /// policy question, but it is the behavior callers rely on.
    fn handle_button_press(
        &mut self,
        user_id: UserId,
        action: UserAction,
    ) -> Result<ActionResponse, GameError> {
        let state = self.find_state_mut(user_id)?;
        state.last_pressed = Some(Instant::now());
        state.alert_state = AlertState::Clear;

        let multiply = self.random.chance(self.config.alert_chance_of_multiply);
        let candidates = self.eligible_candidates(user_id);
        let amount = (1 + usize::from(multiply)).min(candidates.len());

        for index in self.random.sample(candidates.len(), amount) {
            self.alert(candidates[index]);
        }

        Ok(ActionResponse::success(user_id, action))
    }

    /// CHECK_IF_ALERTED: read-only report of the actor's collapsed
    /// alert state.
    fn handle_check_if_alerted(
        &self,
        user_id: UserId,
        action: UserAction,
    ) -> Result<ActionResponse, GameError> {
        let alerted = self.find_state(user_id)?.alert_state.is_alerted();
        Ok(ActionResponse::alerted(user_id, action, alerted))
    }

    /// START: tag one other registered player, alerted or not.
    ///
    /// Unlike BUTTON_PRESS, START does not exclude already-alerted
    /// players from selection.
    fn handle_start(
        &mut self,
        user_id: UserId,
        action: UserAction,
    ) -> Result<ActionResponse, GameError> {
        let mut others: Vec<UserId> = self
            .players
            .keys()
            .copied()
            .filter(|id| *id != user_id)
            .collect();
        others.sort();

        if others.is_empty() {
            return Err(ActionError::NoOtherPlayers.into());
        }

        for index in self.random.sample(others.len(), 1) {
            self.alert(others[index]);
        }

        Ok(ActionResponse::success(user_id, action))
    }

    /// STOP: clear every registered player's alert, regardless of prior
    /// state. Players who had never acted move from `Unset` to `Clear`.
    fn handle_stop(&mut self, user_id: UserId, action: UserAction) -> ActionResponse {
        for state in self.players.values_mut() {
            state.alert_state = AlertState::Clear;
        }

        tracing::info!(%user_id, "all alerts cleared");
        ActionResponse::success(user_id, action)
    }

    /// The other registered players a press may tag, in a stable order.
    ///
    /// Sorted so that which player a given index refers to depends only
    /// on the registry contents, never on hash iteration order. A
    /// scripted random source can therefore name its targets exactly.
    fn eligible_candidates(&self, actor: UserId) -> Vec<UserId> {
        let mut candidates: Vec<UserId> = self
            .players
            .iter()
            .filter(|(id, state)| **id != actor && !state.alert_state.is_alerted())
            .map(|(id, _)| *id)
            .collect();
        candidates.sort();
        candidates
    }

    /// Marks a player alerted.
    fn alert(&mut self, target: UserId) {
        if let Some(state) = self.players.get_mut(&target) {
            state.alert_state = AlertState::Alerted;
            tracing::info!(%target, "alerted");
        }
    }

    /// Looks up a player's state.
    fn find_state(&self, user_id: UserId) -> Result<&PlayerState, GameError> {
        self.players
            .get(&user_id)
            .ok_or(GameError::UserDoesntExist(user_id))
    }

    /// Looks up a player's state for mutation.
    fn find_state_mut(
        &mut self,
        user_id: UserId,
    ) -> Result<&mut PlayerState, GameError> {
        self.players
            .get_mut(&user_id)
            .ok_or(GameError::UserDoesntExist(user_id))
    }
}

// =========================================================================
// Tests
// =========================================================================
