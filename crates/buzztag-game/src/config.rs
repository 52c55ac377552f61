//! Game engine configuration.

use tracing::warn;

/// Tunable behavior of the game engine.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Probability, in `[0.0, 1.0]`, that a button press propagates the
    /// alert to two players instead of one.
    ///
    /// 0.0 means a press always alerts exactly one other player (when
    /// one is eligible); 1.0 means it always tries for two. This is a
    /// game-balance knob, not a law of the state machine.
    ///
    /// Default: 0.5.
    pub alert_chance_of_multiply: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            alert_chance_of_multiply: 0.5,
        }
    }
}

impl GameConfig {
    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// Called automatically by the engine's constructors. Probabilities
    /// outside `[0.0, 1.0]` (including NaN) are clamped to the nearest
    /// bound; the random source requires a valid probability.
    pub fn validated(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.alert_chance_of_multiply) {
            warn!(
                chance = self.alert_chance_of_multiply,
                "alert_chance_of_multiply outside [0, 1] - clamping"
            );
            self.alert_chance_of_multiply =
                if self.alert_chance_of_multiply > 1.0 { 1.0 } else { 0.0 };
        }
        self
    }
}
