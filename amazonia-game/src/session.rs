use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::actions::{
    self, EatOutcome, FightOutcome, FishOutcome, FishingAttempt, FleeOutcome, SleepOutcome,
};
use crate::error::GameError;
use crate::food::Food;
use crate::manager::GameManager;
use crate::player::Player;
use crate::species::Animal;

/// High-level session wrapper binding a game manager to a seeded RNG.
#[derive(Debug, Clone)]
pub struct SurvivalSession {
    manager: GameManager,
    rng: ChaCha20Rng,
    seed: u64,
}

impl SurvivalSession {
    /// Construct a session whose every random draw derives from `seed`.
    #[must_use]
    pub fn new(manager: GameManager, seed: u64) -> Self {
        Self {
            manager,
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Deterministically reseed the session.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha20Rng::seed_from_u64(seed);
    }

    /// Borrow the underlying manager.
    #[must_use]
    pub const fn manager(&self) -> &GameManager {
        &self.manager
    }

    /// Borrow the underlying mutable manager.
    pub const fn manager_mut(&mut self) -> &mut GameManager {
        &mut self.manager
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        self.manager.player()
    }

    /// The session RNG, for callers simulating the fishing minigame.
    pub const fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    /// The run ends when the player dies.
    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.manager.player().is_alive()
    }

    /// # Errors
    ///
    /// See [`actions::eat`].
    pub fn eat(&mut self, food: Food, amount: u32) -> Result<EatOutcome, GameError> {
        actions::eat(&mut self.manager, food, amount, &mut self.rng)
    }

    /// # Errors
    ///
    /// See [`actions::sleep`].
    pub fn sleep(&mut self, hours: u32) -> Result<SleepOutcome, GameError> {
        actions::sleep(&mut self.manager, hours, &mut self.rng)
    }

    pub fn encounter(&mut self) -> Animal {
        actions::encounter(&self.manager, &mut self.rng)
    }

    /// # Errors
    ///
    /// See [`actions::fight`].
    pub fn fight(&mut self, animal: Animal) -> Result<FightOutcome, GameError> {
        actions::fight(&mut self.manager, animal, &mut self.rng)
    }

    /// # Errors
    ///
    /// See [`actions::flee`].
    pub fn flee(&mut self, animal: Animal) -> Result<FleeOutcome, GameError> {
        actions::flee(&mut self.manager, animal, &mut self.rng)
    }

    pub fn bite_delay(&mut self) -> f64 {
        actions::bite_delay(&mut self.rng)
    }

    pub fn reaction_window(&mut self) -> f64 {
        actions::reaction_window(self.manager.player(), &mut self.rng)
    }

    /// # Errors
    ///
    /// See [`actions::fish`].
    pub fn fish(&mut self, attempt: FishingAttempt) -> Result<FishOutcome, GameError> {
        actions::fish(&mut self.manager, attempt, &mut self.rng)
    }

    /// Consume the session, returning the underlying manager.
    #[must_use]
    pub fn into_manager(self) -> GameManager {
        self.manager
    }
}
