//! Amazonia Game Engine
//!
//! Platform-agnostic core of the Amazonia jungle survival loop: a player with
//! depletable vitals spends hours eating, sleeping, fishing, and hunting while
//! a wrapping day clock charges time-based taxes. This crate carries no UI or
//! filesystem dependencies; saves go through the [`SaveStore`] trait.

pub mod actions;
pub mod config;
mod constants;
pub mod day_period;
pub mod error;
pub mod food;
pub mod format;
pub mod manager;
pub mod numbers;
pub mod player;
pub mod player_class;
pub mod range;
pub mod record;
pub mod session;
pub mod species;
pub mod storage;

use anyhow::Context;
use log::info;

// Re-export commonly used types
pub use actions::{
    ActionKind, EatBlockReason, EatOutcome, FightOutcome, FishOutcome, FishingAttempt,
    FleeOutcome, SleepBlockReason, SleepOutcome,
};
pub use config::{ConfigError, TimeTaxConfig};
pub use day_period::DayPeriod;
pub use error::GameError;
pub use food::Food;
pub use format::{format_clock, format_duration, format_float, format_percent};
pub use manager::{GameManager, TaxEntry, TimeReport, TimeTaxes};
pub use player::{Player, PlayerParts, Skill, SkillGrowth, Vital};
pub use player_class::{ClassBuff, PlayerClass};
pub use range::Range;
pub use record::{GameRecord, PlayerClassRecord, PlayerRecord};
pub use session::SurvivalSession;
pub use species::{Animal, AnimalStats, pick_random_animal};
pub use storage::MemorySaveStore;

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this; saves are keyed by
/// player name and saving under an existing name replaces that entry only.
pub trait SaveStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the save for `name`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, name: &str) -> Result<Option<GameRecord>, Self::Error>;

    /// Save a record under its player's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, record: &GameRecord) -> Result<(), Self::Error>;

    /// Names of every stored save.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list_names(&self) -> Result<Vec<String>, Self::Error>;
}

/// Main game engine for creating, saving, and restoring sessions
pub struct SurvivalEngine<S>
where
    S: SaveStore,
{
    storage: S,
    taxes: TimeTaxConfig,
}

impl<S> SurvivalEngine<S>
where
    S: SaveStore,
{
    /// Create a new engine over the provided storage
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            taxes: TimeTaxConfig::default_config(),
        }
    }

    /// Use custom time taxes for every session this engine creates or loads.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `taxes` fails validation.
    pub fn with_tax_config(mut self, taxes: TimeTaxConfig) -> Result<Self, ConfigError> {
        taxes.validate()?;
        self.taxes = taxes;
        Ok(self)
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Character creation: a fresh player with the class buff applied once.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a blank name.
    pub fn create_session(
        &self,
        name: &str,
        class: PlayerClass,
        seed: u64,
    ) -> Result<SurvivalSession, GameError> {
        let player = Player::create(name, class)?;
        info!("new {class} {name:?} with seed {seed}");
        let manager = GameManager::new(player).with_validated_taxes(self.taxes);
        Ok(SurvivalSession::new(manager, seed))
    }

    /// Save a session under its player's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored.
    pub fn save_session(&self, session: &SurvivalSession) -> Result<(), S::Error> {
        let record = session.manager().to_record();
        self.storage.save(&record)?;
        info!(
            "saved {:?} on day {} at {}",
            record.name(),
            record.days_survived,
            session.manager().clock_label()
        );
        Ok(())
    }

    /// Load a saved session, seeding a fresh RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the record cannot be rebuilt.
    pub fn load_session(
        &self,
        name: &str,
        seed: u64,
    ) -> Result<Option<SurvivalSession>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let Some(record) = self
            .storage
            .load(name)
            .map_err(Into::<anyhow::Error>::into)
            .with_context(|| format!("reading save {name:?}"))?
        else {
            return Ok(None);
        };
        let manager = GameManager::from_record(&record)
            .with_context(|| format!("rebuilding save {name:?}"))?
            .with_validated_taxes(self.taxes);
        info!("loaded {name:?} on day {}", manager.days_survived());
        Ok(Some(SurvivalSession::new(manager, seed)))
    }

    /// Names of every stored save.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_names(&self) -> Result<Vec<String>, S::Error> {
        self.storage.list_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creates_and_roundtrips_sessions() {
        let engine = SurvivalEngine::new(MemorySaveStore::new());
        let mut session = engine.create_session("Iara", PlayerClass::Fisher, 0xABCD).unwrap();
        session.fish(FishingAttempt::Caught).unwrap();
        session.sleep(6).unwrap();
        engine.save_session(&session).unwrap();

        let loaded = engine.load_session("Iara", 1).unwrap().expect("save exists");
        assert_eq!(loaded.manager().to_record(), session.manager().to_record());
        assert_eq!(loaded.seed(), 1);
        assert!(engine.load_session("missing", 1).unwrap().is_none());
        assert_eq!(engine.list_names().unwrap(), vec!["Iara"]);
    }

    #[test]
    fn created_players_carry_the_class_buff_once() {
        let engine = SurvivalEngine::new(MemorySaveStore::new());
        let session = engine.create_session("Tupa", PlayerClass::Fisher, 7).unwrap();
        let delay = session.player().fish_pull_delay();
        assert!((delay.min() - 0.5).abs() < 1e-12);
        engine.save_session(&session).unwrap();
        let loaded = engine.load_session("Tupa", 7).unwrap().unwrap();
        assert_eq!(loaded.player().fish_pull_delay(), delay);
    }

    #[test]
    fn engine_rejects_invalid_tax_config() {
        let bad = TimeTaxConfig {
            critical_ratio: 2.0,
            ..TimeTaxConfig::default()
        };
        assert!(matches!(
            SurvivalEngine::new(MemorySaveStore::new()).with_tax_config(bad),
            Err(ConfigError::RangeViolation {
                field: "critical_ratio",
                ..
            })
        ));
    }

    #[test]
    fn blank_names_cannot_start_a_session() {
        let engine = SurvivalEngine::new(MemorySaveStore::new());
        assert!(engine.create_session("  ", PlayerClass::Hunter, 1).is_err());
    }

    #[test]
    fn corrupt_saves_surface_as_errors() {
        let store = MemorySaveStore::new();
        let engine = SurvivalEngine::new(store.clone());
        let session = engine.create_session("Rio", PlayerClass::Hunter, 3).unwrap();
        let mut record = session.manager().to_record();
        record.player.player_class.class_name = "Pirate".into();
        store.save(&record).unwrap();
        assert!(engine.load_session("Rio", 3).is_err());
    }
}
