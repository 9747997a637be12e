//! Hunting: meet an animal, then fight it or run.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{EXP_FAILURE, EXP_SUCCESS, FLEE_DAMAGE_FACTOR, FLEE_HOURS, HUNT_HOURS};
use crate::error::GameError;
use crate::manager::{GameManager, TimeReport, TimeTaxes};
use crate::numbers::i64_to_u32_saturating;
use crate::player::SkillGrowth;
use crate::species::{Animal, pick_random_animal};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightOutcome {
    Killed {
        animal: Animal,
        success_rate: f64,
        meat_gained: u32,
        growth: SkillGrowth,
        report: TimeReport,
    },
    Lost {
        animal: Animal,
        success_rate: f64,
        damage: f64,
        growth: SkillGrowth,
        report: TimeReport,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleeOutcome {
    Escaped {
        animal: Animal,
        success_rate: f64,
        growth: SkillGrowth,
        report: TimeReport,
    },
    Caught {
        animal: Animal,
        success_rate: f64,
        damage: f64,
        growth: SkillGrowth,
        report: TimeReport,
    },
}

impl FightOutcome {
    #[must_use]
    pub const fn report(&self) -> &TimeReport {
        match self {
            Self::Killed { report, .. } | Self::Lost { report, .. } => report,
        }
    }
}

impl FleeOutcome {
    #[must_use]
    pub const fn report(&self) -> &TimeReport {
        match self {
            Self::Escaped { report, .. } | Self::Caught { report, .. } => report,
        }
    }
}

/// Pick the animal met in the forest for the current day period.
pub fn encounter(manager: &GameManager, rng: &mut impl Rng) -> Animal {
    pick_random_animal(manager.day_period(), rng)
}

/// Fight `animal`. The chance to win is sampled from the player's hunt
/// success rate less the species' hunt tax.
///
/// # Errors
///
/// Propagates [`GameError`] from range arithmetic and player mutation.
pub fn fight(
    manager: &mut GameManager,
    animal: Animal,
    rng: &mut impl Rng,
) -> Result<FightOutcome, GameError> {
    let success_rate = manager
        .player()
        .hunt_success_rate()
        .subtract(&animal.hunt_tax())?
        .sample(rng);
    let roll: f64 = rng.r#gen();
    debug!("fight {animal}: roll {roll:.3} vs {success_rate:.3}");

    if roll <= success_rate {
        let meat_gained = i64_to_u32_saturating(animal.meat_drop().sample_int(rng)?);
        let player = manager.player_mut();
        player.meat_amount = player.meat_amount.saturating_add(meat_gained);
        let growth = player.grow_hunting(EXP_SUCCESS.sample(rng), rng)?;
        let report = manager.advance_time(HUNT_HOURS.sample(rng), TimeTaxes::ALL, rng)?;
        Ok(FightOutcome::Killed {
            animal,
            success_rate,
            meat_gained,
            growth,
            report,
        })
    } else {
        let damage = animal.damage().sample(rng);
        let player = manager.player_mut();
        player.take_damage(damage)?;
        let growth = player.grow_hunting(EXP_FAILURE.sample(rng), rng)?;
        let report = manager.advance_time(HUNT_HOURS.sample(rng), TimeTaxes::ALL, rng)?;
        Ok(FightOutcome::Lost {
            animal,
            success_rate,
            damage,
            growth,
            report,
        })
    }
}

/// Run from `animal`. A failed escape costs half the species' damage.
///
/// # Errors
///
/// Propagates [`GameError`] from range arithmetic and player mutation.
pub fn flee(
    manager: &mut GameManager,
    animal: Animal,
    rng: &mut impl Rng,
) -> Result<FleeOutcome, GameError> {
    let success_rate = manager
        .player()
        .run_success_rate()
        .subtract(&animal.run_tax())?
        .sample(rng);
    let roll: f64 = rng.r#gen();
    debug!("flee {animal}: roll {roll:.3} vs {success_rate:.3}");

    if roll <= success_rate {
        let growth = manager
            .player_mut()
            .grow_running(EXP_SUCCESS.sample(rng), rng)?;
        let report = manager.advance_time(FLEE_HOURS.sample(rng), TimeTaxes::ALL, rng)?;
        Ok(FleeOutcome::Escaped {
            animal,
            success_rate,
            growth,
            report,
        })
    } else {
        let damage = animal.damage().sample(rng) * FLEE_DAMAGE_FACTOR;
        let player = manager.player_mut();
        player.take_damage(damage)?;
        let growth = player.grow_running(EXP_FAILURE.sample(rng), rng)?;
        let report = manager.advance_time(HUNT_HOURS.sample(rng), TimeTaxes::ALL, rng)?;
        Ok(FleeOutcome::Caught {
            animal,
            success_rate,
            damage,
            growth,
            report,
        })
    }
}
