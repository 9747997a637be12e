//! Resting to recover energy and HP.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    SLEEP_ESTIMATED_HUNGER_PER_HOUR, SLEEP_HEAL_PER_HOUR, SLEEP_MAX_HOURS, SLEEP_MIN_HOURS,
    SLEEP_MIN_HUNGER_RATIO,
};
use crate::error::GameError;
use crate::manager::{GameManager, TimeReport, TimeTaxes};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepBlockReason {
    TooHungry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepOutcome {
    Slept {
        hours: u32,
        heal: f64,
        report: TimeReport,
    },
    Blocked(SleepBlockReason),
}

/// Whether the estimated hunger spent over `hours` of sleep would leave the
/// player under a tenth of their hunger gauge.
#[must_use]
pub fn too_hungry_to_sleep(player: &Player, hours: u32) -> bool {
    let hunger = player.hunger();
    hunger.current() - f64::from(hours) * SLEEP_ESTIMATED_HUNGER_PER_HOUR
        < hunger.max() * SLEEP_MIN_HUNGER_RATIO
}

/// Sleep for whole `hours`, restoring one energy per hour.
///
/// # Errors
///
/// Returns [`GameError::InvalidArgument`] when `hours` is outside `1..=48`.
pub fn sleep(
    manager: &mut GameManager,
    hours: u32,
    rng: &mut impl Rng,
) -> Result<SleepOutcome, GameError> {
    if !(SLEEP_MIN_HOURS..=SLEEP_MAX_HOURS).contains(&hours) {
        return Err(GameError::invalid(
            "hours",
            format!("sleep must last {SLEEP_MIN_HOURS}..={SLEEP_MAX_HOURS} hours (got {hours})"),
        ));
    }
    if too_hungry_to_sleep(manager.player(), hours) {
        return Ok(SleepOutcome::Blocked(SleepBlockReason::TooHungry));
    }

    let duration = f64::from(hours);
    let heal = duration * SLEEP_HEAL_PER_HOUR.sample(rng);
    let player = manager.player_mut();
    player.restore_energy(duration)?;
    player.heal(heal)?;
    debug!("slept {hours}h: +{heal:.2} hp");

    let report = manager.advance_time(duration, TimeTaxes::NO_ENERGY, rng)?;
    Ok(SleepOutcome::Slept {
        hours,
        heal,
        report,
    })
}
