//! Centralized balance and tuning constants for the survival core.
//!
//! Keeping them together ensures gameplay can only be adjusted through
//! reviewed code changes rather than external assets.

use crate::range::Range;

// Character creation -------------------------------------------------------
pub(crate) const START_HP: f64 = 20.0;
pub(crate) const START_HUNGER: f64 = 20.0;
pub(crate) const START_ENERGY: f64 = 16.0;
pub(crate) const START_FISH_PULL_DELAY: Range = Range::fixed(0.3, 0.4);
pub(crate) const START_HUNT_SUCCESS_RATE: Range = Range::fixed(0.3, 0.4);
pub(crate) const START_RUN_SUCCESS_RATE: Range = Range::fixed(0.35, 0.5);

// Clock --------------------------------------------------------------------
pub(crate) const HOURS_PER_DAY: f64 = 24.0;
pub(crate) const START_TIME: f64 = 8.0;

// Skill growth -------------------------------------------------------------
pub(crate) const CLASS_EXP_BONUS: Range = Range::fixed(1.01, 1.8);
pub(crate) const SUCCESS_RATE_CEILING: f64 = 1.0;
pub(crate) const EXP_SUCCESS: Range = Range::fixed(0.008, 0.012);
pub(crate) const EXP_FAILURE: Range = Range::fixed(0.002, 0.005);

// Time taxes ---------------------------------------------------------------
pub(crate) const CRITICAL_VITAL_RATIO: f64 = 0.2;
pub(crate) const TIRED_HP_TAX: Range = Range::fixed(0.3, 0.4);
pub(crate) const HUNGRY_HP_TAX: Range = Range::fixed(0.4, 0.45);
pub(crate) const HUNGER_TAX: Range = Range::fixed(0.45, 0.65);

// Eating -------------------------------------------------------------------
pub(crate) const EAT_HEAL_FACTOR: Range = Range::fixed(0.85, 0.95);
pub(crate) const EAT_HOURS_PER_UNIT: Range = Range::fixed(0.25, 0.35);

// Sleeping -----------------------------------------------------------------
pub(crate) const SLEEP_MIN_HOURS: u32 = 1;
pub(crate) const SLEEP_MAX_HOURS: u32 = 48;
pub(crate) const SLEEP_HEAL_PER_HOUR: Range = Range::fixed(0.45, 0.65);
pub(crate) const SLEEP_ESTIMATED_HUNGER_PER_HOUR: f64 = 0.55;
pub(crate) const SLEEP_MIN_HUNGER_RATIO: f64 = 0.1;

// Hunting ------------------------------------------------------------------
pub(crate) const HUNT_HOURS: Range = Range::fixed(2.0, 2.7);
pub(crate) const FLEE_HOURS: Range = Range::fixed(1.5, 2.0);
pub(crate) const FLEE_DAMAGE_FACTOR: f64 = 0.5;

// Fishing ------------------------------------------------------------------
pub(crate) const FISH_HOURS: Range = Range::fixed(0.8, 1.5);
pub(crate) const FISH_BITE_DELAY_SECS: Range = Range::fixed(3.0, 15.0);
pub(crate) const FISHER_DOUBLE_CATCH_CHANCE: f64 = 0.075;
