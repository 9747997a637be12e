//! Session clock and the time-based tax engine.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::config::{ConfigError, TimeTaxConfig};
use crate::constants::{HOURS_PER_DAY, START_TIME};
use crate::day_period::DayPeriod;
use crate::error::GameError;
use crate::format::{format_clock, format_duration, format_float};
use crate::numbers::floor_f64_to_u32;
use crate::player::Player;

/// Which vitals a time advance drains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTaxes {
    pub energy: bool,
    pub hunger: bool,
}

impl TimeTaxes {
    pub const ALL: Self = Self {
        energy: true,
        hunger: true,
    };
    /// Sleeping restores energy instead of spending it.
    pub const NO_ENERGY: Self = Self {
        energy: false,
        hunger: true,
    };
    /// Eating already settles the hunger gauge.
    pub const NO_HUNGER: Self = Self {
        energy: true,
        hunger: false,
    };
}

impl Default for TimeTaxes {
    fn default() -> Self {
        Self::ALL
    }
}

/// One line of a [`TimeReport`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxEntry {
    EnergyLost(f64),
    HungerTax(f64),
    TiredHpTax(f64),
    HungryHpTax(f64),
}

impl fmt::Display for TaxEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnergyLost(amount) => write!(f, "Energy lost: {}", format_float(*amount, 2)),
            Self::HungerTax(amount) => write!(f, "Hunger tax: {}", format_float(*amount, 2)),
            Self::TiredHpTax(amount) => {
                write!(f, "You're tired. HP tax: {}", format_float(*amount, 2))
            }
            Self::HungryHpTax(amount) => {
                write!(f, "You're hungry. HP tax: {}", format_float(*amount, 2))
            }
        }
    }
}

/// Breakdown of what a time advance cost the player.
///
/// Entries appear in a fixed order: energy lost, hunger tax, tiredness HP
/// tax, hunger HP tax; each only when it applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeReport {
    pub hours: f64,
    pub days_rolled: u32,
    pub entries: SmallVec<[TaxEntry; 4]>,
}

impl TimeReport {
    /// Total HP lost to the tiredness and hunger penalties.
    #[must_use]
    pub fn hp_lost(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| match entry {
                TaxEntry::TiredHpTax(amount) | TaxEntry::HungryHpTax(amount) => *amount,
                TaxEntry::EnergyLost(_) | TaxEntry::HungerTax(_) => 0.0,
            })
            .sum()
    }
}

impl fmt::Display for TimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} have passed: ", format_duration(self.hours))?;
        for entry in &self.entries {
            write!(f, "\n    * {entry}")?;
        }
        Ok(())
    }
}

/// Owns the player and the wrapping day clock.
#[derive(Debug, Clone, PartialEq)]
pub struct GameManager {
    player: Player,
    time: f64,
    days_survived: u32,
    taxes: TimeTaxConfig,
}

impl GameManager {
    /// New session starting at 08:00 on day zero.
    #[must_use]
    pub fn new(player: Player) -> Self {
        Self {
            player,
            time: START_TIME,
            days_survived: 0,
            taxes: TimeTaxConfig::default_config(),
        }
    }

    /// Session with an explicit clock, as restored from a save.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when `time` lies outside `[0, 24)`.
    pub fn with_clock(player: Player, time: f64, days_survived: u32) -> Result<Self, GameError> {
        if !(0.0..HOURS_PER_DAY).contains(&time) {
            return Err(GameError::invalid(
                "time",
                format!("must lie within 0..24 (got {time})"),
            ));
        }
        Ok(Self {
            player,
            time,
            days_survived,
            taxes: TimeTaxConfig::default_config(),
        })
    }

    /// Replace the tax tunables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `taxes` fails validation.
    pub fn with_tax_config(self, taxes: TimeTaxConfig) -> Result<Self, ConfigError> {
        taxes.validate()?;
        Ok(self.with_validated_taxes(taxes))
    }

    /// Callers guarantee `taxes` already passed [`TimeTaxConfig::validate`].
    pub(crate) fn with_validated_taxes(mut self, taxes: TimeTaxConfig) -> Self {
        self.taxes = taxes;
        self
    }

    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    pub const fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub const fn days_survived(&self) -> u32 {
        self.days_survived
    }

    #[must_use]
    pub const fn tax_config(&self) -> &TimeTaxConfig {
        &self.taxes
    }

    #[must_use]
    pub fn day_period(&self) -> DayPeriod {
        DayPeriod::from_time(self.time)
    }

    /// Current clock reading as `HH:MM`.
    #[must_use]
    pub fn clock_label(&self) -> String {
        format_clock(self.time).unwrap_or_else(|_| format_duration(self.time))
    }

    /// Advance the clock and charge the player for the elapsed hours.
    ///
    /// Multi-day jumps roll in one step. The HP penalties read energy and
    /// hunger as they stood before this call's own taxes, so a tax that
    /// crosses the critical ratio only bites on the next advance. The hunger
    /// tax sample is drawn even when hunger is not charged.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when `hours` is not positive or
    /// a sampled tax is negative; the manager is left unchanged.
    pub fn advance_time<R: Rng>(
        &mut self,
        hours: f64,
        taxes: TimeTaxes,
        rng: &mut R,
    ) -> Result<TimeReport, GameError> {
        if !(hours.is_finite() && hours > 0.0) {
            return Err(GameError::invalid(
                "hours",
                format!("must be positive (got {hours})"),
            ));
        }

        let tired_hp_tax = if self.player.energy().is_below(self.taxes.critical_ratio) {
            Some(hours * self.taxes.tired_hp_tax.sample(rng))
        } else {
            None
        };
        let hungry_hp_tax = if self.player.hunger().is_below(self.taxes.critical_ratio) {
            Some(hours * self.taxes.hungry_hp_tax.sample(rng))
        } else {
            None
        };
        let hunger_tax = hours * self.taxes.hunger_tax.sample(rng);

        // Nothing changes unless every tax is a legal magnitude.
        for (field, amount) in [
            ("tired hp tax", tired_hp_tax),
            ("hungry hp tax", hungry_hp_tax),
            ("hunger tax", Some(hunger_tax)),
        ] {
            if let Some(amount) = amount {
                GameError::check_magnitude(field, amount)?;
            }
        }

        let days_rolled = self.roll_clock(hours);
        if let Some(tax) = tired_hp_tax {
            self.player.take_damage(tax)?;
        }
        if let Some(tax) = hungry_hp_tax {
            self.player.take_damage(tax)?;
        }
        if taxes.energy {
            self.player.take_energy(hours)?;
        }
        if taxes.hunger {
            self.player.take_hunger(hunger_tax)?;
        }

        let mut entries = SmallVec::new();
        if taxes.energy {
            entries.push(TaxEntry::EnergyLost(hours));
        }
        if taxes.hunger {
            entries.push(TaxEntry::HungerTax(hunger_tax));
        }
        if let Some(tax) = tired_hp_tax {
            entries.push(TaxEntry::TiredHpTax(tax));
        }
        if let Some(tax) = hungry_hp_tax {
            entries.push(TaxEntry::HungryHpTax(tax));
        }

        let report = TimeReport {
            hours,
            days_rolled,
            entries,
        };
        debug!(
            "advanced {hours:.2}h to {} (day {}): {:?}",
            self.clock_label(),
            self.days_survived,
            report.entries
        );
        Ok(report)
    }

    fn roll_clock(&mut self, hours: f64) -> u32 {
        self.time += hours;
        if self.time < HOURS_PER_DAY {
            return 0;
        }
        let rolled = floor_f64_to_u32(self.time / HOURS_PER_DAY);
        self.days_survived = self.days_survived.saturating_add(rolled);
        self.time %= HOURS_PER_DAY;
        debug!("day rollover x{rolled}; {} days survived", self.days_survived);
        rolled
    }

    /// Consume the manager, returning the player.
    #[must_use]
    pub fn into_player(self) -> Player {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Vital;
    use crate::player_class::PlayerClass;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn manager_at(time: f64) -> GameManager {
        let player = Player::create("Ana", PlayerClass::Hunter).unwrap();
        GameManager::with_clock(player, time, 0).unwrap()
    }

    fn starving_player(energy: f64, hunger: f64) -> Player {
        let base = Player::new("Ana", PlayerClass::Fisher).unwrap();
        Player::from_parts(crate::player::PlayerParts {
            name: base.name().to_string(),
            class: base.class(),
            hp: base.hp(),
            hunger: Vital::new("hunger", hunger, 20.0).unwrap(),
            energy: Vital::new("energy", energy, 16.0).unwrap(),
            fish_pull_delay: base.fish_pull_delay(),
            hunt_success_rate: base.hunt_success_rate(),
            run_success_rate: base.run_success_rate(),
            fish_amount: 0,
            meat_amount: 0,
        })
        .unwrap()
    }

    #[test]
    fn new_manager_starts_at_eight() {
        let manager = GameManager::new(Player::new("Ana", PlayerClass::Hunter).unwrap());
        assert!((manager.time() - 8.0).abs() < f64::EPSILON);
        assert_eq!(manager.days_survived(), 0);
        assert_eq!(manager.day_period(), DayPeriod::Morning);
        assert_eq!(manager.clock_label(), "08:00");
    }

    #[test]
    fn clock_constructor_rejects_out_of_range_time() {
        let player = Player::new("Ana", PlayerClass::Hunter).unwrap();
        assert!(GameManager::with_clock(player.clone(), 24.0, 0).is_err());
        assert!(GameManager::with_clock(player, -1.0, 0).is_err());
    }

    #[test]
    fn non_positive_hours_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut manager = manager_at(10.0);
        assert!(manager.advance_time(0.0, TimeTaxes::ALL, &mut rng).is_err());
        assert!(manager.advance_time(-2.0, TimeTaxes::ALL, &mut rng).is_err());
        assert!((manager.time() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn multi_day_jumps_roll_in_one_step() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut manager = manager_at(20.0);
        let report = manager.advance_time(30.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!((manager.time() - 2.0).abs() < 1e-9);
        assert_eq!(manager.days_survived(), 2);
        assert_eq!(report.days_rolled, 2);

        let mut manager = manager_at(10.0);
        manager.advance_time(50.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!((manager.time() - 12.0).abs() < 1e-9);
        assert_eq!(manager.days_survived(), 2);
    }

    #[test]
    fn single_rollover_lands_past_midnight() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut manager = manager_at(23.0);
        manager.advance_time(2.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!((manager.time() - 1.0).abs() < 1e-9);
        assert_eq!(manager.days_survived(), 1);
        assert_eq!(manager.day_period(), DayPeriod::Dawn);
    }

    #[test]
    fn healthy_player_pays_energy_and_hunger_only() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut manager = manager_at(8.0);
        let report = manager.advance_time(2.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert!(matches!(report.entries[0], TaxEntry::EnergyLost(h) if (h - 2.0).abs() < 1e-12));
        let TaxEntry::HungerTax(hunger_tax) = report.entries[1] else {
            panic!("expected hunger tax entry");
        };
        assert!((0.9..=1.3).contains(&hunger_tax));
        assert!((manager.player().energy().current() - 14.0).abs() < 1e-9);
        assert!((manager.player().hunger().current() - (20.0 - hunger_tax)).abs() < 1e-9);
        assert!((manager.player().hp().current() - 20.0).abs() < f64::EPSILON);
        assert!(report.hp_lost().abs() < f64::EPSILON);
    }

    #[test]
    fn disabled_taxes_are_omitted_from_report() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut manager = manager_at(8.0);
        let report = manager
            .advance_time(3.0, TimeTaxes::NO_ENERGY, &mut rng)
            .unwrap();
        assert!(matches!(report.entries.as_slice(), [TaxEntry::HungerTax(_)]));
        assert!((manager.player().energy().current() - 16.0).abs() < f64::EPSILON);

        let report = manager
            .advance_time(1.0, TimeTaxes::NO_HUNGER, &mut rng)
            .unwrap();
        assert!(matches!(report.entries.as_slice(), [TaxEntry::EnergyLost(_)]));
    }

    #[test]
    fn critical_vitals_cost_hp_in_fixed_order() {
        let mut rng = SmallRng::seed_from_u64(6);
        let player = starving_player(3.0, 3.0);
        let mut manager = GameManager::with_clock(player, 9.0, 0).unwrap();
        let report = manager.advance_time(2.0, TimeTaxes::ALL, &mut rng).unwrap();
        let [
            TaxEntry::EnergyLost(_),
            TaxEntry::HungerTax(_),
            TaxEntry::TiredHpTax(tired),
            TaxEntry::HungryHpTax(hungry),
        ] = report.entries.as_slice()
        else {
            panic!("unexpected report layout: {:?}", report.entries);
        };
        assert!((0.6..=0.8).contains(tired));
        assert!((0.8..=0.9).contains(hungry));
        let expected_hp = 20.0 - tired - hungry;
        assert!((manager.player().hp().current() - expected_hp).abs() < 1e-9);
    }

    #[test]
    fn penalties_read_vitals_before_this_calls_tax() {
        let mut rng = SmallRng::seed_from_u64(7);
        // 3.3 energy is above 20% of 16; spending 2h drops it below.
        let player = starving_player(3.3, 20.0);
        let mut manager = GameManager::with_clock(player, 9.0, 0).unwrap();
        let first = manager.advance_time(2.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!(first.hp_lost().abs() < f64::EPSILON);
        let second = manager.advance_time(1.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!(matches!(second.entries.last(), Some(TaxEntry::TiredHpTax(_))));
    }

    #[test]
    fn report_renders_lines_in_order() {
        let mut entries = SmallVec::new();
        entries.push(TaxEntry::EnergyLost(2.0));
        entries.push(TaxEntry::HungerTax(1.234));
        entries.push(TaxEntry::HungryHpTax(0.85));
        let report = TimeReport {
            hours: 2.0,
            days_rolled: 0,
            entries,
        };
        assert_eq!(
            report.to_string(),
            "02:00 have passed: \n    * Energy lost: 2.00\n    * Hunger tax: 1.23\n    * You're hungry. HP tax: 0.85"
        );
    }

    #[test]
    fn custom_tax_config_is_honored() {
        let mut rng = SmallRng::seed_from_u64(8);
        let config = TimeTaxConfig::from_json(r#"{"hunger_tax": {"min": 1.0, "max": 1.0}}"#)
            .unwrap();
        let mut manager = manager_at(8.0).with_tax_config(config).unwrap();
        manager.advance_time(2.0, TimeTaxes::ALL, &mut rng).unwrap();
        assert!((manager.player().hunger().current() - 18.0).abs() < 1e-9);
    }

    fn negative_hunger_tax() -> TimeTaxConfig {
        TimeTaxConfig {
            hunger_tax: crate::range::Range::new(-1.0, -0.5).unwrap(),
            ..TimeTaxConfig::default()
        }
    }

    #[test]
    fn invalid_tax_config_is_rejected() {
        assert!(matches!(
            manager_at(20.0).with_tax_config(negative_hunger_tax()),
            Err(ConfigError::NegativeTax {
                field: "hunger_tax",
                ..
            })
        ));
    }

    #[test]
    fn failed_advance_leaves_state_untouched() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut manager = manager_at(20.0).with_validated_taxes(negative_hunger_tax());
        let before = manager.clone();
        assert!(matches!(
            manager.advance_time(6.0, TimeTaxes::ALL, &mut rng),
            Err(GameError::InvalidArgument {
                field: "hunger tax",
                ..
            })
        ));
        assert_eq!(manager, before);
        assert!((manager.time() - 20.0).abs() < f64::EPSILON);
        assert_eq!(manager.days_survived(), 0);
    }
}
