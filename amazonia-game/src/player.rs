//! Player character: vitals, skills, and inventory.
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CLASS_EXP_BONUS, START_ENERGY, START_FISH_PULL_DELAY, START_HP, START_HUNGER,
    START_HUNT_SUCCESS_RATE, START_RUN_SUCCESS_RATE, SUCCESS_RATE_CEILING,
};
use crate::error::GameError;
use crate::food::Food;
use crate::player_class::{ClassBuff, PlayerClass};
use crate::range::Range;

/// A depletable stat bounded to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vital {
    current: f64,
    max: f64,
}

impl Vital {
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when `max` is not positive or
    /// `current` lies outside `[0, max]`.
    pub fn new(field: &'static str, current: f64, max: f64) -> Result<Self, GameError> {
        if !(max.is_finite() && max > 0.0) {
            return Err(GameError::invalid(
                field,
                format!("maximum must be positive (got {max})"),
            ));
        }
        if !(0.0..=max).contains(&current) {
            return Err(GameError::invalid(
                field,
                format!("{current} must lie within 0..={max}"),
            ));
        }
        Ok(Self { current, max })
    }

    const fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// True when the current value is strictly below `ratio` of the maximum.
    #[must_use]
    pub fn is_below(&self, ratio: f64) -> bool {
        self.current < self.max * ratio
    }

    fn drain(&mut self, amount: f64) {
        self.current = (self.current - amount).max(0.0);
    }

    fn restore(&mut self, amount: f64) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Skills that improve with experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Fishing,
    Hunting,
    Running,
}

impl Skill {
    /// Whether a bound value stays inside the skill's domain. Every bound
    /// must also stay finite.
    fn within_ceiling(self, value: f64) -> bool {
        value.is_finite()
            && match self {
                Self::Fishing => true,
                Self::Hunting => value < SUCCESS_RATE_CEILING,
                Self::Running => value <= SUCCESS_RATE_CEILING,
            }
    }
}

/// Result of a single skill growth roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillGrowth {
    /// The lower bound rose by the contained amount.
    Lower(f64),
    /// The upper bound rose by the contained amount.
    Upper(f64),
    /// The chosen bound would have crossed its ceiling or the other bound.
    Wasted,
}

impl SkillGrowth {
    #[must_use]
    pub const fn gained(&self) -> f64 {
        match self {
            Self::Lower(amount) | Self::Upper(amount) => *amount,
            Self::Wasted => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    class: PlayerClass,
    hp: Vital,
    hunger: Vital,
    energy: Vital,
    fish_pull_delay: Range,
    hunt_success_rate: Range,
    run_success_rate: Range,
    pub fish_amount: u32,
    pub meat_amount: u32,
}

impl Player {
    /// Player with the fixed starting constants and no class buff applied.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when the name is blank.
    pub fn new(name: &str, class: PlayerClass) -> Result<Self, GameError> {
        Ok(Self {
            name: validate_name(name)?,
            class,
            hp: Vital::full(START_HP),
            hunger: Vital::full(START_HUNGER),
            energy: Vital::full(START_ENERGY),
            fish_pull_delay: START_FISH_PULL_DELAY,
            hunt_success_rate: START_HUNT_SUCCESS_RATE,
            run_success_rate: START_RUN_SUCCESS_RATE,
            fish_amount: 0,
            meat_amount: 0,
        })
    }

    /// Character creation: starting constants plus the class buff.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when the name is blank.
    pub fn create(name: &str, class: PlayerClass) -> Result<Self, GameError> {
        let mut player = Self::new(name, class)?;
        class.apply_buff(&mut player);
        Ok(player)
    }

    /// Rebuild a player from stored parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a blank name.
    pub fn from_parts(parts: PlayerParts) -> Result<Self, GameError> {
        Ok(Self {
            name: validate_name(&parts.name)?,
            class: parts.class,
            hp: parts.hp,
            hunger: parts.hunger,
            energy: parts.energy,
            fish_pull_delay: parts.fish_pull_delay,
            hunt_success_rate: parts.hunt_success_rate,
            run_success_rate: parts.run_success_rate,
            fish_amount: parts.fish_amount,
            meat_amount: parts.meat_amount,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn class(&self) -> PlayerClass {
        self.class
    }

    #[must_use]
    pub const fn hp(&self) -> Vital {
        self.hp
    }

    #[must_use]
    pub const fn hunger(&self) -> Vital {
        self.hunger
    }

    #[must_use]
    pub const fn energy(&self) -> Vital {
        self.energy
    }

    #[must_use]
    pub const fn fish_pull_delay(&self) -> Range {
        self.fish_pull_delay
    }

    #[must_use]
    pub const fn hunt_success_rate(&self) -> Range {
        self.hunt_success_rate
    }

    #[must_use]
    pub const fn run_success_rate(&self) -> Range {
        self.run_success_rate
    }

    #[must_use]
    pub const fn skill(&self, skill: Skill) -> Range {
        match skill {
            Skill::Fishing => self.fish_pull_delay,
            Skill::Hunting => self.hunt_success_rate,
            Skill::Running => self.run_success_rate,
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp.current > 0.0
    }

    #[must_use]
    pub const fn food_amount(&self, food: Food) -> u32 {
        match food {
            Food::Meat => self.meat_amount,
            Food::Fish => self.fish_amount,
        }
    }

    pub(crate) const fn food_amount_mut(&mut self, food: Food) -> &mut u32 {
        match food {
            Food::Meat => &mut self.meat_amount,
            Food::Fish => &mut self.fish_amount,
        }
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn take_damage(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("damage", amount)?;
        let was_alive = self.is_alive();
        self.hp.drain(amount);
        if was_alive && !self.is_alive() {
            info!("{} has died", self.name);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn heal(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("heal amount", amount)?;
        self.hp.restore(amount);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn take_energy(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("energy amount", amount)?;
        self.energy.drain(amount);
        Ok(())
    }

    /// Sleep restores energy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn restore_energy(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("sleep amount", amount)?;
        self.energy.restore(amount);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn take_hunger(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("hunger amount", amount)?;
        self.hunger.drain(amount);
        Ok(())
    }

    /// Eating refills the hunger gauge.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for a negative amount.
    pub fn feed(&mut self, amount: f64) -> Result<(), GameError> {
        GameError::check_magnitude("eat amount", amount)?;
        self.hunger.restore(amount);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for negative experience.
    pub fn grow_fishing<R: Rng>(&mut self, exp: f64, rng: &mut R) -> Result<SkillGrowth, GameError> {
        self.grow_skill(Skill::Fishing, exp, rng)
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for negative experience.
    pub fn grow_hunting<R: Rng>(&mut self, exp: f64, rng: &mut R) -> Result<SkillGrowth, GameError> {
        self.grow_skill(Skill::Hunting, exp, rng)
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for negative experience.
    pub fn grow_running<R: Rng>(&mut self, exp: f64, rng: &mut R) -> Result<SkillGrowth, GameError> {
        self.grow_skill(Skill::Running, exp, rng)
    }

    /// Widen one bound of a skill range.
    ///
    /// The class bonus multiplies `exp` when the class favors the skill. A
    /// coin flip picks the bound; the gain lands only when the lower bound
    /// stays strictly under the upper one and the bound respects the skill
    /// ceiling (hunting `< 1`, running `<= 1`, fishing only finite).
    /// Otherwise the roll is wasted.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] for negative experience.
    pub fn grow_skill<R: Rng>(
        &mut self,
        skill: Skill,
        exp: f64,
        rng: &mut R,
    ) -> Result<SkillGrowth, GameError> {
        GameError::check_magnitude("exp", exp)?;

        let mut amount = exp;
        if self.class.favors(skill) {
            amount *= CLASS_EXP_BONUS.sample(rng);
        }

        let current = self.skill(skill);
        let growth = if rng.gen_range(1..=2_u8) == 1 {
            let raised = current.min() + amount;
            if raised < current.max() && skill.within_ceiling(raised) {
                *self.skill_mut(skill) = Range::new(raised, current.max())?;
                SkillGrowth::Lower(amount)
            } else {
                SkillGrowth::Wasted
            }
        } else {
            let raised = current.max() + amount;
            if skill.within_ceiling(raised) {
                *self.skill_mut(skill) = Range::new(current.min(), raised)?;
                SkillGrowth::Upper(amount)
            } else {
                SkillGrowth::Wasted
            }
        };

        debug!(
            "{} {skill:?} growth {growth:?} -> {}",
            self.name,
            self.skill(skill)
        );
        Ok(growth)
    }

    pub(crate) fn apply_skill_offsets(&mut self, buff: &ClassBuff) {
        self.fish_pull_delay = self.fish_pull_delay.add(&buff.fish_pull_delay);
        self.hunt_success_rate = self.hunt_success_rate.add(&buff.hunt_success_rate);
        self.run_success_rate = self.run_success_rate.add(&buff.run_success_rate);
    }

    const fn skill_mut(&mut self, skill: Skill) -> &mut Range {
        match skill {
            Skill::Fishing => &mut self.fish_pull_delay,
            Skill::Hunting => &mut self.hunt_success_rate,
            Skill::Running => &mut self.run_success_rate,
        }
    }
}

/// Validated building blocks for [`Player::from_parts`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerParts {
    pub name: String,
    pub class: PlayerClass,
    pub hp: Vital,
    pub hunger: Vital,
    pub energy: Vital,
    pub fish_pull_delay: Range,
    pub hunt_success_rate: Range,
    pub run_success_rate: Range,
    pub fish_amount: u32,
    pub meat_amount: u32,
}

fn validate_name(name: &str) -> Result<String, GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::invalid("name", "must not be blank"));
    }
    Ok(name.to_string())
}
