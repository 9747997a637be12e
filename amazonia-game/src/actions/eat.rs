//! Eating from the inventory.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{EAT_HEAL_FACTOR, EAT_HOURS_PER_UNIT};
use crate::error::GameError;
use crate::food::Food;
use crate::manager::{GameManager, TimeReport, TimeTaxes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EatBlockReason {
    NotEnoughFood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EatOutcome {
    Ate {
        food: Food,
        amount: u32,
        nutrition: f64,
        heal: f64,
        report: TimeReport,
    },
    Blocked(EatBlockReason),
}

/// Eat `amount` units of `food`.
///
/// One nutrition sample is shared by every unit. Hunger is not taxed for the
/// time spent eating.
///
/// # Errors
///
/// Returns [`GameError::InvalidArgument`] when `amount` is zero.
pub fn eat(
    manager: &mut GameManager,
    food: Food,
    amount: u32,
    rng: &mut impl Rng,
) -> Result<EatOutcome, GameError> {
    if amount == 0 {
        return Err(GameError::invalid("amount", "must eat at least one unit"));
    }
    let held = manager.player().food_amount(food);
    if held < amount {
        return Ok(EatOutcome::Blocked(EatBlockReason::NotEnoughFood));
    }

    let units = f64::from(amount);
    let nutrition = units * food.nutritional_value().sample(rng);
    let heal = nutrition * EAT_HEAL_FACTOR.sample(rng);

    let player = manager.player_mut();
    *player.food_amount_mut(food) = held - amount;
    player.feed(nutrition)?;
    player.heal(heal)?;
    debug!("ate {amount} {food}: +{nutrition:.2} hunger, +{heal:.2} hp");

    let hours = units * EAT_HOURS_PER_UNIT.sample(rng);
    let report = manager.advance_time(hours, TimeTaxes::NO_HUNGER, rng)?;
    Ok(EatOutcome::Ate {
        food,
        amount,
        nutrition,
        heal,
        report,
    })
}
