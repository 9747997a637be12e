//! Fishing. The reaction minigame runs outside the core; its result arrives
//! as a [`FishingAttempt`].
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    EXP_FAILURE, EXP_SUCCESS, FISH_BITE_DELAY_SECS, FISH_HOURS, FISHER_DOUBLE_CATCH_CHANCE,
};
use crate::error::GameError;
use crate::manager::{GameManager, TimeReport, TimeTaxes};
use crate::player::{Player, SkillGrowth};
use crate::player_class::PlayerClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FishingAttempt {
    /// Pulled before the fish showed up.
    TooEarly,
    Caught,
    /// The reaction window closed first.
    TooLate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FishOutcome {
    Caught {
        fish_gained: u32,
        growth: SkillGrowth,
        report: TimeReport,
    },
    Missed {
        attempt: FishingAttempt,
        growth: SkillGrowth,
        report: TimeReport,
    },
}

impl FishOutcome {
    #[must_use]
    pub const fn report(&self) -> &TimeReport {
        match self {
            Self::Caught { report, .. } | Self::Missed { report, .. } => report,
        }
    }
}

/// Seconds before the fish bites.
pub fn bite_delay(rng: &mut impl Rng) -> f64 {
    FISH_BITE_DELAY_SECS.sample(rng)
}

/// Seconds the player has to react once the fish bites.
pub fn reaction_window(player: &Player, rng: &mut impl Rng) -> f64 {
    player.fish_pull_delay().sample(rng)
}

/// Classify a pull made `reaction_secs` after the bite; negative values mean
/// the pull came before it.
#[must_use]
pub fn classify_reaction(reaction_secs: f64, window_secs: f64) -> FishingAttempt {
    if reaction_secs < 0.0 {
        FishingAttempt::TooEarly
    } else if reaction_secs <= window_secs {
        FishingAttempt::Caught
    } else {
        FishingAttempt::TooLate
    }
}

/// Settle a fishing attempt. Fishers land a second fish 7.5% of the time.
///
/// # Errors
///
/// Propagates [`GameError`] from skill growth and the clock.
pub fn fish(
    manager: &mut GameManager,
    attempt: FishingAttempt,
    rng: &mut impl Rng,
) -> Result<FishOutcome, GameError> {
    let player = manager.player_mut();
    let caught = if attempt == FishingAttempt::Caught {
        let double = player.class() == PlayerClass::Fisher
            && rng.r#gen::<f64>() < FISHER_DOUBLE_CATCH_CHANCE;
        let fish_gained = if double { 2 } else { 1 };
        player.fish_amount = player.fish_amount.saturating_add(fish_gained);
        Some(fish_gained)
    } else {
        None
    };

    let exp = if caught.is_some() {
        EXP_SUCCESS.sample(rng)
    } else {
        EXP_FAILURE.sample(rng)
    };
    let growth = player.grow_fishing(exp, rng)?;
    debug!("fishing {attempt:?}: {caught:?} fish, growth {growth:?}");

    let report = manager.advance_time(FISH_HOURS.sample(rng), TimeTaxes::ALL, rng)?;
    Ok(match caught {
        Some(fish_gained) => FishOutcome::Caught {
            fish_gained,
            growth,
            report,
        },
        None => FishOutcome::Missed {
            attempt,
            growth,
            report,
        },
    })
}
