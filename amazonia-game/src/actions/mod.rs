//! Timed actions. Each resolver mutates the player, advances the clock, and
//! returns an outcome carrying the [`TimeReport`](crate::manager::TimeReport).
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod eat;
pub mod fish;
pub mod hunt;
pub mod sleep;

pub use eat::{EatBlockReason, EatOutcome, eat};
pub use fish::{FishOutcome, FishingAttempt, bite_delay, classify_reaction, fish, reaction_window};
pub use hunt::{FightOutcome, FleeOutcome, encounter, fight, flee};
pub use sleep::{SleepBlockReason, SleepOutcome, sleep, too_hungry_to_sleep};

/// Tag for tallying resolved actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Eat,
    Sleep,
    Fish,
    Fight,
    Flee,
}

impl ActionKind {
    pub const ALL: [Self; 5] = [Self::Eat, Self::Sleep, Self::Fish, Self::Fight, Self::Flee];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eat => "eat",
            Self::Sleep => "sleep",
            Self::Fish => "fish",
            Self::Fight => "fight",
            Self::Flee => "flee",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
