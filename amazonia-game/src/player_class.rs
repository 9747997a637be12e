//! Character specializations chosen at creation.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;
use crate::player::{Player, Skill};
use crate::range::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Hunter,
    Fisher,
}

/// Permanent skill offsets granted by a class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassBuff {
    pub fish_pull_delay: Range,
    pub hunt_success_rate: Range,
    pub run_success_rate: Range,
}

const NO_BUFF: Range = Range::fixed(0.0, 0.0);

impl PlayerClass {
    pub const ALL: [Self; 2] = [Self::Hunter, Self::Fisher];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hunter => "Hunter",
            Self::Fisher => "Fisher",
        }
    }

    #[must_use]
    pub const fn buff(self) -> ClassBuff {
        match self {
            Self::Hunter => ClassBuff {
                fish_pull_delay: NO_BUFF,
                hunt_success_rate: Range::fixed(0.1, 0.1),
                run_success_rate: Range::fixed(0.1, 0.1),
            },
            Self::Fisher => ClassBuff {
                fish_pull_delay: Range::fixed(0.2, 0.2),
                hunt_success_rate: NO_BUFF,
                run_success_rate: NO_BUFF,
            },
        }
    }

    /// Whether experience for `skill` earns this class's bonus multiplier.
    #[must_use]
    pub const fn favors(self, skill: Skill) -> bool {
        matches!(
            (self, skill),
            (Self::Fisher, Skill::Fishing) | (Self::Hunter, Skill::Hunting | Skill::Running)
        )
    }

    /// Add the class offsets to the player's skill ranges. Called once, at
    /// character creation.
    pub fn apply_buff(self, player: &mut Player) {
        player.apply_skill_offsets(&self.buff());
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerClass {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hunter" => Ok(Self::Hunter),
            "Fisher" => Ok(Self::Fisher),
            other => Err(GameError::UnknownVariant(format!("player class {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for class in PlayerClass::ALL {
            assert_eq!(class.name().parse::<PlayerClass>(), Ok(class));
        }
        assert!(matches!(
            "Shaman".parse::<PlayerClass>(),
            Err(GameError::UnknownVariant(_))
        ));
    }

    #[test]
    fn class_bonus_matches_associated_skills() {
        assert!(PlayerClass::Fisher.favors(Skill::Fishing));
        assert!(!PlayerClass::Fisher.favors(Skill::Hunting));
        assert!(PlayerClass::Hunter.favors(Skill::Hunting));
        assert!(PlayerClass::Hunter.favors(Skill::Running));
        assert!(!PlayerClass::Hunter.favors(Skill::Fishing));
    }

    #[test]
    fn hunter_buff_raises_hunt_and_run_rates() {
        let mut player = Player::new("Ana", PlayerClass::Hunter).unwrap();
        PlayerClass::Hunter.apply_buff(&mut player);
        assert!((player.hunt_success_rate().min() - 0.4).abs() < 1e-12);
        assert!((player.hunt_success_rate().max() - 0.5).abs() < 1e-12);
        assert!((player.run_success_rate().min() - 0.45).abs() < 1e-12);
        assert!((player.run_success_rate().max() - 0.6).abs() < 1e-12);
        assert!((player.fish_pull_delay().min() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn fisher_buff_widens_pull_delay() {
        let mut player = Player::new("Rio", PlayerClass::Fisher).unwrap();
        PlayerClass::Fisher.apply_buff(&mut player);
        assert!((player.fish_pull_delay().min() - 0.5).abs() < 1e-12);
        assert!((player.fish_pull_delay().max() - 0.6).abs() < 1e-12);
        assert!((player.hunt_success_rate().max() - 0.4).abs() < 1e-12);
    }
}
