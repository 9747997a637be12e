//! Edible items carried in the player's inventory.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::range::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Food {
    Meat,
    Fish,
}

impl Food {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Meat => "Meat",
            Self::Fish => "Fish",
        }
    }

    /// Hunger restored per unit eaten.
    #[must_use]
    pub const fn nutritional_value(self) -> Range {
        match self {
            Self::Meat => Range::fixed(1.8, 2.5),
            Self::Fish => Range::fixed(0.8, 1.5),
        }
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meat_is_richer_than_fish() {
        assert!(Food::Meat.nutritional_value().average() > Food::Fish.nutritional_value().average());
        assert_eq!(Food::Fish.to_string(), "Fish");
    }
}
