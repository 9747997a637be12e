//! Jungle species that can be met while hunting.
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::day_period::DayPeriod;
use crate::range::Range;

/// Encounter order used by the weight table below.
pub const ANIMAL_ORDER: [Animal; 4] = [
    Animal::Jaguar,
    Animal::Caiman,
    Animal::Anaconda,
    Animal::Harpy,
];

/// Encounter weights per period, in [`ANIMAL_ORDER`]. Each row sums to 1.
const DAWN_WEIGHTS: [f64; 4] = [0.25, 0.10, 0.15, 0.50];
const MORNING_WEIGHTS: [f64; 4] = [0.05, 0.25, 0.10, 0.60];
const AFTERNOON_WEIGHTS: [f64; 4] = [0.10, 0.30, 0.10, 0.50];
const NIGHT_WEIGHTS: [f64; 4] = [0.20, 0.05, 0.35, 0.40];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Animal {
    Jaguar,
    Caiman,
    Anaconda,
    Harpy,
}

/// Fixed gameplay constants for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimalStats {
    pub damage: Range,
    /// Subtracted from the player's hunt success rate.
    pub hunt_tax: Range,
    /// Subtracted from the player's run success rate.
    pub run_tax: Range,
    /// Sampled as an integer.
    pub meat_drop: Range,
}

impl Animal {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jaguar => "Jaguar",
            Self::Caiman => "Caiman",
            Self::Anaconda => "Anaconda",
            Self::Harpy => "Harpy",
        }
    }

    /// Opaque handle for the presentation layer's artwork lookup.
    #[must_use]
    pub const fn art_key(self) -> &'static str {
        match self {
            Self::Jaguar => "animal.jaguar",
            Self::Caiman => "animal.caiman",
            Self::Anaconda => "animal.anaconda",
            Self::Harpy => "animal.harpy",
        }
    }

    #[must_use]
    pub const fn stats(self) -> AnimalStats {
        match self {
            Self::Jaguar => AnimalStats {
                damage: Range::fixed(4.5, 5.5),
                hunt_tax: Range::fixed(0.1, 0.1),
                run_tax: Range::fixed(0.2, 0.2),
                meat_drop: Range::fixed(3.0, 4.0),
            },
            Self::Caiman => AnimalStats {
                damage: Range::fixed(3.5, 4.5),
                hunt_tax: Range::fixed(0.075, 0.075),
                run_tax: Range::fixed(0.02, 0.02),
                meat_drop: Range::fixed(2.0, 3.0),
            },
            Self::Anaconda => AnimalStats {
                damage: Range::fixed(2.5, 3.5),
                hunt_tax: Range::fixed(0.06, 0.06),
                run_tax: Range::fixed(0.03, 0.03),
                meat_drop: Range::fixed(1.0, 2.0),
            },
            Self::Harpy => AnimalStats {
                damage: Range::fixed(1.5, 2.5),
                hunt_tax: Range::fixed(0.02, 0.02),
                run_tax: Range::fixed(0.05, 0.05),
                meat_drop: Range::fixed(1.0, 1.0),
            },
        }
    }

    #[must_use]
    pub const fn damage(self) -> Range {
        self.stats().damage
    }

    #[must_use]
    pub const fn hunt_tax(self) -> Range {
        self.stats().hunt_tax
    }

    #[must_use]
    pub const fn run_tax(self) -> Range {
        self.stats().run_tax
    }

    #[must_use]
    pub const fn meat_drop(self) -> Range {
        self.stats().meat_drop
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encounter weights for a period, in [`ANIMAL_ORDER`].
#[must_use]
pub const fn encounter_weights(period: DayPeriod) -> [f64; 4] {
    match period {
        DayPeriod::Dawn => DAWN_WEIGHTS,
        DayPeriod::Morning => MORNING_WEIGHTS,
        DayPeriod::Afternoon => AFTERNOON_WEIGHTS,
        DayPeriod::Night => NIGHT_WEIGHTS,
    }
}

/// Walk the cumulative distribution for `period` and return the first
/// species whose cumulative weight reaches `roll`. Rolls left above the last
/// sum by float drift fall back to the last species.
#[must_use]
pub fn animal_for_roll(period: DayPeriod, roll: f64) -> Animal {
    let mut cumulative = 0.0;
    for (animal, weight) in ANIMAL_ORDER.iter().zip(encounter_weights(period)) {
        cumulative += weight;
        if roll <= cumulative {
            return *animal;
        }
    }
    ANIMAL_ORDER[ANIMAL_ORDER.len() - 1]
}

/// Draw a species for the current period, `roll` uniform in `[0, 1)`.
pub fn pick_random_animal<R: Rng>(period: DayPeriod, rng: &mut R) -> Animal {
    let roll: f64 = rng.r#gen();
    let animal = animal_for_roll(period, roll);
    debug!("encounter roll {roll:.4} during {period} -> {animal}");
    animal
}
