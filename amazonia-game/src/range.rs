//! Inclusive numeric interval used for every randomized quantity in the game.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;
use crate::numbers::{ceil_f64_to_i64, floor_f64_to_i64};

/// Inclusive `[min, max]` interval. Operations return new values; a stored
/// range always satisfies `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct Range {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RangeBounds {
    min: f64,
    max: f64,
}

impl TryFrom<RangeBounds> for Range {
    type Error = GameError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.min, bounds.max)
    }
}

impl Range {
    /// Build a range, rejecting `min > max` and non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRange`] when the bounds are out of order
    /// or not finite.
    pub fn new(min: f64, max: f64) -> Result<Self, GameError> {
        if min.is_finite() && max.is_finite() && min <= max {
            Ok(Self { min, max })
        } else {
            Err(GameError::InvalidRange { min, max })
        }
    }

    /// Compile-time constant range. Callers guarantee `min <= max`.
    pub(crate) const fn fixed(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Uniform continuous draw in `[min, max]`.
    ///
    /// Interpolates between the bounds so spans wider than `f64::MAX` stay
    /// finite.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let t: f64 = rng.gen_range(0.0..=1.0);
        (self.min * (1.0 - t) + self.max * t).clamp(self.min, self.max)
    }

    /// Uniform integer draw inclusive of both integral endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidArgument`] when no integer lies inside the range.
    pub fn sample_int<R: Rng>(&self, rng: &mut R) -> Result<i64, GameError> {
        let low = ceil_f64_to_i64(self.min);
        let high = floor_f64_to_i64(self.max);
        if low > high {
            return Err(GameError::invalid(
                "range",
                format!("{self} contains no integer"),
            ));
        }
        Ok(rng.gen_range(low..=high))
    }

    /// Component-wise sum; always valid because both inputs are ordered.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Self {
        Self {
            min: self.min + other.min,
            max: self.max + other.max,
        }
    }

    /// Component-wise difference.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidRange`] when the result would be out of order.
    pub fn subtract(&self, other: &Self) -> Result<Self, GameError> {
        Self::new(self.min - other.min, self.max - other.max)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
