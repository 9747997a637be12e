//! Day period derived from the 24-hour clock.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quarter of the day; drives animal encounter odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Dawn,
    Morning,
    Afternoon,
    Night,
}

impl DayPeriod {
    pub const ALL: [Self; 4] = [Self::Dawn, Self::Morning, Self::Afternoon, Self::Night];

    /// Map a clock time in hours to its period: `[0,6)` dawn, `[6,12)`
    /// morning, `[12,18)` afternoon, anything later night.
    #[must_use]
    pub fn from_time(time: f64) -> Self {
        if time < 6.0 {
            Self::Dawn
        } else if time < 12.0 {
            Self::Morning
        } else if time < 18.0 {
            Self::Afternoon
        } else {
            Self::Night
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dawn => "Dawn",
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
