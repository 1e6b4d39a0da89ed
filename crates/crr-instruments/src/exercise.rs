//! Option exercise styles.
//!
//! The exercise style decides *when* the holder may exercise, which on the
//! lattice means whether backward induction compares the continuation value
//! against the immediate payoff.

use crr_core::errors::Error;
use crr_core::utilities::data_parsers::normalize_tag;
use std::fmt;
use std::str::FromStr;

/// Exercise right of an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExerciseStyle {
    /// Can only be exercised at expiry.
    European,
    /// Can be exercised at any lattice step up to and including expiry.
    American,
}

impl ExerciseStyle {
    /// Whether the holder may exercise before maturity.
    pub fn allows_early_exercise(self) -> bool {
        match self {
            ExerciseStyle::European => false,
            ExerciseStyle::American => true,
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "European"),
            ExerciseStyle::American => write!(f, "American"),
        }
    }
}

impl FromStr for ExerciseStyle {
    type Err = Error;

    /// Accepts `european` / `american` (or `e` / `a`) in any case.
    ///
    /// Anything else fails with [`Error::InvalidOptionSpecies`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_deref() {
            Some("european" | "e") => Ok(ExerciseStyle::European),
            Some("american" | "a") => Ok(ExerciseStyle::American),
            _ => Err(Error::InvalidOptionSpecies(s.to_string())),
        }
    }
}
