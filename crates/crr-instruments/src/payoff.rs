//! Option payoffs.
//!
//! A payoff is the value of exercising an option immediately, as a
//! function of the underlying asset price. The lattice evaluates it at every
//! node, not only at maturity, since American exercise compares against it
//! at each step.

use crr_core::errors::Error;
use crr_core::utilities::data_parsers::normalize_tag;
use crr_core::Real;
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    /// Accepts `call` / `put` (or `c` / `p`) in any case.
    ///
    /// Anything else fails with [`Error::InvalidOptionType`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_deref() {
            Some("call" | "c") => Ok(OptionType::Call),
            Some("put" | "p") => Ok(OptionType::Put),
            _ => Err(Error::InvalidOptionType(s.to_string())),
        }
    }
}

/// Intrinsic value of a vanilla option at `underlying_price`.
///
/// `max(0, S − K)` for a call, `max(0, K − S)` for a put.
///
/// # Example
/// ```
/// use crr_instruments::{compute_payoff, OptionType};
/// assert_eq!(compute_payoff(OptionType::Call, 110.0, 100.0), 10.0);
/// assert_eq!(compute_payoff(OptionType::Put, 110.0, 100.0), 0.0);
/// ```
pub fn compute_payoff(option_type: OptionType, underlying_price: Real, strike: Real) -> Real {
    let intrinsic = option_type.sign() * (underlying_price - strike);
    // floor without producing -0.0 at the money
    if intrinsic > 0.0 {
        intrinsic
    } else {
        0.0
    }
}

/// Payoff of an option as a function of the underlying price.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// Standard "plain vanilla" European/American option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        compute_payoff(self.option_type, price, self.strike)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}
