//! Lattice pricing inputs.
//!
//! [`LatticeParameters`] bundles the contract (option type, exercise style,
//! strike, maturity) with the market description the Cox-Ross-Rubinstein
//! lattice needs (spot, up/down factors, continuously-compounded rate) and
//! the number of time steps. Values are immutable once built; use
//! [`LatticeParameters::builder`] to construct validated instances.

use crate::exercise::ExerciseStyle;
use crate::payoff::OptionType;
use crr_core::errors::Result;
use crr_core::{ensure, format_rate, format_real, Rate, Real, Size, Time, Volatility};
use std::fmt;

/// Immutable input bundle for one lattice pricing call.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeParameters {
    option_type: OptionType,
    exercise_style: ExerciseStyle,
    strike: Real,
    initial_price: Real,
    up: Real,
    down: Real,
    risk_free_rate: Rate,
    time_to_maturity: Time,
    step_count: Size,
}

impl LatticeParameters {
    /// Start building a parameter set.
    ///
    /// Option type and exercise style default to a European call.
    pub fn builder() -> LatticeParametersBuilder {
        LatticeParametersBuilder::default()
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// European or American.
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    /// Strike price `K`.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Underlying price at the root, `S0`.
    pub fn initial_price(&self) -> Real {
        self.initial_price
    }

    /// Multiplicative up factor per step.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Multiplicative down factor per step.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Continuously-compounded annual risk-free rate.
    pub fn risk_free_rate(&self) -> Rate {
        self.risk_free_rate
    }

    /// Time to maturity in years.
    pub fn time_to_maturity(&self) -> Time {
        self.time_to_maturity
    }

    /// Number of time steps `N`; the lattice has `N + 1` levels.
    pub fn step_count(&self) -> Size {
        self.step_count
    }

    /// Length of one step in years, `T / N`.
    pub fn step_size(&self) -> Time {
        self.time_to_maturity / self.step_count as Real
    }

    /// The same contract and market with a different exercise style.
    pub fn with_exercise_style(mut self, exercise_style: ExerciseStyle) -> Self {
        self.exercise_style = exercise_style;
        self
    }

    /// The same contract and market with a different option type.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Check the numeric invariants the lattice relies on.
    ///
    /// Instances from the builder are always valid; deserialized ones are
    /// re-checked by the pricer through this method.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive and finite, got {}",
            self.strike
        );
        ensure!(
            self.initial_price.is_finite() && self.initial_price > 0.0,
            "initial price must be positive and finite, got {}",
            self.initial_price
        );
        ensure!(
            self.time_to_maturity.is_finite() && self.time_to_maturity > 0.0,
            "time to maturity must be positive and finite, got {}",
            self.time_to_maturity
        );
        ensure!(self.step_count > 0, "step count must be at least 1");
        ensure!(
            self.risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {}",
            self.risk_free_rate
        );
        ensure!(
            self.up.is_finite() && self.up > 0.0,
            "up factor must be positive and finite, got {}",
            self.up
        );
        ensure!(
            self.down.is_finite() && self.down > 0.0,
            "down factor must be positive and finite, got {}",
            self.down
        );
        ensure!(
            self.up != self.down,
            "up and down factors must differ, both are {}",
            self.up
        );
        Ok(())
    }
}

impl fmt::Display for LatticeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} K={} S0={} u={} d={} r={} T={} N={}",
            self.exercise_style,
            self.option_type,
            self.strike,
            self.initial_price,
            self.up,
            self.down,
            format_rate(self.risk_free_rate),
            format_real(self.time_to_maturity, 4),
            self.step_count
        )
    }
}

/// How the builder obtains the per-step factors.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Factors {
    Explicit { up: Real, down: Real },
    Volatility(Volatility),
}

/// Builder for [`LatticeParameters`].
///
/// # Example
/// ```
/// use crr_instruments::{ExerciseStyle, LatticeParameters, OptionType};
///
/// let params = LatticeParameters::builder()
///     .option_type(OptionType::Put)
///     .exercise_style(ExerciseStyle::American)
///     .strike(100.0)
///     .initial_price(100.0)
///     .factors(1.0604, 0.9431)
///     .risk_free_rate(0.1)
///     .time_to_maturity(1.0 / 3.0)
///     .step_count(4)
///     .build()
///     .unwrap();
/// assert_eq!(params.step_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LatticeParametersBuilder {
    option_type: Option<OptionType>,
    exercise_style: Option<ExerciseStyle>,
    strike: Option<Real>,
    initial_price: Option<Real>,
    factors: Option<Factors>,
    risk_free_rate: Option<Rate>,
    time_to_maturity: Option<Time>,
    step_count: Option<Size>,
}

impl LatticeParametersBuilder {
    /// Call or put (default: call).
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// European or American (default: European).
    pub fn exercise_style(mut self, exercise_style: ExerciseStyle) -> Self {
        self.exercise_style = Some(exercise_style);
        self
    }

    /// Strike price.
    pub fn strike(mut self, strike: Real) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Underlying price at the root.
    pub fn initial_price(mut self, initial_price: Real) -> Self {
        self.initial_price = Some(initial_price);
        self
    }

    /// Explicit per-step up and down factors.
    pub fn factors(mut self, up: Real, down: Real) -> Self {
        self.factors = Some(Factors::Explicit { up, down });
        self
    }

    /// Derive the factors from a volatility the CRR way:
    /// `up = exp(σ √Δt)`, `down = 1 / up`.
    pub fn volatility(mut self, sigma: Volatility) -> Self {
        self.factors = Some(Factors::Volatility(sigma));
        self
    }

    /// Continuously-compounded annual risk-free rate (default: 0).
    pub fn risk_free_rate(mut self, rate: Rate) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Time to maturity in years.
    pub fn time_to_maturity(mut self, time: Time) -> Self {
        self.time_to_maturity = Some(time);
        self
    }

    /// Number of time steps.
    pub fn step_count(mut self, steps: Size) -> Self {
        self.step_count = Some(steps);
        self
    }

    /// Validate and build the parameter set.
    ///
    /// Fails with [`Error::Precondition`](crr_core::Error::Precondition) when a
    /// required field is missing or a value is out of range.
    pub fn build(self) -> Result<LatticeParameters> {
        let Some(strike) = self.strike else {
            return Err(missing("strike"));
        };
        let Some(initial_price) = self.initial_price else {
            return Err(missing("initial_price"));
        };
        let Some(time_to_maturity) = self.time_to_maturity else {
            return Err(missing("time_to_maturity"));
        };
        let Some(step_count) = self.step_count else {
            return Err(missing("step_count"));
        };
        let (up, down) = match self.factors {
            Some(Factors::Explicit { up, down }) => (up, down),
            Some(Factors::Volatility(sigma)) => {
                ensure!(
                    sigma.is_finite() && sigma > 0.0,
                    "volatility must be positive and finite, got {sigma}"
                );
                ensure!(step_count > 0, "step count must be at least 1");
                let dt = time_to_maturity / step_count as Real;
                let up = (sigma * dt.sqrt()).exp();
                (up, 1.0 / up)
            }
            None => return Err(missing("factors or volatility")),
        };

        let params = LatticeParameters {
            option_type: self.option_type.unwrap_or(OptionType::Call),
            exercise_style: self.exercise_style.unwrap_or(ExerciseStyle::European),
            strike,
            initial_price,
            up,
            down,
            risk_free_rate: self.risk_free_rate.unwrap_or(0.0),
            time_to_maturity,
            step_count,
        };
        params.validate()?;
        Ok(params)
    }
}

fn missing(field: &str) -> crr_core::Error {
    crr_core::Error::Precondition(format!("missing required parameter: {field}"))
}
