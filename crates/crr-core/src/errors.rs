//! Error types for the crr workspace.
//!
//! Every fallible operation returns the single `thiserror`-derived [`Error`]
//! enum. Precondition checks go through the [`ensure!`](crate::ensure)
//! convenience macro defined here.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An option-type tag that is neither a call nor a put.
    #[error("invalid option type: {0:?} (expected \"call\" or \"put\")")]
    InvalidOptionType(String),

    /// An exercise-style tag that is neither European nor American.
    #[error("invalid option species: {0:?} (expected \"european\" or \"american\")")]
    InvalidOptionSpecies(String),

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// The up/down factors and the one-step growth admit an arbitrage, so the
    /// risk-neutral probability falls outside [0, 1].
    #[error(
        "arbitrage: risk-neutral probability {probability} outside [0, 1] \
         (down = {down}, growth = {growth}, up = {up})"
    )]
    Arbitrage {
        /// The offending risk-neutral up probability.
        probability: f64,
        /// The up factor.
        up: f64,
        /// The down factor.
        down: f64,
        /// One-step risk-free growth, `1 / discount_factor`.
        growth: f64,
    },

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use crr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> crr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}
