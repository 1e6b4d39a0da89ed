//! # crr-instruments
//!
//! The vanilla option contract priced by the lattice methods: option type,
//! exercise style, the payoff, and the validated [`LatticeParameters`]
//! bundle handed to the pricer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod parameters;
pub mod payoff;

pub use exercise::ExerciseStyle;
pub use parameters::{LatticeParameters, LatticeParametersBuilder};
pub use payoff::{compute_payoff, OptionType, Payoff, PlainVanillaPayoff};
