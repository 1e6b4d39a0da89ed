//! # crr
//!
//! Fair values of vanilla European and American options on a
//! Cox-Ross-Rubinstein binomial lattice.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `crr-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use crr::{price_lattice, ExerciseStyle, LatticeParameters, OptionType};
//!
//! let params = LatticeParameters::builder()
//!     .option_type("put".parse::<OptionType>()?)
//!     .exercise_style("american".parse::<ExerciseStyle>()?)
//!     .strike(100.0)
//!     .initial_price(100.0)
//!     .factors(1.0604, 0.9431)
//!     .risk_free_rate(0.1)
//!     .time_to_maturity(1.0 / 3.0)
//!     .step_count(4)
//!     .build()?;
//!
//! let lattice = price_lattice(&params)?;
//! assert_eq!(lattice.value().level(4).len(), 5);
//! assert!(lattice.price() > lattice.payoff()[(0, 0)]);
//! # Ok::<(), crr::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use crr_core as core;

/// Option contract and pricing inputs.
pub use crr_instruments as instruments;

/// Lattice construction and pricing.
pub use crr_methods as methods;

pub use crr_core::{Error, Result};
pub use crr_instruments::{
    compute_payoff, ExerciseStyle, LatticeParameters, LatticeParametersBuilder, OptionType,
};
pub use crr_methods::{
    price_lattice, put_call_parity_gap, ArbitragePolicy, BinomialTree, Lattice, LatticePricer,
    LatticeSettings, PricedLattice,
};
