//! # crr-methods
//!
//! Cox-Ross-Rubinstein lattice construction and backward-induction pricing.
//!
//! # Modules
//!
//! * [`lattice`]: triangular lattice storage, the binomial tree, the pricer,
//!   and lattice greeks
//! * [`settings`]: pricer configuration (arbitrage policy, exercise
//!   tolerance)

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial tree, backward induction, greeks.
pub mod lattice;

/// Pricer configuration.
pub mod settings;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    price_lattice, put_call_parity_gap, BinomialTree, Lattice, LatticePricer, PricedLattice,
    TimeGrid,
};
pub use settings::{ArbitragePolicy, LatticeSettings};
