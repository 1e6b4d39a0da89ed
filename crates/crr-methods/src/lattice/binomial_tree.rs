//! Recombining Cox-Ross-Rubinstein binomial tree.
//!
//! The underlying moves by a factor `up` or `down` at each step of length
//! `Δt = T / N`. Node `(i, j)` carries `x0 · up^(i−j) · down^j`: `j` counts
//! down-moves, so within a level prices decrease with `j` whenever
//! `up > down`. Two constructors are provided:
//!
//! | Constructor | Factors |
//! |---|---|
//! | [`BinomialTree::new`] | explicit `up` / `down` |
//! | [`BinomialTree::cox_ross_rubinstein`] | `up = exp(σ √Δt)`, `down = 1 / up` |
//!
//! In both cases the up probability is the risk-neutral one,
//! `p = (exp(rΔt) − down) / (up − down)`, which makes the discounted price
//! a martingale: `p · up + (1 − p) · down = exp(rΔt)`.

use crr_core::errors::Result;
use crr_core::{ensure, DiscountFactor, Probability, Rate, Real, Size, Time, Volatility};
use crr_instruments::LatticeParameters;

/// Branch index of the up-move child.
pub const UP: usize = 0;
/// Branch index of the down-move child.
pub const DOWN: usize = 1;

/// A recombining binomial tree of underlying prices.
///
/// The tree has `steps + 1` time layers, layer `i` having `i + 1` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: Size,
    up: Real,
    down: Real,
    rate: Rate,
    pu: Probability,
    pd: Probability,
}

impl BinomialTree {
    // ── Named constructors ───────────────────────────────────────────────

    /// Tree with explicit per-step factors.
    ///
    /// `rate` is the continuously-compounded risk-free rate; it fixes the
    /// one-step discount factor and the risk-neutral probabilities. The
    /// probability is *not* range-checked here, see
    /// [`is_arbitrage_free`](Self::is_arbitrage_free).
    pub fn new(x0: Real, up: Real, down: Real, rate: Rate, end: Time, steps: Size) -> Result<Self> {
        ensure!(steps > 0, "binomial tree needs at least one step");
        ensure!(
            end.is_finite() && end > 0.0,
            "tree horizon must be positive and finite, got {end}"
        );
        ensure!(
            up.is_finite() && down.is_finite() && up != down,
            "up and down factors must be finite and distinct, got up = {up}, down = {down}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");

        let dt = end / steps as Real;
        let growth = (rate * dt).exp();
        let pu = (growth - down) / (up - down);
        Ok(Self {
            x0,
            dt,
            steps,
            up,
            down,
            rate,
            pu,
            pd: 1.0 - pu,
        })
    }

    /// Cox-Ross-Rubinstein tree: `up = exp(σ √Δt)`, `down = 1 / up`.
    pub fn cox_ross_rubinstein(
        x0: Real,
        sigma: Volatility,
        rate: Rate,
        end: Time,
        steps: Size,
    ) -> Result<Self> {
        ensure!(
            sigma.is_finite() && sigma > 0.0,
            "volatility must be positive and finite, got {sigma}"
        );
        ensure!(steps > 0, "binomial tree needs at least one step");
        let dt = end / steps as Real;
        let up = (sigma * dt.sqrt()).exp();
        Self::new(x0, up, 1.0 / up, rate, end, steps)
    }

    /// The tree described by a parameter set.
    pub fn from_parameters(params: &LatticeParameters) -> Result<Self> {
        Self::new(
            params.initial_price(),
            params.up(),
            params.down(),
            params.risk_free_rate(),
            params.time_to_maturity(),
            params.step_count(),
        )
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of time layers (= steps + 1).
    pub fn levels(&self) -> usize {
        self.steps + 1
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Up factor.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Index of the child at step `i + 1` of node `(i, index)`.
    ///
    /// `branch = UP` → `index`, `branch = DOWN` → `index + 1`.
    pub fn descendant(&self, _i: usize, index: usize, branch: usize) -> usize {
        index + branch
    }

    /// Underlying value at node `(i, index)`: `x0 · up^(i − index) · down^index`.
    ///
    /// Requires `index <= i` and `i <= i32::MAX`.
    pub fn underlying(&self, i: usize, index: usize) -> Real {
        debug_assert!(index <= i, "node {index} out of range at level {i}");
        self.x0 * self.up.powi((i - index) as i32) * self.down.powi(index as i32)
    }

    /// Transition probability for `branch` (`UP` or `DOWN`).
    pub fn probability(&self, _i: usize, _index: usize, branch: usize) -> Probability {
        if branch == UP {
            self.pu
        } else {
            self.pd
        }
    }

    /// Risk-neutral up probability.
    pub fn risk_neutral_probability(&self) -> Probability {
        self.pu
    }

    /// One-step discount factor, `exp(−r Δt)`.
    pub fn discount(&self) -> DiscountFactor {
        (-self.rate * self.dt).exp()
    }

    /// One-step risk-free growth, `1 / discount()`.
    pub fn growth(&self) -> Real {
        1.0 / self.discount()
    }

    /// Whether `down ≤ growth ≤ up` (in either factor order), i.e. the
    /// risk-neutral probability lies in [0, 1].
    pub fn is_arbitrage_free(&self) -> bool {
        self.pu.is_finite() && (0.0..=1.0).contains(&self.pu)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
