//! Backward-induction pricing on the Cox-Ross-Rubinstein lattice.
//!
//! Pricing runs in two linear passes over a lattice of `N + 1` levels:
//!
//! 1. **Forward**: underlying price and immediate-exercise payoff at every
//!    node `(i, j)`, `S(i, j) = S0 · up^(i−j) · down^j`.
//! 2. **Backward**: terminal values equal terminal payoffs; each parent
//!    `(i−1, j)` takes the discounted risk-neutral expectation of its
//!    children `(i, j)` and `(i, j+1)`. American exercise floors that
//!    continuation value at the parent's payoff.
//!
//! All three grids are returned in a [`PricedLattice`]; the option price is
//! the root of the value grid.

use super::binomial_tree::{BinomialTree, DOWN, UP};
use super::{Lattice, TimeGrid};
use crate::settings::{ArbitragePolicy, LatticeSettings};
use crr_core::errors::{Error, Result};
use crr_core::{ensure, DiscountFactor, Price, Probability, Real, Time};
use crr_instruments::{ExerciseStyle, LatticeParameters, OptionType, Payoff, PlainVanillaPayoff};
use log::{debug, trace, warn};

/// Builds and rolls back binomial lattices.
#[derive(Debug, Clone, Default)]
pub struct LatticePricer {
    settings: LatticeSettings,
}

impl LatticePricer {
    /// A pricer with default settings (arbitrage-violating inputs rejected).
    pub fn new() -> Self {
        Self::default()
    }

    /// A pricer with explicit settings.
    pub fn with_settings(settings: LatticeSettings) -> Self {
        Self { settings }
    }

    /// The active settings.
    pub fn settings(&self) -> &LatticeSettings {
        &self.settings
    }

    /// Build the price, payoff, and value lattices for `params`.
    ///
    /// # Errors
    /// * [`Error::Precondition`] for degenerate inputs (see
    ///   [`LatticeParameters::validate`]).
    /// * [`Error::Arbitrage`] when the risk-neutral probability is outside
    ///   [0, 1] and the policy is [`ArbitragePolicy::Reject`].
    pub fn price(&self, params: &LatticeParameters) -> Result<PricedLattice> {
        params.validate()?;
        let tree = BinomialTree::from_parameters(params)?;
        let levels = tree.levels();
        let discount = tree.discount();
        let p = tree.risk_neutral_probability();

        debug!(
            "pricing {params}: dt = {}, discount = {discount}, p = {p}, levels = {levels}",
            tree.dt()
        );

        if !tree.is_arbitrage_free() {
            match self.settings.arbitrage_policy {
                ArbitragePolicy::Reject => {
                    return Err(Error::Arbitrage {
                        probability: p,
                        up: tree.up(),
                        down: tree.down(),
                        growth: tree.growth(),
                    });
                }
                ArbitragePolicy::Allow => warn!(
                    "risk-neutral probability {p} outside [0, 1] (up = {}, down = {}, growth = {}); \
                     pricing anyway",
                    tree.up(),
                    tree.down(),
                    tree.growth()
                ),
            }
        }

        // Forward pass.
        let option_type = params.option_type();
        let exercise_payoff = PlainVanillaPayoff::new(option_type, params.strike());
        let underlying_price = Lattice::from_fn(levels, |i, j| tree.underlying(i, j));
        let payoff = underlying_price.map(|&s| exercise_payoff.value(s));

        // Terminal condition.
        let mut value = Lattice::filled(levels, 0.0);
        value.level_mut(levels - 1).copy_from_slice(payoff.terminal());

        // Backward induction: parent j at level i-1 has children j (up) and j+1 (down).
        let style = params.exercise_style();
        for i in (1..levels).rev() {
            let (parents, children) = value.parents_and_children_mut(i);
            let exercise = payoff.level(i - 1);
            for (j, parent) in parents.iter_mut().enumerate() {
                let up = children[tree.descendant(i - 1, j, UP)];
                let down = children[tree.descendant(i - 1, j, DOWN)];
                let pu = tree.probability(i - 1, j, UP);
                let pd = tree.probability(i - 1, j, DOWN);
                let continuation = discount * (pu * up + pd * down);
                *parent = match style {
                    ExerciseStyle::European => continuation,
                    ExerciseStyle::American => continuation.max(exercise[j]),
                };
            }
            trace!("level {} rolled back: {:?}", i - 1, parents);
        }

        let time_grid = TimeGrid::uniform(params.time_to_maturity(), params.step_count())?;
        debug!("{} {} price = {}", style, option_type, value[(0, 0)]);

        Ok(PricedLattice {
            parameters: *params,
            settings: self.settings,
            tree,
            time_grid,
            underlying_price,
            payoff,
            value,
        })
    }
}

/// Price `params` with default settings.
///
/// # Example
/// ```
/// use crr_instruments::LatticeParameters;
/// use crr_methods::price_lattice;
///
/// let params = LatticeParameters::builder()
///     .strike(100.0)
///     .initial_price(100.0)
///     .factors(1.0604, 0.9431)
///     .risk_free_rate(0.1)
///     .time_to_maturity(1.0 / 3.0)
///     .step_count(4)
///     .build()
///     .unwrap();
/// let priced = price_lattice(&params).unwrap();
/// assert!((priced.price() - 6.1369).abs() < 1e-4);
/// ```
pub fn price_lattice(params: &LatticeParameters) -> Result<PricedLattice> {
    LatticePricer::new().price(params)
}

/// The three fully populated lattices of one pricing call.
///
/// Read-only once returned.
#[derive(Debug, Clone)]
pub struct PricedLattice {
    parameters: LatticeParameters,
    settings: LatticeSettings,
    tree: BinomialTree,
    time_grid: TimeGrid,
    underlying_price: Lattice<Real>,
    payoff: Lattice<Real>,
    value: Lattice<Real>,
}

impl PricedLattice {
    /// The option value at the root, `value[0][0]`.
    pub fn price(&self) -> Price {
        self.value[(0, 0)]
    }

    /// Inputs of this pricing call.
    pub fn parameters(&self) -> &LatticeParameters {
        &self.parameters
    }

    /// Settings in force for this pricing call.
    pub fn settings(&self) -> &LatticeSettings {
        &self.settings
    }

    /// The underlying binomial tree.
    pub fn tree(&self) -> &BinomialTree {
        &self.tree
    }

    /// Time of each level.
    pub fn time_grid(&self) -> &TimeGrid {
        &self.time_grid
    }

    /// Underlying price at every node.
    pub fn underlying_price(&self) -> &Lattice<Real> {
        &self.underlying_price
    }

    /// Immediate-exercise payoff at every node.
    pub fn payoff(&self) -> &Lattice<Real> {
        &self.payoff
    }

    /// Option value at every node.
    pub fn value(&self) -> &Lattice<Real> {
        &self.value
    }

    /// Number of levels, `step_count + 1`.
    pub fn levels(&self) -> usize {
        self.value.levels()
    }

    /// Step length, `T / N`.
    pub fn step_size(&self) -> Time {
        self.tree.dt()
    }

    /// One-step discount factor, `exp(−r Δt)`.
    pub fn discount_factor(&self) -> DiscountFactor {
        self.tree.discount()
    }

    /// Risk-neutral up probability.
    pub fn probability(&self) -> Probability {
        self.tree.risk_neutral_probability()
    }

    /// Discounted expected value of the children of non-terminal node `(i, j)`.
    ///
    /// # Panics
    /// Panics if `(i, j)` is a terminal node (`i >= levels() - 1`) or
    /// `j > i`.
    pub fn continuation_value(&self, i: usize, j: usize) -> Real {
        assert!(
            i + 1 < self.levels() && j <= i,
            "node ({i}, {j}) has no children in a {}-level lattice",
            self.levels()
        );
        let tree = &self.tree;
        let up = self.value[(i + 1, tree.descendant(i, j, UP))];
        let down = self.value[(i + 1, tree.descendant(i, j, DOWN))];
        self.discount_factor()
            * (tree.probability(i, j, UP) * up + tree.probability(i, j, DOWN) * down)
    }

    /// Non-terminal nodes where exercising beats continuing by more than
    /// the configured tolerance. Always empty for European exercise.
    pub fn early_exercise_nodes(&self) -> Vec<(usize, usize)> {
        if !self.parameters.exercise_style().allows_early_exercise() {
            return Vec::new();
        }
        let tolerance = self.settings.exercise_tolerance;
        let mut nodes = Vec::new();
        for i in 0..self.levels() - 1 {
            for (j, &exercise) in self.payoff.level(i).iter().enumerate() {
                if exercise > self.continuation_value(i, j) + tolerance {
                    nodes.push((i, j));
                }
            }
        }
        nodes
    }

    /// Critical underlying price per level, for the levels that contain
    /// early-exercise nodes: the highest exercised price for a put, the
    /// lowest for a call.
    pub fn exercise_boundary(&self) -> Vec<(Time, Real)> {
        let mut boundary: Vec<(Time, Real)> = Vec::new();
        for (i, j) in self.early_exercise_nodes() {
            let s = self.underlying_price[(i, j)];
            let t = self.time_grid.time(i);
            match boundary.last_mut() {
                Some((last_t, critical)) if *last_t == t => {
                    *critical = match self.parameters.option_type() {
                        OptionType::Put => critical.max(s),
                        OptionType::Call => critical.min(s),
                    };
                }
                _ => boundary.push((t, s)),
            }
        }
        boundary
    }
}

/// `C − P − (S0 − K · df^N)` for a European call and put priced on the same
/// market. Zero up to rounding when put-call parity holds.
pub fn put_call_parity_gap(call: &PricedLattice, put: &PricedLattice) -> Result<Real> {
    let cp = call.parameters();
    let pp = put.parameters();
    ensure!(
        cp.option_type() == OptionType::Call && pp.option_type() == OptionType::Put,
        "parity needs a call and a put, got {} and {}",
        cp.option_type(),
        pp.option_type()
    );
    ensure!(
        cp.exercise_style() == ExerciseStyle::European
            && pp.exercise_style() == ExerciseStyle::European,
        "parity only holds for European exercise"
    );
    ensure!(
        pp.with_option_type(OptionType::Call) == *cp,
        "call and put must share strike, market, and lattice"
    );
    let forward = cp.initial_price()
        - cp.strike() * call.discount_factor().powi(cp.step_count() as i32);
    Ok(call.price() - put.price() - forward)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
