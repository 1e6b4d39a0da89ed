//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`Lattice`]: triangular `(level, node)` storage shared by the price,
//!   payoff, and value grids
//! * [`BinomialTree`]: recombining Cox-Ross-Rubinstein tree of underlying
//!   prices, with its risk-neutral probability and one-step discounting
//! * [`TimeGrid`]: uniform grid of time points, one per lattice level
//! * [`LatticePricer`] / [`price_lattice`]: forward construction and
//!   backward induction for European and American exercise

pub mod binomial_tree;
pub mod greeks;
pub mod pricer;

pub use binomial_tree::BinomialTree;
pub use pricer::{price_lattice, put_call_parity_gap, LatticePricer, PricedLattice};

use crr_core::errors::{Error, Result};
use crr_core::utilities::data_formatters::format_real_padded;
use crr_core::{Real, Size, Time};
use std::fmt;
use std::ops::{Index, IndexMut};

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points, `0, Δt, …, T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
    dt: Time,
}

impl TimeGrid {
    /// Create a uniform time grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: Time, steps: Size) -> Result<Self> {
        crr_core::ensure!(steps > 0, "time grid needs at least one step");
        crr_core::ensure!(
            end.is_finite() && end > 0.0,
            "time grid end must be positive and finite, got {end}"
        );
        let dt = end / steps as Real;
        let times: Vec<Time> = (0..=steps).map(|i| i as Real * dt).collect();
        Ok(Self { times, dt })
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> usize {
        self.times.len()
    }

    /// Number of steps (= time points − 1).
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        self.times[i]
    }

    /// Time step between consecutive points.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }
}

// ─── Lattice ──────────────────────────────────────────────────────────────────

/// Offset of the first node of level `i` in the flat node vector.
#[inline]
fn level_offset(i: usize) -> usize {
    i * (i + 1) / 2
}

/// Triangular storage: level `i` holds exactly `i + 1` nodes.
///
/// Nodes are kept in one flat vector with triangular-number offsets, so
/// `(i, j)` lives at `i(i+1)/2 + j`. On a binomial tree node `(i, j)` is
/// reached by `i − j` up-moves and `j` down-moves; its children are
/// `(i + 1, j)` and `(i + 1, j + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice<T> {
    levels: usize,
    nodes: Vec<T>,
}

impl<T> Lattice<T> {
    /// Build a lattice with `levels` levels, filling node `(i, j)` with
    /// `f(i, j)` in level-major order.
    pub fn from_fn(levels: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut nodes = Vec::with_capacity(level_offset(levels));
        for i in 0..levels {
            for j in 0..=i {
                nodes.push(f(i, j));
            }
        }
        Self { levels, nodes }
    }

    /// Number of levels (time points).
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Total number of nodes, `levels (levels + 1) / 2`.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the lattice has no levels.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of level `i`, ordered from most up-moves to most down-moves.
    ///
    /// # Panics
    /// Panics if `i >= self.levels()`.
    pub fn level(&self, i: usize) -> &[T] {
        assert!(i < self.levels, "level {i} out of range [0, {})", self.levels);
        &self.nodes[level_offset(i)..level_offset(i + 1)]
    }

    /// Mutable nodes of level `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.levels()`.
    pub fn level_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.levels, "level {i} out of range [0, {})", self.levels);
        &mut self.nodes[level_offset(i)..level_offset(i + 1)]
    }

    /// Checked access to level `i`.
    pub fn try_level(&self, i: usize) -> Result<&[T]> {
        if i < self.levels {
            Ok(self.level(i))
        } else {
            Err(Error::IndexOutOfRange {
                index: i,
                size: self.levels,
            })
        }
    }

    /// Checked access to node `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i < self.levels && j <= i {
            self.nodes.get(level_offset(i) + j)
        } else {
            None
        }
    }

    /// The last level (maturity).
    ///
    /// # Panics
    /// Panics on an empty lattice.
    pub fn terminal(&self) -> &[T] {
        self.level(self.levels - 1)
    }

    /// Level `i − 1` (mutable) together with level `i` (shared), for one
    /// backward-induction step.
    ///
    /// # Panics
    /// Panics unless `1 <= i < self.levels()`.
    pub fn parents_and_children_mut(&mut self, i: usize) -> (&mut [T], &[T]) {
        assert!(
            i >= 1 && i < self.levels,
            "level {i} has no parent level in a {}-level lattice",
            self.levels
        );
        let (head, tail) = self.nodes.split_at_mut(level_offset(i));
        (&mut head[level_offset(i - 1)..], &tail[..i + 1])
    }

    /// Iterate over the levels, root first.
    pub fn iter_levels(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.levels).map(move |i| self.level(i))
    }

    /// Iterate over `(i, j, &node)` in level-major order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        self.iter_levels()
            .enumerate()
            .flat_map(|(i, level)| level.iter().enumerate().map(move |(j, v)| (i, j, v)))
    }

    /// Apply `f` to every node, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Lattice<U> {
        Lattice {
            levels: self.levels,
            nodes: self.nodes.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Lattice<T> {
    /// A lattice with every node set to `value`.
    pub fn filled(levels: usize, value: T) -> Self {
        Self {
            levels,
            nodes: vec![value; level_offset(levels)],
        }
    }
}

impl<T> Index<(usize, usize)> for Lattice<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(j <= i, "node {j} out of range at level {i}");
        &self.level(i)[j]
    }
}

impl<T> IndexMut<(usize, usize)> for Lattice<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        assert!(j <= i, "node {j} out of range at level {i}");
        &mut self.level_mut(i)[j]
    }
}

/// Level-by-level rendering, one line per level.
///
/// The formatter precision selects the decimals (default 4).
impl fmt::Display for Lattice<Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = f.precision().unwrap_or(4);
        let label = self.levels.saturating_sub(1).to_string().len();
        for (i, level) in self.iter_levels().enumerate() {
            write!(f, "{i:>label$}:")?;
            for v in level {
                write!(f, " {}", format_real_padded(*v, decimals, decimals + 5))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn time_grid_uniform() {
        let g = TimeGrid::uniform(1.0, 4).unwrap();
        assert_eq!(g.size(), 5);
        assert_eq!(g.steps(), 4);
        assert!((g.time(0) - 0.0).abs() < 1e-15);
        assert!((g.end() - 1.0).abs() < 1e-15);
        assert!((g.dt() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn time_grid_rejects_empty() {
        assert!(TimeGrid::uniform(1.0, 0).is_err());
        assert!(TimeGrid::uniform(0.0, 3).is_err());
    }

    #[test]
    fn lattice_shape() {
        let l = Lattice::from_fn(5, |i, j| (i, j));
        assert_eq!(l.levels(), 5);
        assert_eq!(l.len(), 15);
        for i in 0..5 {
            assert_eq!(l.level(i).len(), i + 1);
            assert_eq!(l.level(i)[i], (i, i));
        }
        assert_eq!(l[(3, 2)], (3, 2));
        assert_eq!(l.terminal(), &[(4, 0), (4, 1), (4, 2), (4, 3), (4, 4)]);
    }

    #[test]
    fn lattice_checked_access() {
        let l = Lattice::filled(3, 1.0);
        assert_eq!(l.get(2, 2), Some(&1.0));
        assert_eq!(l.get(1, 2), None);
        assert_eq!(l.get(3, 0), None);
        assert_eq!(
            l.try_level(3),
            Err(Error::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    #[should_panic]
    fn lattice_index_rejects_node_past_level() {
        let l = Lattice::filled(3, 0.0);
        let _node: f64 = l[(1, 2)];
    }

    #[test]
    fn parents_and_children_are_adjacent_levels() {
        let mut l = Lattice::from_fn(4, |i, j| (10 * i + j) as f64);
        let (parents, children) = l.parents_and_children_mut(3);
        assert_eq!(children, &[30.0, 31.0, 32.0, 33.0]);
        assert_eq!(parents.len(), 3);
        parents[0] = children[0] + children[1];
        assert_eq!(l[(2, 0)], 61.0);
    }

    #[test]
    fn iter_nodes_is_level_major() {
        let l = Lattice::from_fn(3, |i, j| i * 10 + j);
        let seen: Vec<_> = l.iter_nodes().map(|(i, j, v)| (i, j, *v)).collect();
        assert_eq!(
            seen,
            vec![(0, 0, 0), (1, 0, 10), (1, 1, 11), (2, 0, 20), (2, 1, 21), (2, 2, 22)]
        );
    }

    #[test]
    fn display_one_line_per_level() {
        let l = Lattice::from_fn(3, |i, j| i as f64 + j as f64 / 10.0);
        let text = format!("{l:.1}");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "0:    0.0");
        assert_eq!(lines[2], "2:    2.0    2.1    2.2");
    }

    proptest! {
        #[test]
        fn map_preserves_shape(levels in 0usize..40) {
            let l = Lattice::from_fn(levels, |i, j| (i * j) as f64);
            let m = l.map(|v| v * 2.0);
            prop_assert_eq!(m.levels(), levels);
            prop_assert_eq!(m.len(), levels * (levels + 1) / 2);
            for (i, j, v) in m.iter_nodes() {
                prop_assert_eq!(*v, 2.0 * (i * j) as f64);
            }
        }
    }
}
