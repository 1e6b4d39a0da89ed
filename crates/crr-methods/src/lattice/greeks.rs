//! Sensitivities read off the first levels of a priced lattice.
//!
//! No re-pricing is needed: the nodes at levels 1 and 2 already hold option
//! values at neighbouring underlying prices (Hull, *Options, Futures, and
//! Other Derivatives*, ch. 13).

use super::pricer::PricedLattice;
use crr_core::errors::Result;
use crr_core::{ensure, Real};

impl PricedLattice {
    /// `∂V/∂S` from the two level-1 nodes.
    ///
    /// `(V_u − V_d) / (S_u − S_d)`.
    pub fn delta(&self) -> Result<Real> {
        ensure!(self.levels() >= 2, "delta needs at least one step");
        let s = self.underlying_price().level(1);
        let v = self.value().level(1);
        Ok((v[0] - v[1]) / (s[0] - s[1]))
    }

    /// `∂²V/∂S²` from the three level-2 nodes.
    pub fn gamma(&self) -> Result<Real> {
        ensure!(self.levels() >= 3, "gamma needs at least two steps");
        let s = self.underlying_price().level(2);
        let v = self.value().level(2);
        let delta_up = (v[0] - v[1]) / (s[0] - s[1]);
        let delta_down = (v[1] - v[2]) / (s[1] - s[2]);
        Ok((delta_up - delta_down) / (0.5 * (s[0] - s[2])))
    }

    /// `∂V/∂t` per year, from the root and the middle level-2 node.
    ///
    /// Exact for trees with `up · down = 1`, where that node sits at the
    /// initial price; otherwise an approximation.
    pub fn theta(&self) -> Result<Real> {
        ensure!(self.levels() >= 3, "theta needs at least two steps");
        Ok((self.value()[(2, 1)] - self.price()) / (2.0 * self.step_size()))
    }
}
