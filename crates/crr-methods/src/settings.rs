//! Pricer configuration.
//!
//! [`LatticeSettings`] is a plain value handed to
//! [`LatticePricer::with_settings`](crate::LatticePricer::with_settings).
//! There is no process-wide state: two pricers with different settings can
//! run side by side.

use crr_core::Real;

/// What the pricer does when the inputs admit an arbitrage, i.e. the
/// risk-neutral probability falls outside [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArbitragePolicy {
    /// Fail with [`Error::Arbitrage`](crr_core::Error::Arbitrage).
    #[default]
    Reject,
    /// Price anyway with the out-of-range probability and log a warning.
    Allow,
}

/// Settings for a [`LatticePricer`](crate::LatticePricer).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LatticeSettings {
    /// Handling of arbitrage-violating inputs.
    pub arbitrage_policy: ArbitragePolicy,
    /// Margin by which the payoff must beat the continuation value for a
    /// node to count as an early-exercise node.
    pub exercise_tolerance: Real,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            arbitrage_policy: ArbitragePolicy::Reject,
            exercise_tolerance: 1e-12,
        }
    }
}

impl LatticeSettings {
    /// Replace the arbitrage policy.
    pub fn with_arbitrage_policy(mut self, policy: ArbitragePolicy) -> Self {
        self.arbitrage_policy = policy;
        self
    }

    /// Replace the early-exercise tolerance.
    pub fn with_exercise_tolerance(mut self, tolerance: Real) -> Self {
        self.exercise_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_reject_arbitrage() {
        let s = LatticeSettings::default();
        assert_eq!(s.arbitrage_policy, ArbitragePolicy::Reject);
        assert!(s.exercise_tolerance > 0.0);
    }

    #[test]
    fn builder_methods_override() {
        let s = LatticeSettings::default()
            .with_arbitrage_policy(ArbitragePolicy::Allow)
            .with_exercise_tolerance(1e-8);
        assert_eq!(s.arbitrage_policy, ArbitragePolicy::Allow);
        assert_eq!(s.exercise_tolerance, 1e-8);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_load_with_partial_fields() {
        let s: LatticeSettings = serde_json::from_str(r#"{"arbitrage_policy":"allow"}"#).unwrap();
        assert_eq!(s.arbitrage_policy, ArbitragePolicy::Allow);
        assert_eq!(s.exercise_tolerance, LatticeSettings::default().exercise_tolerance);
    }
}
