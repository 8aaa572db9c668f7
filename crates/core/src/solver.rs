//! Optimizer configuration.

use crate::constraint::Limits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the layout search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Seed for the deterministic random generator.
    pub seed: u64,

    /// Iteration budget for the hill-climbing loop.
    pub max_iterations: u64,

    /// Stop after this many consecutive non-improving iterations.
    pub stall_limit: u64,

    /// Candidate grid step for placement anchors, in meters.
    pub grid_step: f64,

    /// Minimum workable strip depth for a zone, in meters. Partitions that
    /// would produce a thinner zone fail as infeasible.
    pub min_zone_depth: f64,

    /// Ideal occupancy band for the space-utilization score.
    pub occupancy_band: (f64, f64),

    /// Numeric constraint limits.
    pub limits: Limits,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_iterations: 200,
            stall_limit: 50,
            grid_step: 0.1,
            min_zone_depth: 0.5,
            occupancy_band: (0.40, 0.70),
            limits: Limits::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the stall limit.
    pub fn with_stall_limit(mut self, stall: u64) -> Self {
        self.stall_limit = stall.max(1);
        self
    }

    /// Sets the placement grid step.
    pub fn with_grid_step(mut self, step: f64) -> Self {
        self.grid_step = step.max(0.01);
        self
    }

    /// Sets the constraint limits.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the ideal occupancy band.
    pub fn with_occupancy_band(mut self, low: f64, high: f64) -> Self {
        let low = low.clamp(0.0, 1.0);
        self.occupancy_band = (low, high.clamp(low, 1.0));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = SolverConfig::new()
            .with_seed(42)
            .with_max_iterations(100)
            .with_stall_limit(25)
            .with_grid_step(0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.stall_limit, 25);
        assert_eq!(config.grid_step, 0.2);
    }

    #[test]
    fn test_clamps() {
        let config = SolverConfig::new()
            .with_stall_limit(0)
            .with_grid_step(0.0)
            .with_occupancy_band(0.9, 0.3);
        assert_eq!(config.stall_limit, 1);
        assert!(config.grid_step > 0.0);
        assert!(config.occupancy_band.0 <= config.occupancy_band.1);
    }
}
