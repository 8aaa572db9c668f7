//! Layout quality scoring model.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed sub-score weights (workflow, space, safety, accessibility).
pub const WEIGHTS: [f64; 4] = [0.40, 0.25, 0.20, 0.15];

/// Quality scores for a layout. Sub-scores are in `[0, 1]`, `overall` is the
/// fixed-weight combination scaled to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    /// Inverse of flow-weighted travel distance along the workflow order.
    pub workflow_efficiency: f64,

    /// Equipment footprint area over zone area, preferring a target
    /// occupancy band.
    pub space_utilization: f64,

    /// Violation-weighted safety score; 1.0 when the layout is clean.
    pub safety_compliance: f64,

    /// Inverse-normalized distance from entry/service points to the key
    /// stations.
    pub accessibility: f64,

    /// Weighted combination in `[0, 100]`.
    pub overall: f64,
}

impl Score {
    /// Combines four sub-scores into a full score. Inputs are clamped to
    /// `[0, 1]` first.
    pub fn combine(
        workflow_efficiency: f64,
        space_utilization: f64,
        safety_compliance: f64,
        accessibility: f64,
    ) -> Self {
        let w = workflow_efficiency.clamp(0.0, 1.0);
        let sp = space_utilization.clamp(0.0, 1.0);
        let sa = safety_compliance.clamp(0.0, 1.0);
        let a = accessibility.clamp(0.0, 1.0);
        let overall =
            (w * WEIGHTS[0] + sp * WEIGHTS[1] + sa * WEIGHTS[2] + a * WEIGHTS[3]) * 100.0;
        Self {
            workflow_efficiency: w,
            space_utilization: sp,
            safety_compliance: sa,
            accessibility: a,
            overall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weights_sum_to_one() {
        assert_relative_eq!(WEIGHTS.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_combine_bounds() {
        let s = Score::combine(1.0, 1.0, 1.0, 1.0);
        assert_relative_eq!(s.overall, 100.0, epsilon = 1e-9);

        let s = Score::combine(0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(s.overall, 0.0, epsilon = 1e-9);

        // Out-of-range inputs are clamped.
        let s = Score::combine(2.0, -1.0, 0.5, 0.5);
        assert!(s.overall <= 100.0);
        assert_eq!(s.workflow_efficiency, 1.0);
        assert_eq!(s.space_utilization, 0.0);
    }

    #[test]
    fn test_combine_is_weighted_sum() {
        let s = Score::combine(0.8, 0.6, 1.0, 0.4);
        let expected = (0.8 * 0.40 + 0.6 * 0.25 + 1.0 * 0.20 + 0.4 * 0.15) * 100.0;
        assert_relative_eq!(s.overall, expected, epsilon = 1e-9);
    }
}
