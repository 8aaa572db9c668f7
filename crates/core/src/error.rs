//! Error types for galley.

use thiserror::Error;

/// Result type alias for galley operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or optimizing a layout.
///
/// Placement failures are deliberately *not* errors: an equipment instance
/// that cannot be placed is recorded as a hard violation on the layout and
/// the run continues, so a best-effort result is always available.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: non-simple footprint, bad seat count, etc.
    /// Raised before any partitioning or search begins.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// No zone partition satisfies the ratio bands for this footprint.
    #[error(
        "Infeasible footprint: no partition satisfies zone ratio bands \
         (footprint area {area_sqm:.2} sqm, closest ratios {attempted_ratios:?})"
    )]
    InfeasibleFootprint {
        /// Total footprint area in square meters.
        area_sqm: f64,
        /// The zone ratios of the closest attempted partition, in workflow
        /// order (storage, preparation, cooking, washing).
        attempted_ratios: [f64; 4],
    },

    /// Degenerate geometric input encountered mid-computation.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration("seat count must be positive".into());
        assert!(err.to_string().contains("seat count"));

        let err = Error::InfeasibleFootprint {
            area_sqm: 4.5,
            attempted_ratios: [0.3, 0.3, 0.2, 0.2],
        };
        let msg = err.to_string();
        assert!(msg.contains("4.50"));
        assert!(msg.contains("ratio bands"));
    }
}
