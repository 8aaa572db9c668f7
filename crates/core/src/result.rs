//! Final layout result, shaped for the external serialization layer.

use crate::constraint::Violation;
use crate::placement::Rotation;
use crate::score::Score;
use crate::zone::ZoneKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-zone summary line.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneReport {
    /// Zone kind, serialized as `type`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ZoneKind,

    /// Zone area in square meters.
    pub area_sqm: f64,

    /// Zone area over footprint area.
    pub ratio: f64,
}

/// Per-placement summary line.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementReport {
    /// Equipment identity with instance suffix, e.g. `griddle#0`.
    pub equipment_id: String,

    /// Zone the instance landed in.
    pub zone: ZoneKind,

    /// Anchor x coordinate (meters).
    pub x: f64,

    /// Anchor y coordinate (meters).
    pub y: f64,

    /// Oriented footprint width (meters).
    pub width: f64,

    /// Oriented footprint depth (meters).
    pub depth: f64,

    /// Cardinal orientation.
    pub rotation: Rotation,
}

/// The complete result of one optimization run.
///
/// Always produced when partitioning succeeds; `success` is false when the
/// best layout still carries hard violations.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayoutResult {
    /// True when the best layout has zero hard violations.
    pub success: bool,

    /// Footprint area in square meters.
    pub total_area_sqm: f64,

    /// Zone summaries in workflow order.
    pub zones: Vec<ZoneReport>,

    /// All placements of the best layout.
    pub placements: Vec<PlacementReport>,

    /// Score breakdown of the best layout.
    pub scores: Score,

    /// Violations of the best layout, hard before soft.
    pub violations: Vec<Violation>,

    /// Iterations actually run.
    pub iterations: u64,

    /// True if the search stopped on the stall limit rather than the
    /// iteration budget.
    pub converged: bool,

    /// Wall-clock time of the search in milliseconds.
    pub computation_time_ms: u64,

    /// Best overall score after each iteration (non-decreasing).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub score_history: Vec<f64>,
}

impl LayoutResult {
    /// Number of hard violations.
    pub fn hard_violation_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_hard()).count()
    }

    /// Number of soft violations.
    pub fn soft_violation_count(&self) -> usize {
        self.violations.len() - self.hard_violation_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ConstraintKind, Severity};

    fn sample() -> LayoutResult {
        LayoutResult {
            success: false,
            total_area_sqm: 80.0,
            zones: vec![ZoneReport {
                kind: ZoneKind::Storage,
                area_sqm: 16.0,
                ratio: 0.2,
            }],
            placements: vec![PlacementReport {
                equipment_id: "griddle#0".into(),
                zone: ZoneKind::Cooking,
                x: 1.0,
                y: 2.0,
                width: 0.9,
                depth: 0.6,
                rotation: Rotation::R0,
            }],
            scores: Score::combine(0.8, 0.6, 0.75, 0.5),
            violations: vec![
                Violation::new(ConstraintKind::AisleWidth, Severity::Hard, "griddle#0", 0.3),
                Violation::new(
                    ConstraintKind::RequiredAdjacency,
                    Severity::Soft,
                    "prep_sink#0",
                    0.8,
                ),
            ],
            iterations: 42,
            converged: true,
            computation_time_ms: 10,
            score_history: vec![60.0, 61.5],
        }
    }

    #[test]
    fn test_violation_counts() {
        let r = sample();
        assert_eq!(r.hard_violation_count(), 1);
        assert_eq!(r.soft_violation_count(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_contract_shape() {
        let r = sample();
        let json: serde_json::Value = serde_json::to_value(&r).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["total_area_sqm"], 80.0);
        assert_eq!(json["zones"][0]["type"], "storage");
        assert!(json["zones"][0]["area_sqm"].is_number());
        assert!(json["zones"][0]["ratio"].is_number());
        assert!(json["scores"]["workflow_efficiency"].is_number());
        assert!(json["scores"]["overall"].is_number());
        assert!(json["placements"].is_array());
    }
}
