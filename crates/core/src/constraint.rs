//! Constraint kinds, numeric limits and violations.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of constraint a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintKind {
    /// Placement leaves its zone or the footprint.
    Containment,
    /// Clearance-expanded footprints collide with another unit or a wall.
    ClearanceOverlap,
    /// A required-near pair ended up too far apart.
    RequiredAdjacency,
    /// A forbidden-near pair ended up too close.
    ForbiddenAdjacency,
    /// Opposing equipment leaves too narrow a traffic gap.
    AisleWidth,
    /// A required instance could not be placed at all.
    UnplaceableEquipment,
}

/// Violation severity. Any hard violation makes the layout unsuccessful;
/// soft violations only reduce the safety sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Hard,
    Soft,
}

/// A single constraint breach found by the validator.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Violation {
    /// What was breached.
    pub kind: ConstraintKind,

    /// Hard or soft.
    pub severity: Severity,

    /// The offending placement or zone, e.g. `gas_range_6burner#0`.
    pub subject: String,

    /// The other party for pairwise constraints.
    #[cfg_attr(feature = "serde", serde(default))]
    pub other: Option<String>,

    /// Breach magnitude: overlap area (sqm) or shortfall distance (m),
    /// depending on the kind.
    pub magnitude: f64,
}

impl Violation {
    pub fn new(
        kind: ConstraintKind,
        severity: Severity,
        subject: impl Into<String>,
        magnitude: f64,
    ) -> Self {
        Self {
            kind,
            severity,
            subject: subject.into(),
            other: None,
            magnitude,
        }
    }

    /// Sets the other party of a pairwise violation.
    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = Some(other.into());
        self
    }

    /// Returns true for hard violations.
    pub fn is_hard(&self) -> bool {
        self.severity == Severity::Hard
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.other {
            Some(other) => write!(
                f,
                "{:?} ({:?}): {} / {} (magnitude {:.3})",
                self.kind, self.severity, self.subject, other, self.magnitude
            ),
            None => write!(
                f,
                "{:?} ({:?}): {} (magnitude {:.3})",
                self.kind, self.severity, self.subject, self.magnitude
            ),
        }
    }
}

/// Numeric constraint limits in meters. Defaults follow standard commercial
/// kitchen planning values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// Minimum single-lane aisle width.
    pub min_aisle: f64,

    /// Minimum clearance between equipment and walls.
    pub wall_clearance: f64,

    /// Minimum spacing between unrelated equipment.
    pub equipment_spacing: f64,

    /// Maximum separation for required-near pairs.
    pub required_adjacency_max: f64,

    /// Minimum separation for forbidden-near pairs.
    pub forbidden_adjacency_min: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_aisle: 1.07,
            wall_clearance: 0.15,
            equipment_spacing: 0.30,
            required_adjacency_max: 2.0,
            forbidden_adjacency_min: 1.5,
        }
    }
}
