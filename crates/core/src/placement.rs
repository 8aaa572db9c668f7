//! Placement representation for positioned equipment.

use crate::catalog::EquipmentId;
use crate::zone::ZoneKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cardinal orientation of a placed unit.
///
/// `R0` faces the positive y direction (front clearance extends toward +y);
/// each step rotates 90 degrees counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// All four cardinal orientations.
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Rotation angle in degrees.
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// The next orientation counter-clockwise.
    pub fn next(&self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Returns true if width and depth are swapped at this orientation.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// One placed equipment instance.
///
/// The anchor `(x, y)` is the bottom-left corner of the oriented footprint
/// rectangle. Bounding and clearance-expanded polygons are derived by the
/// engine from the equipment spec.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The equipment type placed.
    pub equipment_id: EquipmentId,

    /// Instance index (0-based) when multiple copies exist.
    pub instance: usize,

    /// The zone this instance is assigned to.
    pub zone: ZoneKind,

    /// Anchor x coordinate (meters).
    pub x: f64,

    /// Anchor y coordinate (meters).
    pub y: f64,

    /// Cardinal orientation.
    pub rotation: Rotation,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        equipment_id: impl Into<EquipmentId>,
        instance: usize,
        zone: ZoneKind,
        x: f64,
        y: f64,
        rotation: Rotation,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            instance,
            zone,
            x,
            y,
            rotation,
        }
    }

    /// Oriented footprint size for a spec of `width x depth`.
    pub fn oriented_size(&self, width: f64, depth: f64) -> (f64, f64) {
        if self.rotation.swaps_axes() {
            (depth, width)
        } else {
            (width, depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycle() {
        let mut r = Rotation::R0;
        for _ in 0..4 {
            r = r.next();
        }
        assert_eq!(r, Rotation::R0);
    }

    #[test]
    fn test_oriented_size() {
        let p = Placement::new("griddle", 0, ZoneKind::Cooking, 1.0, 2.0, Rotation::R90);
        assert_eq!(p.oriented_size(0.9, 0.6), (0.6, 0.9));
        let p = Placement::new("griddle", 0, ZoneKind::Cooking, 1.0, 2.0, Rotation::R180);
        assert_eq!(p.oriented_size(0.9, 0.6), (0.9, 0.6));
    }
}
