//! Kitchen footprint description.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Footprint shape kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KitchenShape {
    /// Axis-aligned rectangle.
    #[default]
    Rectangle,
    /// L-shaped footprint.
    #[cfg_attr(feature = "serde", serde(rename = "L"))]
    LShaped,
    /// U-shaped footprint.
    #[cfg_attr(feature = "serde", serde(rename = "U"))]
    UShaped,
    /// Arbitrary simple polygon.
    Irregular,
}

/// Restaurant type, which fixes zone ratio bands and the default
/// equipment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RestaurantType {
    FastFood,
    #[default]
    Casual,
    FineDining,
    Cafeteria,
    GhostKitchen,
}

impl RestaurantType {
    /// All known restaurant types.
    pub const ALL: [RestaurantType; 5] = [
        RestaurantType::FastFood,
        RestaurantType::Casual,
        RestaurantType::FineDining,
        RestaurantType::Cafeteria,
        RestaurantType::GhostKitchen,
    ];

    /// Stable string key, matching the external JSON contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            RestaurantType::FastFood => "fast_food",
            RestaurantType::Casual => "casual",
            RestaurantType::FineDining => "fine_dining",
            RestaurantType::Cafeteria => "cafeteria",
            RestaurantType::GhostKitchen => "ghost_kitchen",
        }
    }

    /// Parses a string key.
    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::InvalidConfiguration(format!("unknown restaurant type: {s}")))
    }
}

/// A kitchen footprint with its operating parameters.
///
/// Immutable once constructed; [`Kitchen::validate`] must pass before the
/// engine will accept it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kitchen {
    /// Footprint shape kind.
    pub shape: KitchenShape,

    /// Boundary vertices in order (simple polygon, meters).
    pub vertices: Vec<(f64, f64)>,

    /// Restaurant type.
    pub restaurant_type: RestaurantType,

    /// Seating capacity of the dining area served by this kitchen.
    pub seat_count: u32,

    /// Receiving entrance, used by the accessibility score.
    /// Derived from the footprint when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry_point: Option<(f64, f64)>,

    /// Service pass, used by the accessibility score.
    /// Derived from the footprint when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub service_point: Option<(f64, f64)>,
}

impl Kitchen {
    /// Creates a kitchen from explicit polygon vertices.
    pub fn new(
        shape: KitchenShape,
        vertices: Vec<(f64, f64)>,
        restaurant_type: RestaurantType,
        seat_count: u32,
    ) -> Self {
        Self {
            shape,
            vertices,
            restaurant_type,
            seat_count,
            entry_point: None,
            service_point: None,
        }
    }

    /// Creates a rectangular kitchen with its corner at the origin.
    pub fn rectangle(
        width: f64,
        depth: f64,
        restaurant_type: RestaurantType,
        seat_count: u32,
    ) -> Self {
        Self::new(
            KitchenShape::Rectangle,
            vec![(0.0, 0.0), (width, 0.0), (width, depth), (0.0, depth)],
            restaurant_type,
            seat_count,
        )
    }

    /// Creates an L-shaped kitchen: a `width x depth` rectangle with a
    /// `notch_width x notch_depth` notch cut from the top-right corner.
    pub fn l_shape(
        width: f64,
        depth: f64,
        notch_width: f64,
        notch_depth: f64,
        restaurant_type: RestaurantType,
        seat_count: u32,
    ) -> Self {
        Self::new(
            KitchenShape::LShaped,
            vec![
                (0.0, 0.0),
                (width, 0.0),
                (width, depth - notch_depth),
                (width - notch_width, depth - notch_depth),
                (width - notch_width, depth),
                (0.0, depth),
            ],
            restaurant_type,
            seat_count,
        )
    }

    /// Creates a U-shaped kitchen: a `width x depth` rectangle with a
    /// central notch of `notch_width x notch_depth` cut from the top edge,
    /// leaving two arms of `arm_width` each.
    pub fn u_shape(
        width: f64,
        depth: f64,
        arm_width: f64,
        notch_depth: f64,
        restaurant_type: RestaurantType,
        seat_count: u32,
    ) -> Self {
        Self::new(
            KitchenShape::UShaped,
            vec![
                (0.0, 0.0),
                (width, 0.0),
                (width, depth),
                (width - arm_width, depth),
                (width - arm_width, depth - notch_depth),
                (arm_width, depth - notch_depth),
                (arm_width, depth),
                (0.0, depth),
            ],
            restaurant_type,
            seat_count,
        )
    }

    /// Sets the receiving entrance point.
    pub fn with_entry_point(mut self, x: f64, y: f64) -> Self {
        self.entry_point = Some((x, y));
        self
    }

    /// Sets the service pass point.
    pub fn with_service_point(mut self, x: f64, y: f64) -> Self {
        self.service_point = Some((x, y));
        self
    }

    /// Footprint area by the shoelace formula.
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let (x1, y1) = self.vertices[i];
            let (x2, y2) = self.vertices[(i + 1) % n];
            acc += x1 * y2 - x2 * y1;
        }
        acc.abs() / 2.0
    }

    /// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for &(x, y) in &self.vertices {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (min_x, min_y, max_x, max_y)
    }

    /// Validates the footprint and operating parameters.
    ///
    /// Geometric simplicity (self-intersection) is checked by the engine's
    /// geometry kernel; this covers everything checkable without it.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::InvalidConfiguration(
                "footprint must have at least 3 vertices".into(),
            ));
        }
        if self.seat_count == 0 {
            return Err(Error::InvalidConfiguration(
                "seat count must be positive".into(),
            ));
        }
        if self.area() <= 0.0 {
            return Err(Error::InvalidConfiguration(
                "footprint polygon has zero area".into(),
            ));
        }
        for &(x, y) in &self.vertices {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::InvalidConfiguration(
                    "footprint vertices must be finite".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_area() {
        let k = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 50);
        assert_relative_eq!(k.area(), 80.0, epsilon = 1e-9);
        assert!(k.validate().is_ok());
    }

    #[test]
    fn test_l_shape_area() {
        // 10x8 minus a 4x3 notch.
        let k = Kitchen::l_shape(10.0, 8.0, 4.0, 3.0, RestaurantType::Casual, 50);
        assert_relative_eq!(k.area(), 68.0, epsilon = 1e-9);
        assert_eq!(k.shape, KitchenShape::LShaped);
    }

    #[test]
    fn test_u_shape_area() {
        // 12x8 with a central 6x3 notch (arms 3m wide each).
        let k = Kitchen::u_shape(12.0, 8.0, 3.0, 3.0, RestaurantType::Cafeteria, 80);
        assert_relative_eq!(k.area(), 96.0 - 18.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let k = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 0);
        assert!(k.validate().is_err());

        let k = Kitchen::new(
            KitchenShape::Irregular,
            vec![(0.0, 0.0), (1.0, 0.0)],
            RestaurantType::Casual,
            10,
        );
        assert!(k.validate().is_err());
    }

    #[test]
    fn test_restaurant_type_roundtrip() {
        for t in RestaurantType::ALL {
            assert_eq!(RestaurantType::parse(t.as_str()).unwrap(), t);
        }
        assert!(RestaurantType::parse("drive_through").is_err());
    }
}
