//! Functional zones and their target area-ratio bands.

use crate::kitchen::RestaurantType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four functional zones of a kitchen, in workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZoneKind {
    Storage,
    Preparation,
    Cooking,
    Washing,
}

/// Canonical workflow order: goods flow storage -> preparation -> cooking
/// -> washing/service.
pub const WORKFLOW_ORDER: [ZoneKind; 4] = [
    ZoneKind::Storage,
    ZoneKind::Preparation,
    ZoneKind::Cooking,
    ZoneKind::Washing,
];

impl ZoneKind {
    /// Stable string key, matching the external JSON contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::Storage => "storage",
            ZoneKind::Preparation => "preparation",
            ZoneKind::Cooking => "cooking",
            ZoneKind::Washing => "washing",
        }
    }

    /// Index of this zone in [`WORKFLOW_ORDER`].
    pub fn workflow_index(&self) -> usize {
        match self {
            ZoneKind::Storage => 0,
            ZoneKind::Preparation => 1,
            ZoneKind::Cooking => 2,
            ZoneKind::Washing => 3,
        }
    }
}

/// Inclusive target band for a zone's share of the footprint area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RatioBand {
    pub min: f64,
    pub max: f64,
}

impl RatioBand {
    /// Midpoint of the band, used as the partition target.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Returns true if `ratio` lies inside the band (with a small tolerance
    /// for floating-point cut placement).
    pub fn contains(&self, ratio: f64) -> bool {
        ratio >= self.min - 1e-6 && ratio <= self.max + 1e-6
    }

    fn shifted(&self, delta: f64) -> Self {
        Self {
            min: (self.min + delta).max(0.05),
            max: (self.max + delta).max(0.08),
        }
    }
}

/// Base ratio bands (commercial kitchen planning guidance), in workflow
/// order.
const BASE_BANDS: [RatioBand; 4] = [
    RatioBand { min: 0.15, max: 0.25 }, // storage
    RatioBand { min: 0.20, max: 0.30 }, // preparation
    RatioBand { min: 0.30, max: 0.40 }, // cooking
    RatioBand { min: 0.15, max: 0.20 }, // washing
];

/// Target ratio bands for all four zones of a restaurant type, in workflow
/// order.
///
/// Fast food shifts area toward cooking, fine dining toward preparation,
/// cafeterias toward storage. Casual and ghost kitchens use the base bands.
pub fn ratio_bands(restaurant_type: RestaurantType) -> [RatioBand; 4] {
    let deltas: [f64; 4] = match restaurant_type {
        RestaurantType::FastFood => [-0.05, -0.05, 0.10, 0.0],
        RestaurantType::FineDining => [0.0, 0.05, 0.05, -0.08],
        RestaurantType::Cafeteria => [0.05, 0.05, 0.0, -0.08],
        RestaurantType::Casual | RestaurantType::GhostKitchen => [0.0; 4],
    };

    let mut bands = BASE_BANDS;
    for (band, delta) in bands.iter_mut().zip(deltas) {
        *band = band.shifted(delta);
    }
    bands
}

/// Ratio band for a single zone of a restaurant type.
pub fn ratio_band(restaurant_type: RestaurantType, kind: ZoneKind) -> RatioBand {
    ratio_bands(restaurant_type)[kind.workflow_index()]
}

/// A functional sub-region of the footprint, produced by the zone
/// partitioner.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zone {
    /// Which functional zone this is.
    pub kind: ZoneKind,

    /// Zone polygon vertices.
    pub polygon: Vec<(f64, f64)>,

    /// Zone area in square meters.
    pub area: f64,

    /// The target ratio band this zone was partitioned against.
    pub band: RatioBand,
}

impl Zone {
    /// Axis-aligned bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for &(x, y) in &self.polygon {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_order() {
        for (i, kind) in WORKFLOW_ORDER.iter().enumerate() {
            assert_eq!(kind.workflow_index(), i);
        }
    }

    #[test]
    fn test_band_midpoints_sum_near_one() {
        for t in RestaurantType::ALL {
            let sum: f64 = ratio_bands(t).iter().map(|b| b.midpoint()).sum();
            assert!(
                (0.8..=1.2).contains(&sum),
                "{t:?} band midpoints sum to {sum}"
            );
        }
    }

    #[test]
    fn test_bands_ordered() {
        for t in RestaurantType::ALL {
            for band in ratio_bands(t) {
                assert!(band.min < band.max);
                assert!(band.min > 0.0);
                assert!(band.contains(band.midpoint()));
            }
        }
    }

    #[test]
    fn test_fast_food_favors_cooking() {
        let casual = ratio_band(RestaurantType::Casual, ZoneKind::Cooking);
        let fast = ratio_band(RestaurantType::FastFood, ZoneKind::Cooking);
        assert!(fast.midpoint() > casual.midpoint());
    }
}
