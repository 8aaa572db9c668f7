//! Equipment catalog: specifications, required counts and adjacency rules.
//!
//! The catalog is read-only for the engine. [`Catalog::builtin`] ships the
//! standard commercial-kitchen equipment set; external callers may build a
//! catalog from their own records with [`Catalog::from_parts`].

use crate::kitchen::RestaurantType;
use crate::zone::ZoneKind;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for an equipment type.
pub type EquipmentId = String;

/// Mandatory empty buffer distances around an equipment footprint, in
/// meters. `front` faces the operator, `back` faces the wall side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Clearances {
    pub front: f64,
    pub sides: f64,
    pub back: f64,
}

impl Default for Clearances {
    fn default() -> Self {
        Self {
            front: 0.9,
            sides: 0.15,
            back: 0.0,
        }
    }
}

/// Maps seat count to the required instance count of an equipment type.
///
/// Required instances = occurrences in the restaurant type's default set,
/// plus one extra per `per_seats` seats (0 = no seat scaling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountRule {
    pub per_seats: u32,
}

impl CountRule {
    /// Number of extra instances for the given seat count.
    pub fn extra_for(&self, seat_count: u32) -> usize {
        if self.per_seats == 0 {
            0
        } else {
            (seat_count / self.per_seats) as usize
        }
    }
}

/// Specification of one equipment type.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquipmentSpec {
    /// Unique identifier.
    pub id: EquipmentId,

    /// Human-readable name.
    pub name: String,

    /// The zone this equipment belongs to.
    pub zone: ZoneKind,

    /// Footprint width in meters (along the facing edge).
    pub width: f64,

    /// Footprint depth in meters.
    pub depth: f64,

    /// Unit height in meters (informational; the engine is 2D).
    pub height: f64,

    /// Clearance distances.
    #[cfg_attr(feature = "serde", serde(default))]
    pub clearance: Clearances,

    /// Must stand against a wall.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_wall: bool,

    /// Needs an extraction hood.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_ventilation: bool,

    /// Needs a water supply.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_water: bool,

    /// Needs a floor drain.
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_drain: bool,

    /// Seat-count scaling rule.
    #[cfg_attr(feature = "serde", serde(default))]
    pub count_rule: CountRule,
}

impl EquipmentSpec {
    /// Creates a spec with default clearances and no special requirements.
    pub fn new(id: impl Into<EquipmentId>, zone: ZoneKind, width: f64, depth: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            zone,
            width,
            depth,
            height: 0.9,
            clearance: Clearances::default(),
            requires_wall: false,
            requires_ventilation: false,
            requires_water: false,
            requires_drain: false,
            count_rule: CountRule::default(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit height.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Sets the front clearance.
    pub fn with_front_clearance(mut self, front: f64) -> Self {
        self.clearance.front = front;
        self
    }

    /// Sets the side clearance.
    pub fn with_side_clearance(mut self, sides: f64) -> Self {
        self.clearance.sides = sides;
        self
    }

    /// Marks the equipment as wall-mounted/wall-backed.
    pub fn against_wall(mut self) -> Self {
        self.requires_wall = true;
        self
    }

    /// Marks the equipment as needing an extraction hood.
    pub fn with_ventilation(mut self) -> Self {
        self.requires_ventilation = true;
        self
    }

    /// Marks the equipment as needing water and drainage.
    pub fn with_plumbing(mut self) -> Self {
        self.requires_water = true;
        self.requires_drain = true;
        self
    }

    /// Sets the seat-count scaling rule.
    pub fn scaling_per_seats(mut self, per_seats: u32) -> Self {
        self.count_rule = CountRule { per_seats };
        self
    }

    /// Footprint area in square meters.
    pub fn footprint_area(&self) -> f64 {
        self.width * self.depth
    }
}

/// Pairwise adjacency relation between two equipment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdjacencyKind {
    /// The pair must end up within the configured maximum distance (soft).
    RequiredNear,
    /// The pair must stay farther apart than the configured minimum (hard).
    ForbiddenNear,
    /// Clearance-expanded footprints of the pair may overlap.
    AllowedTouch,
}

/// An adjacency rule between two equipment identities (symmetric).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AdjacencyRule {
    pub a: EquipmentId,
    pub b: EquipmentId,
    pub kind: AdjacencyKind,
}

impl AdjacencyRule {
    pub fn new(a: impl Into<EquipmentId>, b: impl Into<EquipmentId>, kind: AdjacencyKind) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            kind,
        }
    }

    /// Returns true if this rule covers the (unordered) pair.
    pub fn matches(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

/// One required equipment line: identity and instance count.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Requirement {
    pub id: EquipmentId,
    pub count: usize,
}

/// The immutable equipment catalog.
///
/// Load once at process start and share (e.g. behind an `Arc`) across
/// concurrent optimizer restarts.
#[derive(Debug, Clone)]
pub struct Catalog {
    specs: Vec<EquipmentSpec>,
    by_id: HashMap<EquipmentId, usize>,
    adjacency: Vec<AdjacencyRule>,
    default_sets: HashMap<RestaurantType, Vec<EquipmentId>>,
}

impl Catalog {
    /// Builds a catalog from externally loaded parts.
    pub fn from_parts(
        specs: Vec<EquipmentSpec>,
        adjacency: Vec<AdjacencyRule>,
        default_sets: HashMap<RestaurantType, Vec<EquipmentId>>,
    ) -> Self {
        let by_id = specs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self {
            specs,
            by_id,
            adjacency,
            default_sets,
        }
    }

    /// The built-in standard catalog.
    pub fn builtin() -> Self {
        Self::from_parts(builtin_specs(), builtin_adjacency(), builtin_sets())
    }

    /// Looks up a spec by identity.
    pub fn get(&self, id: &str) -> Option<&EquipmentSpec> {
        self.by_id.get(id).map(|&i| &self.specs[i])
    }

    /// All specs.
    pub fn specs(&self) -> &[EquipmentSpec] {
        &self.specs
    }

    /// The adjacency relation for an unordered pair, if any rule covers it.
    pub fn adjacency(&self, a: &str, b: &str) -> Option<AdjacencyKind> {
        self.adjacency
            .iter()
            .find(|r| r.matches(a, b))
            .map(|r| r.kind)
    }

    /// All adjacency rules.
    pub fn adjacency_rules(&self) -> &[AdjacencyRule] {
        &self.adjacency
    }

    /// Required equipment lines for a restaurant type and seat count.
    ///
    /// Base counts come from the restaurant type's default set; seat-scaled
    /// extras are added per each spec's [`CountRule`]. Order follows the
    /// default set (stable for a given catalog).
    pub fn required_for(&self, restaurant_type: RestaurantType, seat_count: u32) -> Vec<Requirement> {
        let set = self
            .default_sets
            .get(&restaurant_type)
            .or_else(|| self.default_sets.get(&RestaurantType::Casual));
        let Some(set) = set else {
            return Vec::new();
        };

        let mut counts: Vec<(EquipmentId, usize)> = Vec::new();
        for id in set {
            if self.get(id).is_none() {
                log::warn!("default set references unknown equipment id {id}");
                continue;
            }
            match counts.iter_mut().find(|(eid, _)| eid == id) {
                Some((_, c)) => *c += 1,
                None => counts.push((id.clone(), 1)),
            }
        }

        counts
            .into_iter()
            .map(|(id, base)| {
                let extra = self
                    .get(&id)
                    .map(|s| s.count_rule.extra_for(seat_count))
                    .unwrap_or(0);
                Requirement {
                    id,
                    count: base + extra,
                }
            })
            .collect()
    }
}

fn builtin_specs() -> Vec<EquipmentSpec> {
    use ZoneKind::*;
    vec![
        // Storage
        EquipmentSpec::new("reach_in_refrigerator_1door", Storage, 0.66, 0.76)
            .with_name("Reach-in Refrigerator (1-door)")
            .with_height(2.0)
            .against_wall(),
        EquipmentSpec::new("reach_in_refrigerator_2door", Storage, 1.32, 0.76)
            .with_name("Reach-in Refrigerator (2-door)")
            .with_height(2.0)
            .against_wall(),
        EquipmentSpec::new("reach_in_freezer_1door", Storage, 0.66, 0.76)
            .with_name("Reach-in Freezer (1-door)")
            .with_height(2.0)
            .against_wall(),
        EquipmentSpec::new("dry_storage_shelf", Storage, 1.2, 0.45)
            .with_name("Dry Storage Shelf")
            .with_height(1.8)
            .with_front_clearance(0.6)
            .against_wall()
            .scaling_per_seats(120),
        EquipmentSpec::new("undercounter_refrigerator", Storage, 0.7, 0.61)
            .with_name("Undercounter Refrigerator")
            .with_height(0.86)
            .with_front_clearance(0.6),
        // Preparation
        EquipmentSpec::new("work_table_small", Preparation, 0.9, 0.6)
            .with_name("Work Table (small)")
            .with_height(0.86),
        EquipmentSpec::new("work_table_medium", Preparation, 1.5, 0.75)
            .with_name("Work Table (medium)")
            .with_height(0.86)
            .scaling_per_seats(120),
        EquipmentSpec::new("work_table_large", Preparation, 2.0, 0.75)
            .with_name("Work Table (large)")
            .with_height(0.86)
            .scaling_per_seats(150),
        EquipmentSpec::new("prep_sink", Preparation, 0.6, 0.55)
            .with_name("Prep Sink")
            .with_height(0.86)
            .with_plumbing(),
        EquipmentSpec::new("food_processor_station", Preparation, 0.6, 0.5)
            .with_name("Food Processor Station")
            .with_height(0.86)
            .with_front_clearance(0.6),
        // Cooking
        EquipmentSpec::new("gas_range_4burner", Cooking, 0.6, 0.7)
            .with_name("Gas Range (4-burner)")
            .with_height(0.91)
            .with_front_clearance(0.91)
            .with_side_clearance(0.46)
            .with_ventilation(),
        EquipmentSpec::new("gas_range_6burner", Cooking, 0.91, 0.7)
            .with_name("Gas Range (6-burner)")
            .with_height(0.91)
            .with_front_clearance(0.91)
            .with_side_clearance(0.46)
            .with_ventilation(),
        EquipmentSpec::new("deep_fryer_single", Cooking, 0.4, 0.76)
            .with_name("Deep Fryer (single)")
            .with_height(1.1)
            .with_front_clearance(0.91)
            .with_ventilation(),
        EquipmentSpec::new("deep_fryer_double", Cooking, 0.8, 0.76)
            .with_name("Deep Fryer (double)")
            .with_height(1.1)
            .with_front_clearance(0.91)
            .with_ventilation(),
        EquipmentSpec::new("convection_oven", Cooking, 0.9, 0.76)
            .with_name("Convection Oven")
            .with_height(1.5)
            .with_front_clearance(1.2)
            .with_ventilation(),
        EquipmentSpec::new("griddle", Cooking, 0.9, 0.6)
            .with_name("Griddle")
            .with_height(0.91)
            .with_front_clearance(0.91)
            .with_ventilation(),
        EquipmentSpec::new("salamander", Cooking, 0.6, 0.5)
            .with_name("Salamander")
            .with_height(0.5)
            .with_front_clearance(0.6)
            .with_ventilation()
            .against_wall(),
        // Washing
        EquipmentSpec::new("three_compartment_sink", Washing, 1.8, 0.6)
            .with_name("3-Compartment Sink")
            .with_height(1.1)
            .with_plumbing(),
        EquipmentSpec::new("dishwasher_undercounter", Washing, 0.6, 0.6)
            .with_name("Undercounter Dishwasher")
            .with_height(0.86)
            .with_plumbing(),
        EquipmentSpec::new("dishwasher_door_type", Washing, 0.65, 0.75)
            .with_name("Door-type Dishwasher")
            .with_height(1.5)
            .with_front_clearance(1.2)
            .with_plumbing(),
        EquipmentSpec::new("drying_rack", Washing, 1.0, 0.5)
            .with_name("Drying Rack")
            .with_height(1.7)
            .with_front_clearance(0.6)
            .against_wall(),
        EquipmentSpec::new("hand_wash_sink", Washing, 0.4, 0.35)
            .with_name("Hand Wash Sink")
            .with_height(0.86)
            .with_front_clearance(0.6)
            .with_plumbing()
            .against_wall()
            .scaling_per_seats(150),
    ]
}

fn builtin_adjacency() -> Vec<AdjacencyRule> {
    use AdjacencyKind::*;
    vec![
        // Warewashing chain stays together.
        AdjacencyRule::new("three_compartment_sink", "dishwasher_undercounter", RequiredNear),
        AdjacencyRule::new("three_compartment_sink", "dishwasher_door_type", RequiredNear),
        AdjacencyRule::new("three_compartment_sink", "drying_rack", RequiredNear),
        // Prep sink serves the main work table.
        AdjacencyRule::new("prep_sink", "work_table_large", RequiredNear),
        AdjacencyRule::new("prep_sink", "work_table_medium", RequiredNear),
        // Finishing broiler sits over the range line.
        AdjacencyRule::new("salamander", "gas_range_6burner", RequiredNear),
        // Hot oil away from water.
        AdjacencyRule::new("deep_fryer_single", "three_compartment_sink", ForbiddenNear),
        AdjacencyRule::new("deep_fryer_double", "three_compartment_sink", ForbiddenNear),
        AdjacencyRule::new("deep_fryer_single", "hand_wash_sink", ForbiddenNear),
        AdjacencyRule::new("deep_fryer_double", "hand_wash_sink", ForbiddenNear),
        AdjacencyRule::new("deep_fryer_single", "prep_sink", ForbiddenNear),
        AdjacencyRule::new("deep_fryer_double", "prep_sink", ForbiddenNear),
        // Cook line banks: ranges, fryers and griddles may stand flush.
        AdjacencyRule::new("gas_range_4burner", "gas_range_6burner", AllowedTouch),
        AdjacencyRule::new("gas_range_4burner", "griddle", AllowedTouch),
        AdjacencyRule::new("gas_range_6burner", "griddle", AllowedTouch),
        AdjacencyRule::new("deep_fryer_single", "deep_fryer_double", AllowedTouch),
        AdjacencyRule::new("gas_range_4burner", "deep_fryer_single", AllowedTouch),
        AdjacencyRule::new("gas_range_6burner", "deep_fryer_double", AllowedTouch),
        // Work tables may be ganged.
        AdjacencyRule::new("work_table_small", "work_table_small", AllowedTouch),
        AdjacencyRule::new("work_table_medium", "work_table_medium", AllowedTouch),
        AdjacencyRule::new("work_table_large", "work_table_large", AllowedTouch),
        AdjacencyRule::new("work_table_medium", "work_table_large", AllowedTouch),
        AdjacencyRule::new("work_table_small", "work_table_medium", AllowedTouch),
        // Cold storage banks.
        AdjacencyRule::new("reach_in_refrigerator_1door", "reach_in_refrigerator_2door", AllowedTouch),
        AdjacencyRule::new("reach_in_refrigerator_1door", "reach_in_freezer_1door", AllowedTouch),
        AdjacencyRule::new("reach_in_refrigerator_2door", "reach_in_freezer_1door", AllowedTouch),
    ]
}

fn builtin_sets() -> HashMap<RestaurantType, Vec<EquipmentId>> {
    let mut sets = HashMap::new();
    let insert = |sets: &mut HashMap<RestaurantType, Vec<EquipmentId>>,
                  t: RestaurantType,
                  ids: &[&str]| {
        sets.insert(t, ids.iter().map(|s| s.to_string()).collect());
    };

    insert(
        &mut sets,
        RestaurantType::FastFood,
        &[
            "reach_in_refrigerator_2door",
            "reach_in_freezer_1door",
            "work_table_medium",
            "gas_range_4burner",
            "deep_fryer_double",
            "griddle",
            "three_compartment_sink",
            "hand_wash_sink",
        ],
    );
    insert(
        &mut sets,
        RestaurantType::Casual,
        &[
            "reach_in_refrigerator_2door",
            "reach_in_freezer_1door",
            "dry_storage_shelf",
            "work_table_large",
            "prep_sink",
            "gas_range_6burner",
            "deep_fryer_single",
            "convection_oven",
            "three_compartment_sink",
            "dishwasher_undercounter",
            "hand_wash_sink",
        ],
    );
    insert(
        &mut sets,
        RestaurantType::FineDining,
        &[
            "reach_in_refrigerator_2door",
            "reach_in_refrigerator_2door",
            "reach_in_freezer_1door",
            "dry_storage_shelf",
            "dry_storage_shelf",
            "work_table_large",
            "work_table_large",
            "prep_sink",
            "food_processor_station",
            "gas_range_6burner",
            "gas_range_4burner",
            "convection_oven",
            "salamander",
            "three_compartment_sink",
            "dishwasher_door_type",
            "drying_rack",
            "hand_wash_sink",
        ],
    );
    insert(
        &mut sets,
        RestaurantType::Cafeteria,
        &[
            "reach_in_refrigerator_2door",
            "reach_in_refrigerator_2door",
            "reach_in_freezer_1door",
            "dry_storage_shelf",
            "dry_storage_shelf",
            "work_table_large",
            "work_table_large",
            "work_table_medium",
            "prep_sink",
            "gas_range_6burner",
            "deep_fryer_double",
            "convection_oven",
            "griddle",
            "three_compartment_sink",
            "dishwasher_door_type",
            "drying_rack",
            "hand_wash_sink",
            "hand_wash_sink",
        ],
    );
    insert(
        &mut sets,
        RestaurantType::GhostKitchen,
        &[
            "reach_in_refrigerator_2door",
            "reach_in_freezer_1door",
            "work_table_medium",
            "gas_range_6burner",
            "deep_fryer_single",
            "convection_oven",
            "three_compartment_sink",
            "hand_wash_sink",
        ],
    );

    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_complete() {
        let catalog = Catalog::builtin();
        assert!(catalog.specs().len() >= 20);

        // Every default set entry resolves.
        for t in RestaurantType::ALL {
            let required = catalog.required_for(t, 50);
            assert!(!required.is_empty(), "{t:?} has no required equipment");
            for req in &required {
                assert!(catalog.get(&req.id).is_some());
                assert!(req.count >= 1);
            }
        }
    }

    #[test]
    fn test_every_zone_covered() {
        let catalog = Catalog::builtin();
        for t in RestaurantType::ALL {
            let required = catalog.required_for(t, 50);
            let mut zones: Vec<ZoneKind> = required
                .iter()
                .filter_map(|r| catalog.get(&r.id).map(|s| s.zone))
                .collect();
            zones.dedup();
            for kind in [
                ZoneKind::Storage,
                ZoneKind::Preparation,
                ZoneKind::Cooking,
                ZoneKind::Washing,
            ] {
                assert!(zones.contains(&kind), "{t:?} set misses {kind:?}");
            }
        }
    }

    #[test]
    fn test_seat_scaling() {
        let catalog = Catalog::builtin();
        let at_50 = catalog.required_for(RestaurantType::Cafeteria, 50);
        let at_200 = catalog.required_for(RestaurantType::Cafeteria, 200);

        let count = |reqs: &[Requirement], id: &str| {
            reqs.iter().find(|r| r.id == id).map(|r| r.count).unwrap_or(0)
        };
        assert!(count(&at_200, "hand_wash_sink") > count(&at_50, "hand_wash_sink"));
        assert!(count(&at_200, "work_table_large") > count(&at_50, "work_table_large"));
    }

    #[test]
    fn test_adjacency_symmetric() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.adjacency("three_compartment_sink", "dishwasher_undercounter"),
            Some(AdjacencyKind::RequiredNear)
        );
        assert_eq!(
            catalog.adjacency("dishwasher_undercounter", "three_compartment_sink"),
            Some(AdjacencyKind::RequiredNear)
        );
        assert_eq!(
            catalog.adjacency("deep_fryer_single", "three_compartment_sink"),
            Some(AdjacencyKind::ForbiddenNear)
        );
        assert_eq!(catalog.adjacency("griddle", "prep_sink"), None);
    }

    #[test]
    fn test_unknown_restaurant_type_falls_back() {
        // A catalog missing a set falls back to the casual set.
        let builtin = Catalog::builtin();
        let mut sets = HashMap::new();
        sets.insert(
            RestaurantType::Casual,
            vec!["gas_range_4burner".to_string()],
        );
        let catalog = Catalog::from_parts(builtin.specs().to_vec(), Vec::new(), sets);
        let required = catalog.required_for(RestaurantType::FastFood, 50);
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].id, "gas_range_4burner");
    }
}
