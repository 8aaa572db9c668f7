//! Layout scoring: four sub-scores combined into an overall quality value.
//!
//! Sub-scores are normalized to `[0, 1]` against footprint-derived
//! references so scores stay comparable across kitchen sizes. The weighted
//! combination lives in [`galley_core::Score`].

use crate::geometry;
use galley_core::{
    Catalog, Kitchen, Placement, Score, SolverConfig, Violation, Zone, ZoneKind, WORKFLOW_ORDER,
};

/// Travel-distance reference: this multiple of the bounding-box diagonal
/// counts as a fully inefficient workflow.
const WORKFLOW_REFERENCE_DIAGONALS: f64 = 1.5;

/// Violation penalty that zeroes the safety sub-score.
const SAFETY_REFERENCE_PENALTY: f64 = 10.0;

pub struct Scorer<'a> {
    kitchen: &'a Kitchen,
    catalog: &'a Catalog,
    config: &'a SolverConfig,
}

impl<'a> Scorer<'a> {
    pub fn new(kitchen: &'a Kitchen, catalog: &'a Catalog, config: &'a SolverConfig) -> Self {
        Self {
            kitchen,
            catalog,
            config,
        }
    }

    /// Scores a complete layout.
    pub fn score(
        &self,
        zones: &[Zone],
        placements: &[Placement],
        violations: &[Violation],
    ) -> Score {
        Score::combine(
            self.workflow_efficiency(zones, placements),
            self.space_utilization(zones, placements),
            self.safety_compliance(violations),
            self.accessibility(zones, placements),
        )
    }

    fn diagonal(&self) -> f64 {
        let (min_x, min_y, max_x, max_y) = self.kitchen.bounds();
        ((max_x - min_x).powi(2) + (max_y - min_y).powi(2)).sqrt()
    }

    /// Mean footprint center of the equipment in a zone, falling back to
    /// the zone polygon centroid when nothing is placed there.
    fn station_center(
        &self,
        zones: &[Zone],
        placements: &[Placement],
        kind: ZoneKind,
    ) -> (f64, f64) {
        let mut sum = (0.0, 0.0);
        let mut n = 0usize;
        for p in placements.iter().filter(|p| p.zone == kind) {
            if let Some(spec) = self.catalog.get(&p.equipment_id) {
                let (w, d) = p.oriented_size(spec.width, spec.depth);
                sum.0 += p.x + w / 2.0;
                sum.1 += p.y + d / 2.0;
                n += 1;
            }
        }
        if n > 0 {
            return (sum.0 / n as f64, sum.1 / n as f64);
        }
        match zones.iter().find(|z| z.kind == kind) {
            Some(zone) => geometry::centroid(&zone.polygon),
            None => geometry::centroid(&self.kitchen.vertices),
        }
    }

    /// Inverse of the travel distance along the workflow chain,
    /// storage -> preparation -> cooking -> washing.
    fn workflow_efficiency(&self, zones: &[Zone], placements: &[Placement]) -> f64 {
        let centers: Vec<(f64, f64)> = WORKFLOW_ORDER
            .iter()
            .map(|&kind| self.station_center(zones, placements, kind))
            .collect();

        let travel: f64 = centers
            .windows(2)
            .map(|w| distance(w[0], w[1]))
            .sum();

        let reference = WORKFLOW_REFERENCE_DIAGONALS * self.diagonal();
        if reference <= 0.0 {
            return 0.0;
        }
        (1.0 - travel / reference).clamp(0.0, 1.0)
    }

    /// Occupancy against the ideal band: full score inside, linear falloff
    /// on both sides. Crowded kitchens are penalized as well as empty ones.
    fn space_utilization(&self, zones: &[Zone], placements: &[Placement]) -> f64 {
        let zone_area: f64 = zones.iter().map(|z| z.area).sum();
        if zone_area <= 0.0 {
            return 0.0;
        }
        let equipment_area: f64 = placements
            .iter()
            .filter_map(|p| self.catalog.get(&p.equipment_id))
            .map(|s| s.footprint_area())
            .sum();
        let occupancy = equipment_area / zone_area;

        let (low, high) = self.config.occupancy_band;
        if occupancy < low {
            if low <= 0.0 {
                return 0.0;
            }
            occupancy / low
        } else if occupancy <= high {
            1.0
        } else if high >= 1.0 {
            0.0
        } else {
            (1.0 - (occupancy - high) / (1.0 - high)).max(0.0)
        }
    }

    /// Violation-weighted safety: 1.0 for a clean layout, dropping with
    /// each violation by severity and magnitude.
    fn safety_compliance(&self, violations: &[Violation]) -> f64 {
        let penalty: f64 = violations
            .iter()
            .map(|v| {
                let weight = if v.is_hard() { 1.0 } else { 0.25 };
                weight * (1.0 + v.magnitude.min(1.0))
            })
            .sum();
        (1.0 - penalty / SAFETY_REFERENCE_PENALTY).clamp(0.0, 1.0)
    }

    /// Proximity of the receiving entry to storage and of the service pass
    /// to the cook line.
    fn accessibility(&self, zones: &[Zone], placements: &[Placement]) -> f64 {
        let storage = self.station_center(zones, placements, ZoneKind::Storage);
        let cooking = self.station_center(zones, placements, ZoneKind::Cooking);

        let entry = self
            .kitchen
            .entry_point
            .unwrap_or_else(|| self.nearest_edge_midpoint(storage));
        let service = self
            .kitchen
            .service_point
            .unwrap_or_else(|| self.nearest_edge_midpoint(cooking));

        let diagonal = self.diagonal();
        if diagonal <= 0.0 {
            return 0.0;
        }
        let mean = (distance(entry, storage) + distance(service, cooking)) / 2.0;
        (1.0 - mean / diagonal).clamp(0.0, 1.0)
    }

    /// Midpoint of the bounding-box edge nearest to a target point; stands
    /// in for a door when no entry or service point is given.
    fn nearest_edge_midpoint(&self, target: (f64, f64)) -> (f64, f64) {
        let (min_x, min_y, max_x, max_y) = self.kitchen.bounds();
        let mid_x = (min_x + max_x) / 2.0;
        let mid_y = (min_y + max_y) / 2.0;
        let candidates = [
            (mid_x, min_y),
            (mid_x, max_y),
            (min_x, mid_y),
            (max_x, mid_y),
        ];
        candidates
            .into_iter()
            .min_by(|&a, &b| {
                distance(a, target)
                    .partial_cmp(&distance(b, target))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or((mid_x, min_y))
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use galley_core::{
        ratio_band, ConstraintKind, Placement, RestaurantType, Rotation, Severity,
    };

    fn setup() -> (Kitchen, Catalog, SolverConfig) {
        (
            Kitchen::rectangle(12.0, 8.0, RestaurantType::Casual, 50),
            Catalog::builtin(),
            SolverConfig::default(),
        )
    }

    fn zones_for(kitchen: &Kitchen) -> Vec<Zone> {
        crate::partition::partition(kitchen, &SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_clean_layout_scores_bounded() {
        let (kitchen, catalog, config) = setup();
        let zones = zones_for(&kitchen);
        let scorer = Scorer::new(&kitchen, &catalog, &config);

        let s = scorer.score(&zones, &[], &[]);
        assert!(s.overall >= 0.0 && s.overall <= 100.0);
        assert_relative_eq!(s.safety_compliance, 1.0, epsilon = 1e-9);
        // Nothing placed: utilization is at the bottom of the ramp.
        assert_relative_eq!(s.space_utilization, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_safety_drops_with_violations() {
        let (kitchen, catalog, config) = setup();
        let zones = zones_for(&kitchen);
        let scorer = Scorer::new(&kitchen, &catalog, &config);

        let hard = vec![Violation::new(
            ConstraintKind::ClearanceOverlap,
            Severity::Hard,
            "griddle#0",
            0.5,
        )];
        let soft = vec![Violation::new(
            ConstraintKind::RequiredAdjacency,
            Severity::Soft,
            "prep_sink#0",
            0.5,
        )];

        let clean = scorer.score(&zones, &[], &[]).safety_compliance;
        let with_soft = scorer.score(&zones, &[], &soft).safety_compliance;
        let with_hard = scorer.score(&zones, &[], &hard).safety_compliance;
        assert!(clean > with_soft);
        assert!(with_soft > with_hard);
    }

    #[test]
    fn test_workflow_prefers_compact_chain() {
        let (kitchen, catalog, config) = setup();
        let zones = zones_for(&kitchen);
        let scorer = Scorer::new(&kitchen, &catalog, &config);

        // Chain strung across the room versus bunched stations.
        let spread = vec![
            Placement::new("dry_storage_shelf", 0, ZoneKind::Storage, 0.2, 0.2, Rotation::R0),
            Placement::new("work_table_small", 0, ZoneKind::Preparation, 3.5, 7.0, Rotation::R0),
            Placement::new("griddle", 0, ZoneKind::Cooking, 6.5, 0.2, Rotation::R0),
            Placement::new("drying_rack", 0, ZoneKind::Washing, 10.5, 7.0, Rotation::R0),
        ];
        let compact = vec![
            Placement::new("dry_storage_shelf", 0, ZoneKind::Storage, 2.0, 4.0, Rotation::R0),
            Placement::new("work_table_small", 0, ZoneKind::Preparation, 4.0, 4.0, Rotation::R0),
            Placement::new("griddle", 0, ZoneKind::Cooking, 6.5, 4.0, Rotation::R0),
            Placement::new("drying_rack", 0, ZoneKind::Washing, 10.0, 4.0, Rotation::R0),
        ];

        let spread_score = scorer.score(&zones, &spread, &[]).workflow_efficiency;
        let compact_score = scorer.score(&zones, &compact, &[]).workflow_efficiency;
        assert!(compact_score > spread_score);
    }

    #[test]
    fn test_space_utilization_band() {
        let (kitchen, catalog, config) = setup();
        let scorer = Scorer::new(&kitchen, &catalog, &config);

        // Synthetic zones with known total area.
        let zone = Zone {
            kind: ZoneKind::Cooking,
            polygon: kitchen.vertices.clone(),
            area: 10.0,
            band: ratio_band(RestaurantType::Casual, ZoneKind::Cooking),
        };
        let zones = vec![zone];

        // Convection oven is 0.684 sqm; seven of them put occupancy inside
        // the 0.40..0.70 band.
        let mut placements = Vec::new();
        for i in 0..7 {
            placements.push(Placement::new(
                "convection_oven",
                i,
                ZoneKind::Cooking,
                i as f64,
                0.0,
                Rotation::R0,
            ));
        }
        let in_band = scorer.score(&zones, &placements, &[]).space_utilization;
        assert_relative_eq!(in_band, 1.0, epsilon = 1e-9);

        // One oven is far below the band.
        let sparse = scorer
            .score(&zones, &placements[..1], &[])
            .space_utilization;
        assert!(sparse < 0.5);
    }

    #[test]
    fn test_accessibility_uses_explicit_points() {
        let (kitchen, catalog, config) = setup();
        let zones = zones_for(&kitchen);

        // Entry right next to the storage zone versus across the room.
        let storage_center = geometry::centroid(&zones[0].polygon);
        let near = kitchen
            .clone()
            .with_entry_point(storage_center.0, 0.0)
            .with_service_point(8.0, 0.0);
        let far = kitchen
            .clone()
            .with_entry_point(12.0, 8.0)
            .with_service_point(12.0, 8.0);

        let near_score = Scorer::new(&near, &catalog, &config)
            .score(&zones, &[], &[])
            .accessibility;
        let far_score = Scorer::new(&far, &catalog, &config)
            .score(&zones, &[], &[])
            .accessibility;
        assert!(near_score > far_score);
    }
}
