//! Placement engine: grid-scan first-fit placement of equipment in zones.
//!
//! Instances are placed per zone, largest footprint first, by scanning a
//! regular anchor grid over the zone in row-major order and taking the first
//! candidate that passes all checks. Instances with no fitting candidate
//! become [`ConstraintKind::UnplaceableEquipment`] violations; the run
//! continues without them.

use crate::geometry;
use galley_core::{
    AdjacencyKind, Catalog, ConstraintKind, EquipmentSpec, Kitchen, Placement, Rotation, Severity,
    SolverConfig, Violation, Zone,
};

/// Subject label for a placed instance, e.g. `griddle#0`.
pub fn label(p: &Placement) -> String {
    format!("{}#{}", p.equipment_id, p.instance)
}

/// Oriented footprint rectangle of a placement.
pub fn footprint_polygon(p: &Placement, spec: &EquipmentSpec) -> Vec<(f64, f64)> {
    let (w, d) = p.oriented_size(spec.width, spec.depth);
    geometry::rect(p.x, p.y, w, d)
}

/// Footprint expanded by the spec's clearances, oriented with the
/// placement. Front clearance extends toward the facing direction, back
/// toward the wall side.
pub fn clearance_polygon(p: &Placement, spec: &EquipmentSpec) -> Vec<(f64, f64)> {
    let (w, d) = p.oriented_size(spec.width, spec.depth);
    let c = spec.clearance;
    let (left, right, down, up) = match p.rotation {
        Rotation::R0 => (c.sides, c.sides, c.back, c.front),
        Rotation::R90 => (c.front, c.back, c.sides, c.sides),
        Rotation::R180 => (c.sides, c.sides, c.front, c.back),
        Rotation::R270 => (c.back, c.front, c.sides, c.sides),
    };
    geometry::rect(p.x - left, p.y - down, w + left + right, d + down + up)
}

/// Rectangle extending `depth` meters beyond the front edge of a placement,
/// spanning the footprint width. Used for operator-access and aisle checks.
pub fn front_probe(p: &Placement, spec: &EquipmentSpec, depth: f64) -> Vec<(f64, f64)> {
    let (w, d) = p.oriented_size(spec.width, spec.depth);
    match p.rotation {
        Rotation::R0 => geometry::rect(p.x, p.y + d, w, depth),
        Rotation::R90 => geometry::rect(p.x - depth, p.y, depth, d),
        Rotation::R180 => geometry::rect(p.x, p.y - depth, w, depth),
        Rotation::R270 => geometry::rect(p.x + w, p.y, depth, d),
    }
}

/// First-fit placement over partitioned zones.
pub struct PlacementEngine<'a> {
    kitchen: &'a Kitchen,
    catalog: &'a Catalog,
    config: &'a SolverConfig,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(kitchen: &'a Kitchen, catalog: &'a Catalog, config: &'a SolverConfig) -> Self {
        Self {
            kitchen,
            catalog,
            config,
        }
    }

    /// Places every required instance for the kitchen's restaurant type.
    ///
    /// Returns the placements that fit plus one hard
    /// `UnplaceableEquipment` violation per instance that did not.
    pub fn place_all(&self, zones: &[Zone]) -> (Vec<Placement>, Vec<Violation>) {
        let required = self
            .catalog
            .required_for(self.kitchen.restaurant_type, self.kitchen.seat_count);

        let mut placements: Vec<Placement> = Vec::new();
        let mut violations: Vec<Violation> = Vec::new();

        for zone in zones {
            // Instances for this zone, largest footprint first; ties break
            // on identity so the order is stable.
            let mut queue: Vec<(&EquipmentSpec, usize)> = Vec::new();
            for req in &required {
                let Some(spec) = self.catalog.get(&req.id) else {
                    continue;
                };
                if spec.zone != zone.kind {
                    continue;
                }
                for instance in 0..req.count {
                    queue.push((spec, instance));
                }
            }
            queue.sort_by(|(a, ai), (b, bi)| {
                b.footprint_area()
                    .partial_cmp(&a.footprint_area())
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
                    .then_with(|| ai.cmp(bi))
            });

            for (spec, instance) in queue {
                match self.try_place(spec, instance, zone, &placements, 0) {
                    Some(p) => placements.push(p),
                    None => {
                        log::debug!("no fit for {}#{} in {:?}", spec.id, instance, zone.kind);
                        violations.push(Violation::new(
                            ConstraintKind::UnplaceableEquipment,
                            Severity::Hard,
                            format!("{}#{}", spec.id, instance),
                            spec.footprint_area(),
                        ));
                    }
                }
            }
        }

        (placements, violations)
    }

    /// Scans the zone's anchor grid for the first fitting candidate.
    ///
    /// `start` rotates the scan order, letting the optimizer relocate an
    /// instance to a different part of the zone.
    pub fn try_place(
        &self,
        spec: &EquipmentSpec,
        instance: usize,
        zone: &Zone,
        existing: &[Placement],
        start: usize,
    ) -> Option<Placement> {
        let anchors = self.anchor_grid(zone);
        if anchors.is_empty() {
            return None;
        }
        let start = start % anchors.len();

        for idx in (start..anchors.len()).chain(0..start) {
            let (x, y) = anchors[idx];
            for rotation in Rotation::ALL {
                let candidate =
                    Placement::new(spec.id.clone(), instance, zone.kind, x, y, rotation);
                if self.fits(&candidate, spec, zone, existing) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Row-major anchor grid over the zone bounding box.
    fn anchor_grid(&self, zone: &Zone) -> Vec<(f64, f64)> {
        let (min_x, min_y, max_x, max_y) = zone.bounds();
        let step = self.config.grid_step;
        let mut anchors = Vec::new();
        let mut y = min_y;
        while y <= max_y {
            let mut x = min_x;
            while x <= max_x {
                anchors.push((x, y));
                x += step;
            }
            y += step;
        }
        anchors
    }

    /// Full acceptance check for a candidate placement.
    pub fn fits(
        &self,
        candidate: &Placement,
        spec: &EquipmentSpec,
        zone: &Zone,
        existing: &[Placement],
    ) -> bool {
        let fp = footprint_polygon(candidate, spec);

        // Zone containment, with a cheap path for rectangular zones.
        if !polygon_in_zone(&fp, zone) {
            return false;
        }

        // Wall relationship: wall-backed equipment must touch the boundary,
        // everything else keeps the wall clearance.
        let wall_dist = geometry::boundary_distance(&self.kitchen.vertices, &fp);
        if spec.requires_wall {
            if wall_dist > geometry::AREA_EPS {
                return false;
            }
        } else if wall_dist < self.config.limits.wall_clearance - geometry::EPS {
            return false;
        }

        // The operator aisle in front must stay inside the room.
        let probe = front_probe(candidate, spec, self.config.limits.min_aisle);
        if !polygon_in_footprint(&probe, &self.kitchen.vertices) {
            return false;
        }

        for other in existing {
            // A relocated instance skips itself.
            if other.equipment_id == candidate.equipment_id && other.instance == candidate.instance
            {
                continue;
            }
            let Some(other_spec) = self.catalog.get(&other.equipment_id) else {
                continue;
            };
            let other_fp = footprint_polygon(other, other_spec);

            if geometry::overlaps(&fp, &other_fp) {
                return false;
            }

            // Neither unit may block the other's operator aisle.
            if geometry::overlaps(&probe, &other_fp) {
                return false;
            }
            let other_probe = front_probe(other, other_spec, self.config.limits.min_aisle);
            if geometry::overlaps(&other_probe, &fp) {
                return false;
            }

            let touching_allowed = matches!(
                self.catalog
                    .adjacency(&candidate.equipment_id, &other.equipment_id),
                Some(AdjacencyKind::AllowedTouch)
            );
            if touching_allowed {
                continue;
            }

            if geometry::overlaps(
                &clearance_polygon(candidate, spec),
                &clearance_polygon(other, other_spec),
            ) {
                return false;
            }
            if geometry::min_distance(&fp, &other_fp)
                < self.config.limits.equipment_spacing - geometry::EPS
            {
                return false;
            }
        }

        true
    }
}

/// Containment test against the room boundary, with an AABB fast path for
/// rectangular rooms.
fn polygon_in_footprint(poly: &[(f64, f64)], footprint: &[(f64, f64)]) -> bool {
    if geometry::is_axis_aligned_rect(footprint) {
        let (pmin_x, pmin_y, pmax_x, pmax_y) = geometry::bounds(poly);
        let (fmin_x, fmin_y, fmax_x, fmax_y) = geometry::bounds(footprint);
        return pmin_x >= fmin_x - geometry::EPS
            && pmin_y >= fmin_y - geometry::EPS
            && pmax_x <= fmax_x + geometry::EPS
            && pmax_y <= fmax_y + geometry::EPS;
    }
    geometry::contains_polygon(footprint, poly)
}

/// Containment test against a zone polygon, with an AABB fast path for the
/// rectangular zones the strip partitioner usually produces.
fn polygon_in_zone(fp: &[(f64, f64)], zone: &Zone) -> bool {
    let (fmin_x, fmin_y, fmax_x, fmax_y) = geometry::bounds(fp);
    let (zmin_x, zmin_y, zmax_x, zmax_y) = zone.bounds();
    if fmin_x < zmin_x - geometry::EPS
        || fmin_y < zmin_y - geometry::EPS
        || fmax_x > zmax_x + geometry::EPS
        || fmax_y > zmax_y + geometry::EPS
    {
        return false;
    }
    if geometry::is_axis_aligned_rect(&zone.polygon) {
        return true;
    }
    geometry::contains_polygon(&zone.polygon, fp)
}
