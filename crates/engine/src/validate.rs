//! Constraint validator: checks a finished layout and reports violations.
//!
//! The validator never mutates the layout and never fails; every breach
//! becomes a [`Violation`]. Hard violations make the layout unsuccessful,
//! soft ones only lower the safety sub-score. The returned list is sorted
//! hard-first with a stable tiebreak so repeated runs report identically.

use crate::geometry;
use crate::placement::{clearance_polygon, footprint_polygon, front_probe, label};
use galley_core::{
    AdjacencyKind, Catalog, ConstraintKind, Kitchen, Limits, Placement, Severity, Violation, Zone,
};

/// Validates a layout against all placement constraints.
pub fn validate_layout(
    kitchen: &Kitchen,
    zones: &[Zone],
    placements: &[Placement],
    catalog: &Catalog,
    limits: &Limits,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Resolved footprints, skipping ids the catalog does not know.
    let resolved: Vec<(&Placement, Vec<(f64, f64)>)> = placements
        .iter()
        .filter_map(|p| {
            catalog
                .get(&p.equipment_id)
                .map(|spec| (p, footprint_polygon(p, spec)))
        })
        .collect();

    check_containment(kitchen, zones, catalog, &resolved, limits, &mut violations);
    check_pairwise(catalog, &resolved, limits, &mut violations);
    check_adjacency(catalog, &resolved, limits, &mut violations);
    check_aisles(kitchen, catalog, &resolved, limits, &mut violations);

    violations.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.subject.cmp(&b.subject))
    });
    violations
}

fn check_containment(
    kitchen: &Kitchen,
    zones: &[Zone],
    catalog: &Catalog,
    resolved: &[(&Placement, Vec<(f64, f64)>)],
    limits: &Limits,
    violations: &mut Vec<Violation>,
) {
    for (p, fp) in resolved {
        let fp_area = geometry::area(fp);

        let inside = match zones.iter().find(|z| z.kind == p.zone) {
            Some(zone) => geometry::overlap_area(&zone.polygon, fp),
            None => 0.0,
        };
        let outside = fp_area - inside;
        if outside > geometry::AREA_EPS {
            violations.push(Violation::new(
                ConstraintKind::Containment,
                Severity::Hard,
                label(p),
                outside,
            ));
        }

        // Wall clearance; wall-backed equipment is meant to touch.
        let spec = match catalog.get(&p.equipment_id) {
            Some(s) => s,
            None => continue,
        };
        if !spec.requires_wall {
            let d = geometry::boundary_distance(&kitchen.vertices, fp);
            if d < limits.wall_clearance - geometry::EPS {
                violations.push(Violation::new(
                    ConstraintKind::ClearanceOverlap,
                    Severity::Hard,
                    label(p),
                    limits.wall_clearance - d,
                ));
            }
        }
    }
}

fn check_pairwise(
    catalog: &Catalog,
    resolved: &[(&Placement, Vec<(f64, f64)>)],
    limits: &Limits,
    violations: &mut Vec<Violation>,
) {
    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            let (p, p_fp) = &resolved[i];
            let (q, q_fp) = &resolved[j];

            if matches!(
                catalog.adjacency(&p.equipment_id, &q.equipment_id),
                Some(AdjacencyKind::AllowedTouch)
            ) {
                // Flush banks only need non-overlapping footprints.
                let overlap = geometry::overlap_area(p_fp, q_fp);
                if overlap > geometry::AREA_EPS {
                    violations.push(
                        Violation::new(
                            ConstraintKind::ClearanceOverlap,
                            Severity::Hard,
                            label(p),
                            overlap,
                        )
                        .with_other(label(q)),
                    );
                }
                continue;
            }

            let p_spec = catalog.get(&p.equipment_id);
            let q_spec = catalog.get(&q.equipment_id);
            let (Some(p_spec), Some(q_spec)) = (p_spec, q_spec) else {
                continue;
            };

            let overlap = geometry::overlap_area(
                &clearance_polygon(p, p_spec),
                &clearance_polygon(q, q_spec),
            );
            if overlap > geometry::AREA_EPS {
                violations.push(
                    Violation::new(
                        ConstraintKind::ClearanceOverlap,
                        Severity::Hard,
                        label(p),
                        overlap,
                    )
                    .with_other(label(q)),
                );
                continue;
            }

            let dist = geometry::min_distance(p_fp, q_fp);
            if dist < limits.equipment_spacing - geometry::EPS {
                violations.push(
                    Violation::new(
                        ConstraintKind::ClearanceOverlap,
                        Severity::Soft,
                        label(p),
                        limits.equipment_spacing - dist,
                    )
                    .with_other(label(q)),
                );
            }
        }
    }
}

fn check_adjacency(
    catalog: &Catalog,
    resolved: &[(&Placement, Vec<(f64, f64)>)],
    limits: &Limits,
    violations: &mut Vec<Violation>,
) {
    for rule in catalog.adjacency_rules() {
        match rule.kind {
            AdjacencyKind::RequiredNear => {
                // One violation per rule, measured on the closest pair: a
                // sink only needs one dishwasher next to it.
                let mut best: Option<(String, String, f64)> = None;
                for (p, p_fp) in resolved.iter().filter(|(p, _)| p.equipment_id == rule.a) {
                    for (q, q_fp) in resolved.iter().filter(|(q, _)| q.equipment_id == rule.b) {
                        let d = geometry::min_distance(p_fp, q_fp);
                        if best.as_ref().map(|(_, _, bd)| d < *bd).unwrap_or(true) {
                            best = Some((label(p), label(q), d));
                        }
                    }
                }
                if let Some((a, b, d)) = best {
                    if d > limits.required_adjacency_max + geometry::EPS {
                        violations.push(
                            Violation::new(
                                ConstraintKind::RequiredAdjacency,
                                Severity::Soft,
                                a,
                                d - limits.required_adjacency_max,
                            )
                            .with_other(b),
                        );
                    }
                }
            }
            AdjacencyKind::ForbiddenNear => {
                // Every offending pair is reported.
                for (p, p_fp) in resolved.iter().filter(|(p, _)| p.equipment_id == rule.a) {
                    for (q, q_fp) in resolved.iter().filter(|(q, _)| q.equipment_id == rule.b) {
                        let d = geometry::min_distance(p_fp, q_fp);
                        if d < limits.forbidden_adjacency_min - geometry::EPS {
                            violations.push(
                                Violation::new(
                                    ConstraintKind::ForbiddenAdjacency,
                                    Severity::Hard,
                                    label(p),
                                    limits.forbidden_adjacency_min - d,
                                )
                                .with_other(label(q)),
                            );
                        }
                    }
                }
            }
            AdjacencyKind::AllowedTouch => {}
        }
    }
}

fn check_aisles(
    kitchen: &Kitchen,
    catalog: &Catalog,
    resolved: &[(&Placement, Vec<(f64, f64)>)],
    limits: &Limits,
    violations: &mut Vec<Violation>,
) {
    let probes: Vec<Option<Vec<(f64, f64)>>> = resolved
        .iter()
        .map(|(p, _)| {
            catalog
                .get(&p.equipment_id)
                .map(|spec| front_probe(p, spec, limits.min_aisle))
        })
        .collect();

    for (i, (p, _)) in resolved.iter().enumerate() {
        let Some(probe) = &probes[i] else { continue };

        // The operator aisle must fit inside the room.
        let probe_area = geometry::area(probe);
        let in_room = geometry::overlap_area(&kitchen.vertices, probe);
        if probe_area - in_room > geometry::AREA_EPS {
            violations.push(Violation::new(
                ConstraintKind::AisleWidth,
                Severity::Hard,
                label(p),
                probe_area - in_room,
            ));
        }

        // And no other unit may stand in it. Report each unordered pair
        // once.
        for (j, (q, q_fp)) in resolved.iter().enumerate().skip(i + 1) {
            let p_fp = &resolved[i].1;
            let blocked_pq = geometry::overlaps(probe, q_fp);
            let blocked_qp = probes[j]
                .as_ref()
                .map(|qp| geometry::overlaps(qp, p_fp))
                .unwrap_or(false);
            if blocked_pq || blocked_qp {
                let gap = geometry::min_distance(p_fp, q_fp);
                violations.push(
                    Violation::new(
                        ConstraintKind::AisleWidth,
                        Severity::Hard,
                        label(p),
                        (limits.min_aisle - gap).max(0.0),
                    )
                    .with_other(label(q)),
                );
            }
        }
    }
}
