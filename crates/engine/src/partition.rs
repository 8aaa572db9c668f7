//! Zone partitioner: splits the footprint into the four functional zones.
//!
//! Zones are parallel strips swept along the longest axis of the footprint
//! bounding box, in workflow order (storage at the low end, washing at the
//! high end). Cut positions are solved by bisection so each strip hits its
//! target share of the real footprint area, which keeps the shares exact on
//! L- and U-shaped rooms where strip width does not map linearly to area.

use crate::geometry;
use galley_core::{ratio_bands, Error, Kitchen, Result, SolverConfig, Zone, WORKFLOW_ORDER};

/// Partitions the footprint with each zone at its band midpoint.
pub fn partition(kitchen: &Kitchen, config: &SolverConfig) -> Result<Vec<Zone>> {
    partition_with_offsets(kitchen, config, [0.0; 4])
}

/// Partitions the footprint with per-zone ratio offsets from the band
/// midpoints. Offsets are clamped into the bands; the optimizer uses this to
/// trade area between zones without leaving the allowed ranges.
pub fn partition_with_offsets(
    kitchen: &Kitchen,
    config: &SolverConfig,
    offsets: [f64; 4],
) -> Result<Vec<Zone>> {
    kitchen.validate()?;
    geometry::validate_simple(&kitchen.vertices)?;

    let total = kitchen.area();
    let bands = ratio_bands(kitchen.restaurant_type);

    // Clamped targets, normalized to a full partition of the footprint.
    let mut ratios = [0.0; 4];
    for i in 0..4 {
        ratios[i] = (bands[i].midpoint() + offsets[i]).clamp(bands[i].min, bands[i].max);
    }
    let sum: f64 = ratios.iter().sum();
    for r in &mut ratios {
        *r /= sum;
    }
    for i in 0..4 {
        if !bands[i].contains(ratios[i]) {
            log::debug!(
                "zone ratio {:.3} left band [{:.3}, {:.3}] after normalization",
                ratios[i],
                bands[i].min,
                bands[i].max
            );
            return Err(Error::InfeasibleFootprint {
                area_sqm: total,
                attempted_ratios: ratios,
            });
        }
    }

    let bounds = kitchen.bounds();
    let (min_x, min_y, max_x, max_y) = bounds;
    let along_x = (max_x - min_x) >= (max_y - min_y);
    let (lo, hi) = if along_x { (min_x, max_x) } else { (min_y, max_y) };

    // Storage and preparation cuts from the low end, washing cut from the
    // high end; cooking takes the exact residual between them.
    let cut_storage = solve_cut(&kitchen.vertices, bounds, along_x, ratios[0] * total);
    let cut_prep = solve_cut(
        &kitchen.vertices,
        bounds,
        along_x,
        (ratios[0] + ratios[1]) * total,
    );
    let cut_washing = solve_cut(
        &kitchen.vertices,
        bounds,
        along_x,
        (1.0 - ratios[3]) * total,
    );

    let spans = [
        (lo, cut_storage),
        (cut_storage, cut_prep),
        (cut_prep, cut_washing),
        (cut_washing, hi),
    ];

    let mut zones = Vec::with_capacity(4);
    for (kind, &(span_lo, span_hi)) in WORKFLOW_ORDER.iter().zip(&spans) {
        if span_hi - span_lo < config.min_zone_depth {
            return Err(Error::InfeasibleFootprint {
                area_sqm: total,
                attempted_ratios: ratios,
            });
        }

        let strip = slab(bounds, along_x, span_lo, span_hi);
        let pieces = geometry::intersection(&kitchen.vertices, &strip);
        let area: f64 = pieces.iter().map(|p| geometry::area(p)).sum();
        // Disconnected strips happen on U shapes; equipment goes in the
        // largest piece.
        let polygon = pieces
            .into_iter()
            .max_by(|a, b| {
                geometry::area(a)
                    .partial_cmp(&geometry::area(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or(Error::InfeasibleFootprint {
                area_sqm: total,
                attempted_ratios: ratios,
            })?;

        zones.push(Zone {
            kind: *kind,
            polygon,
            area,
            band: bands[kind.workflow_index()],
        });
    }

    Ok(zones)
}

/// Axis-aligned slab polygon covering `[lo, hi]` along the sweep axis and
/// the full footprint extent (plus a margin) across it.
fn slab(
    bounds: (f64, f64, f64, f64),
    along_x: bool,
    lo: f64,
    hi: f64,
) -> Vec<(f64, f64)> {
    let (min_x, min_y, max_x, max_y) = bounds;
    if along_x {
        geometry::rect(lo, min_y - 1.0, hi - lo, (max_y - min_y) + 2.0)
    } else {
        geometry::rect(min_x - 1.0, lo, (max_x - min_x) + 2.0, hi - lo)
    }
}

/// Finds the cut position where the footprint area below it along the sweep
/// axis equals `target`. The area function is monotone in the cut, so plain
/// bisection converges.
fn solve_cut(
    footprint: &[(f64, f64)],
    bounds: (f64, f64, f64, f64),
    along_x: bool,
    target: f64,
) -> f64 {
    let (min_x, min_y, max_x, max_y) = bounds;
    let (mut lo, mut hi) = if along_x { (min_x, max_x) } else { (min_y, max_y) };

    for _ in 0..60 {
        let mid = (lo + hi) / 2.0;
        let strip = slab(bounds, along_x, if along_x { min_x } else { min_y }, mid);
        let below: f64 = geometry::intersection(footprint, &strip)
            .iter()
            .map(|p| geometry::area(p))
            .sum();
        if below < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    (lo + hi) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use galley_core::{RestaurantType, ZoneKind};

    #[test]
    fn test_rectangle_partition_covers_footprint() {
        let kitchen = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 50);
        let config = SolverConfig::default();
        let zones = partition(&kitchen, &config).unwrap();

        assert_eq!(zones.len(), 4);
        let sum: f64 = zones.iter().map(|z| z.area).sum();
        assert_relative_eq!(sum, 80.0, epsilon = 1e-3);

        for zone in &zones {
            let ratio = zone.area / 80.0;
            assert!(
                zone.band.contains(ratio),
                "{:?} ratio {ratio:.3} outside band",
                zone.kind
            );
        }
    }

    #[test]
    fn test_zones_in_workflow_order_along_long_axis() {
        let kitchen = Kitchen::rectangle(12.0, 6.0, RestaurantType::Casual, 50);
        let config = SolverConfig::default();
        let zones = partition(&kitchen, &config).unwrap();

        // Long axis is x; storage sits at the low end, washing at the high
        // end.
        let centers: Vec<f64> = zones
            .iter()
            .map(|z| {
                let (min_x, _, max_x, _) = z.bounds();
                (min_x + max_x) / 2.0
            })
            .collect();
        for pair in centers.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(zones[0].kind, ZoneKind::Storage);
        assert_eq!(zones[3].kind, ZoneKind::Washing);
    }

    #[test]
    fn test_l_shape_partition_exact_shares() {
        let kitchen = Kitchen::l_shape(10.0, 8.0, 4.0, 3.0, RestaurantType::Casual, 50);
        let config = SolverConfig::default();
        let zones = partition(&kitchen, &config).unwrap();

        let total = kitchen.area();
        let sum: f64 = zones.iter().map(|z| z.area).sum();
        assert_relative_eq!(sum, total, epsilon = 1e-3);
        for zone in &zones {
            assert!(zone.band.contains(zone.area / total));
        }
    }

    #[test]
    fn test_tiny_footprint_is_infeasible() {
        let kitchen = Kitchen::rectangle(2.0, 1.5, RestaurantType::Casual, 10);
        let config = SolverConfig::default();
        match partition(&kitchen, &config) {
            Err(Error::InfeasibleFootprint { area_sqm, .. }) => {
                assert_relative_eq!(area_sqm, 3.0, epsilon = 1e-9);
            }
            other => panic!("expected InfeasibleFootprint, got {other:?}"),
        }
    }

    #[test]
    fn test_offsets_shift_area_within_band() {
        let kitchen = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 50);
        let config = SolverConfig::default();

        let base = partition(&kitchen, &config).unwrap();
        let shifted =
            partition_with_offsets(&kitchen, &config, [0.04, -0.02, 0.0, -0.02]).unwrap();

        assert!(shifted[0].area > base[0].area);
        let total = kitchen.area();
        for zone in &shifted {
            assert!(zone.band.contains(zone.area / total));
        }
    }

    #[test]
    fn test_invalid_kitchen_rejected() {
        let kitchen = Kitchen::rectangle(10.0, 8.0, RestaurantType::Casual, 0);
        let config = SolverConfig::default();
        assert!(matches!(
            partition(&kitchen, &config),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
