//! Decides how many worms each boundary represents.

use imageproc::{geometry::convex_hull, point::Point};
use log::warn;

use crate::contours::Boundary;

/// A boundary whose area exceeds this multiple of the reference area is
/// treated as a fused cluster of several worms.
pub const SPLIT_THRESHOLD: f64 = 1.5;

/// The per-boundary outcome of classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// How many worms this boundary counts as. Always at least 1.
    pub assigned_count: u64,
    /// Convex hull of the boundary, retained for annotation.
    pub hull: Vec<Point<i32>>,
    /// Whether the boundary was split into multiple worms by area.
    pub is_split: bool,
}

/// Classifies every boundary against the reference area.
///
/// A boundary with area `A` is a fused cluster when `A` is strictly greater
/// than [`SPLIT_THRESHOLD`] times the reference area; it then counts as
/// `round(A / reference)` worms, where rounding is `f64::round`
/// (half away from zero), clamped to at least 1. Every other boundary counts
/// as exactly one worm.
///
/// With `reference_area == None` there is no population data to split
/// against, so every boundary counts as one worm and a warning is logged.
/// This keeps the degenerate case free of undefined arithmetic.
///
/// The output preserves the input boundary order.
pub fn classify(boundaries: &[Boundary], reference_area: Option<f64>) -> Vec<Classification> {
    if reference_area.is_none() && !boundaries.is_empty() {
        warn!("no reference area available; counting every boundary as one worm");
    }

    boundaries
        .iter()
        .map(|boundary| {
            let hull = convex_hull(boundary.points.as_slice());
            match reference_area {
                Some(reference) if boundary.area > SPLIT_THRESHOLD * reference => {
                    let count = (boundary.area / reference).round() as u64;
                    Classification {
                        assigned_count: count.max(1),
                        hull,
                        is_split: true,
                    }
                }
                _ => Classification {
                    assigned_count: 1,
                    hull,
                    is_split: false,
                },
            }
        })
        .collect()
}

/// Total worm count: exactly the sum of the per-boundary assigned counts.
pub fn total_count(classifications: &[Classification]) -> u64 {
    classifications.iter().map(|c| c.assigned_count).sum()
}
