use image::GrayImage;
use imageproc::{contours::find_contours, point::Point};
use num::{Num, NumCast};
use num_traits::AsPrimitive;

/// A closed polygon approximating the outer edge of one detected region.
///
/// Boundaries are immutable once extracted. The enclosed `area` is computed
/// once at extraction time and is always non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// The polygon vertices, in extraction order.
    pub points: Vec<Point<i32>>,
    /// The enclosed polygon area, in square pixels.
    pub area: f64,
}

/// Extracts the external boundaries of an edge map.
///
/// Runs contour tracing on the non-zero pixels of `edge_map` and keeps only
/// the top-level contours of the hierarchy. Nested (hole) contours are
/// discarded by design: a worm's outline is expected to be a single closed
/// loop, not a filled region with holes.
///
/// The iteration order of the tracer is preserved, so repeated runs over the
/// same edge map produce the same boundary sequence.
pub fn extract_boundaries(edge_map: &GrayImage) -> Vec<Boundary> {
    find_contours::<i32>(edge_map)
        .into_iter()
        .filter(|contour| contour.parent.is_none())
        .map(|contour| Boundary {
            area: polygon_area(&contour.points),
            points: contour.points,
        })
        .collect()
}

/// Computes the area enclosed by a closed polygon using the shoelace formula.
///
/// The polygon is implicitly closed between the last and first point. The
/// result is the absolute enclosed area, so vertex winding does not matter.
/// Polygons with fewer than 3 points enclose nothing and have area `0.0`.
///
/// # Type Parameters
///
/// * `T`: The numeric type of the vertex coordinates. It must be losslessly
///   convertible to `f64`, such as `i32` or `u32`.
pub fn polygon_area<T>(points: &[Point<T>]) -> f64
where
    T: Num + NumCast + Copy + PartialEq + Eq + AsPrimitive<f64>,
{
    if points.len() < 3 {
        return 0.0;
    }

    let twice_signed_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p1, p2)| p1.x.as_() * p2.y.as_() - p2.x.as_() * p1.y.as_())
        .sum();

    twice_signed_area.abs() / 2.0
}
