//! Statistical estimate of the area of one isolated worm.
//!
//! Touching worms fuse into one boundary, so the raw boundary count
//! undercounts. The classifier needs a reference area for a single worm to
//! split fused boundaries; this module derives that reference from the
//! population of small boundaries in the same image.

/// Boundaries at or above this area are assumed to be fused clusters and are
/// excluded from the reference sample.
pub const SINGLE_WORM_AREA_CUTOFF: f64 = 300.0;

/// Half-width of the trim window around the sample median, as a fraction of
/// the median.
const TRIM_FRACTION: f64 = 0.25;

/// Estimates the area of one isolated worm from a population of boundary
/// areas.
///
/// The estimate is built in three steps:
///
/// 1. Keep only areas below [`SINGLE_WORM_AREA_CUTOFF`], the plausible
///    single-worm population.
/// 2. Trim that sample to the open interval `(0.75·m, 1.25·m)` around its
///    median `m`, discarding small noise fragments and oversized outliers.
/// 3. Return the arithmetic mean of the trimmed sample. The median only
///    selects the trim window; the mean of the cleaned sample is the operative
///    estimate, comparable to the per-boundary area ratios computed later.
///
/// Returns `None` when no usable population exists: either no area passes the
/// cutoff, or the trim window empties the sample (which happens when the few
/// qualifying areas straddle their own median too widely, and for an all-zero
/// sample). `None` is a real outcome the caller must branch on, not an error.
pub fn reference_area(areas: &[f64]) -> Option<f64> {
    let mut sample: Vec<f64> = areas
        .iter()
        .copied()
        .filter(|&area| area < SINGLE_WORM_AREA_CUTOFF)
        .collect();
    if sample.is_empty() {
        return None;
    }

    sample.sort_unstable_by(f64::total_cmp);
    let m = median_of_sorted(&sample);

    let low = m - TRIM_FRACTION * m;
    let high = m + TRIM_FRACTION * m;
    let trimmed: Vec<f64> = sample
        .into_iter()
        .filter(|&area| area > low && area < high)
        .collect();
    if trimmed.is_empty() {
        return None;
    }

    Some(trimmed.iter().sum::<f64>() / trimmed.len() as f64)
}

/// Median of an already sorted, non-empty sample. For an even-length sample
/// this is the mean of the two middle values.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_float_eq(a: f64, b: f64) {
        assert!(
            (a - b).abs() < 1e-9,
            "Assertion failed: expected {}, got {}",
            b,
            a
        );
    }

    #[test]
    fn mean_of_sample_when_nothing_is_trimmed() {
        // Every value lies inside (0.75*m, 1.25*m) around the median 100, so
        // the estimate is the plain arithmetic mean.
        let areas = [90.0, 95.0, 100.0, 105.0, 110.0];
        assert_float_eq(reference_area(&areas).unwrap(), 100.0);
    }

    #[test]
    fn trimming_discards_outliers_around_the_median() {
        // Median of the qualifying sample is 100; 10.0 and 130.0 fall outside
        // (75, 125) and must not drag the mean.
        let areas = [10.0, 99.0, 100.0, 101.0, 130.0];
        assert_float_eq(reference_area(&areas).unwrap(), 100.0);
    }

    #[test]
    fn cutoff_excludes_large_fused_areas_before_the_median() {
        // 450 and 900 are above the cutoff and must not shift the median of
        // the single-worm sample.
        let areas = [96.0, 100.0, 104.0, 450.0, 900.0];
        assert_float_eq(reference_area(&areas).unwrap(), 100.0);
    }

    #[test]
    fn trim_window_is_open_at_both_ends() {
        // 75 and 125 sit exactly on the window edges of median 100 and are
        // excluded by the strict comparisons.
        let areas = [75.0, 100.0, 125.0];
        assert_float_eq(reference_area(&areas).unwrap(), 100.0);
    }

    #[test]
    fn no_qualifying_sample_yields_none() {
        assert_eq!(reference_area(&[]), None);
        assert_eq!(reference_area(&[300.0, 512.0, 1000.0]), None);
    }

    #[test]
    fn sample_emptied_by_trimming_yields_none() {
        // Median of [1, 100] is 50.5; neither value is inside (37.875,
        // 63.125).
        assert_eq!(reference_area(&[1.0, 100.0]), None);
        // All-zero areas produce an empty open window (0, 0).
        assert_eq!(reference_area(&[0.0, 0.0, 0.0]), None);
    }

    #[test]
    fn even_length_sample_uses_midpoint_median() {
        // Sorted sample [80, 90, 110, 120]: median 100, window (75, 125)
        // keeps everything, mean is 100.
        let areas = [110.0, 80.0, 120.0, 90.0];
        assert_float_eq(reference_area(&areas).unwrap(), 100.0);
    }
}
