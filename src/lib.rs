//! Count C. elegans worms on a fluorescence microscopy image.
//!
//! Worms are isolated by a color signature (GFP, mCherry, or custom bounds),
//! their outlines are traced from an edge map, and touching worms — which fuse
//! into one outline — are split statistically: the area of a single isolated
//! worm is estimated from the population of small outlines, and each oversized
//! outline counts as `round(area / reference)` worms.
//!
//! ```no_run
//! use worm_counter::{ColorProfile, count_worms};
//!
//! let image = image::open("plate.png")?.to_rgb8();
//! let profile = ColorProfile::resolve(Some("GFP"), None)?;
//! let result = count_worms(&image, &profile);
//! println!("#worms : {}", result.total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod annotate;
pub mod classify;
pub mod color;
pub mod contours;
pub mod error;
pub mod estimate;
pub mod segment;

use image::RgbImage;

pub use annotate::annotate;
pub use classify::{Classification, classify, total_count};
pub use color::ColorProfile;
pub use contours::{Boundary, extract_boundaries};
pub use error::{Error, Result};
pub use estimate::reference_area;
pub use segment::segment;

/// The outcome of a pipeline run over one image.
#[derive(Debug, Clone, PartialEq)]
pub struct WormCount {
    /// Total number of worms, the sum of all per-boundary counts.
    pub total: u64,
    /// Per-boundary classifications, in boundary extraction order.
    pub classifications: Vec<Classification>,
}

/// Runs the whole counting pipeline on one image.
///
/// The input image is never mutated. Annotation is a separate step
/// ([`annotate`]) so callers that only need the count never render anything.
pub fn count_worms(image: &RgbImage, profile: &ColorProfile) -> WormCount {
    let edge_map = segment::segment(image, profile);
    let boundaries = contours::extract_boundaries(&edge_map);

    let areas: Vec<f64> = boundaries.iter().map(|b| b.area).collect();
    let reference = estimate::reference_area(&areas);

    let classifications = classify::classify(&boundaries, reference);
    let total = classify::total_count(&classifications);

    WormCount {
        total,
        classifications,
    }
}
