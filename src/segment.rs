//! Turns a color image into a binary edge map ready for contour tracing.
//!
//! The stage order is part of the contract: mask by color, black out
//! everything else, convert to grayscale, blur, detect edges, then close small
//! gaps with one dilation and one erosion so each worm outline becomes a
//! connected loop. Changing the order or the constants changes detection
//! recall and precision materially.

use image::{GrayImage, Luma, Rgb, RgbImage, imageops};
use imageproc::{
    distance_transform::Norm,
    edges::canny,
    filter::gaussian_blur_f32,
    morphology::{dilate, erode},
};

use crate::color::ColorProfile;

/// Blur strength applied before edge detection. This is the sigma a 5x5
/// Gaussian kernel implies, which suppresses single-pixel sensor noise
/// without washing out worm outlines.
pub const BLUR_SIGMA: f32 = 1.1;

/// Lower hysteresis threshold for edge detection.
pub const CANNY_LOW: f32 = 50.0;

/// Upper hysteresis threshold for edge detection.
pub const CANNY_HIGH: f32 = 100.0;

/// Builds the binary color mask for an image: 255 where the pixel falls
/// inside the profile's inclusive channel range, 0 elsewhere.
pub fn threshold_mask(image: &RgbImage, profile: &ColorProfile) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if profile.contains(*image.get_pixel(x, y)) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Applies a binary mask to an image: pixels outside the mask become black.
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel(x, y)[0] > 0 {
            *image.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// Runs the full segmentation pipeline and returns the closed edge map.
///
/// The input image is never mutated; all intermediate buffers are private to
/// this function and discarded on return.
pub fn segment(image: &RgbImage, profile: &ColorProfile) -> GrayImage {
    let mask = threshold_mask(image, profile);
    let masked = apply_mask(image, &mask);

    let gray = imageops::grayscale(&masked);
    let blurred = gaussian_blur_f32(&gray, BLUR_SIGMA);
    let edges = canny(&blurred, CANNY_LOW, CANNY_HIGH);

    // Morphological closing: bridge small breaks so each outline is a loop.
    let dilated = dilate(&edges, Norm::LInf, 1);
    erode(&dilated, Norm::LInf, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_range_profile() -> ColorProfile {
        ColorProfile::Custom {
            lower: Rgb([0, 0, 0]),
            upper: Rgb([255, 255, 255]),
        }
    }

    fn green_square_image() -> RgbImage {
        RgbImage::from_fn(60, 40, |x, y| {
            if (20..34).contains(&x) && (12..26).contains(&y) {
                Rgb([100, 200, 100])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn full_range_mask_selects_every_pixel() {
        let image = green_square_image();
        let mask = threshold_mask(&image, &full_range_profile());
        assert!(mask.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn mask_follows_the_profile_range() {
        let image = green_square_image();
        let mask = threshold_mask(&image, &ColorProfile::Gfp);
        // Square pixels are in GFP range, background green channel is below
        // the lower bound.
        assert_eq!(mask.get_pixel(25, 15)[0], 255);
        assert_eq!(mask.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn apply_mask_blacks_out_unmasked_pixels() {
        let image = RgbImage::from_pixel(4, 4, Rgb([10, 90, 10]));
        let mask = GrayImage::from_fn(4, 4, |x, _| if x < 2 { Luma([255]) } else { Luma([0]) });
        let masked = apply_mask(&image, &mask);
        assert_eq!(*masked.get_pixel(0, 0), Rgb([10, 90, 10]));
        assert_eq!(*masked.get_pixel(3, 0), Rgb([0, 0, 0]));
    }

    #[test]
    fn segment_preserves_dimensions_and_finds_edges() {
        let image = green_square_image();
        let edge_map = segment(&image, &ColorProfile::Gfp);
        assert_eq!(edge_map.dimensions(), image.dimensions());
        // The square's outline must survive as edge pixels.
        assert!(edge_map.pixels().any(|p| p[0] > 0));
    }

    #[test]
    fn segment_of_out_of_range_image_is_blank() {
        // Pure blue is outside the GFP green band.
        let image = RgbImage::from_pixel(32, 32, Rgb([0, 0, 200]));
        let edge_map = segment(&image, &ColorProfile::Gfp);
        assert!(edge_map.pixels().all(|p| p[0] == 0));
    }
}
