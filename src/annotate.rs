//! Draws classification results onto a copy of the original image.
//!
//! Pure presentation: nothing here feeds back into the count.

use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_line_segment_mut, draw_text_mut},
    point::Point,
};

use crate::classify::Classification;

// Hull outline colors: fused clusters in blue, single worms in red.
const SPLIT_HULL_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const SINGLE_HULL_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

const RATIO_LABEL_SCALE: f32 = 13.0;
const TOTAL_LABEL_SCALE: f32 = 18.0;
const TOTAL_LABEL_POSITION: (i32, i32) = (5, 315);

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Renders an annotated copy of `image`.
///
/// Each classification's convex hull is drawn as an outline, blue for split
/// (fused) regions and red for single worms. Split regions additionally get
/// their assigned count drawn next to the hull's first vertex, and the total
/// count is drawn at a fixed position. The input image is not modified.
pub fn annotate(image: &RgbImage, classifications: &[Classification], total: u64) -> RgbImage {
    let font =
        FontRef::try_from_slice(FONT_BYTES).expect("embedded DejaVu Sans font must be valid");
    let mut canvas = image.clone();

    for classification in classifications {
        let color = if classification.is_split {
            SPLIT_HULL_COLOR
        } else {
            SINGLE_HULL_COLOR
        };
        draw_closed_polyline(&mut canvas, &classification.hull, color);

        if classification.is_split
            && let Some(anchor) = classification.hull.first()
        {
            draw_text_mut(
                &mut canvas,
                LABEL_COLOR,
                anchor.x,
                anchor.y,
                PxScale::from(RATIO_LABEL_SCALE),
                &font,
                &classification.assigned_count.to_string(),
            );
        }
    }

    draw_text_mut(
        &mut canvas,
        LABEL_COLOR,
        TOTAL_LABEL_POSITION.0,
        TOTAL_LABEL_POSITION.1,
        PxScale::from(TOTAL_LABEL_SCALE),
        &font,
        &format!("#Worms : {total}"),
    );

    canvas
}

/// Draws a polygon outline by connecting consecutive vertices, closing the
/// loop between the last and first vertex. Degenerate polygons with fewer
/// than 2 vertices draw nothing.
fn draw_closed_polyline(canvas: &mut RgbImage, vertices: &[Point<i32>], color: Rgb<u8>) {
    if vertices.len() < 2 {
        return;
    }
    for (from, to) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        draw_line_segment_mut(
            canvas,
            (from.x as f32, from.y as f32),
            (to.x as f32, to.y as f32),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_classification(is_split: bool) -> Classification {
        Classification {
            assigned_count: if is_split { 2 } else { 1 },
            hull: vec![
                Point::new(10, 10),
                Point::new(30, 10),
                Point::new(30, 30),
                Point::new(10, 30),
            ],
            is_split,
        }
    }

    #[test]
    fn annotate_leaves_the_input_untouched() {
        let image = RgbImage::from_pixel(64, 64, Rgb([7, 7, 7]));
        let before = image.clone();
        let _ = annotate(&image, &[square_classification(false)], 1);
        assert_eq!(image, before);
    }

    #[test]
    fn annotate_preserves_dimensions() {
        let image = RgbImage::new(48, 32);
        let annotated = annotate(&image, &[], 0);
        assert_eq!(annotated.dimensions(), image.dimensions());
    }

    #[test]
    fn hull_outline_color_distinguishes_split_from_single() {
        let image = RgbImage::new(64, 64);

        let single = annotate(&image, &[square_classification(false)], 1);
        assert_eq!(*single.get_pixel(20, 10), SINGLE_HULL_COLOR);

        let split = annotate(&image, &[square_classification(true)], 2);
        assert_eq!(*split.get_pixel(20, 10), SPLIT_HULL_COLOR);
    }

    #[test]
    fn degenerate_hull_draws_nothing() {
        let image = RgbImage::new(16, 16);
        let classification = Classification {
            assigned_count: 1,
            hull: vec![Point::new(8, 8)],
            is_split: false,
        };
        // Total label at (5, 315) falls outside a 16x16 canvas, so the image
        // stays untouched.
        let annotated = annotate(&image, &[classification], 1);
        assert_eq!(annotated, image);
    }
}
