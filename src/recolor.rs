use crate::error::RecolorError;
use crate::regions::{Component, LabelGrid};
use image::{Rgb, RgbImage};

/// Paints the i-th component with the i-th palette color, in place.
/// Nothing is written when the counts differ.
pub fn apply_palette(
    buffer: &mut RgbImage,
    labels: &LabelGrid,
    components: &[Component],
    palette: &[Rgb<u8>],
) -> Result<(), RecolorError> {
    check_face_count(components, palette)?;

    if (buffer.width(), buffer.height()) != (labels.width(), labels.height()) {
        log::warn!(
            "Label grid {}x{} does not match image {}x{}, leaving image unchanged",
            labels.width(),
            labels.height(),
            buffer.width(),
            buffer.height()
        );
        return Ok(());
    }

    let targets: Vec<(usize, Rgb<u8>)> = components
        .iter()
        .zip(palette)
        .filter_map(|(component, color)| {
            usize::try_from(component.id).ok().map(|id| (id, *color))
        })
        .collect();
    let table_len = targets.iter().map(|(id, _)| id + 1).max().unwrap_or(0);
    let mut color_by_label = vec![None; table_len];
    for (id, color) in targets {
        color_by_label[id] = Some(color);
    }

    for (pixel, label) in buffer.pixels_mut().zip(labels.as_slice()) {
        let Ok(label) = usize::try_from(*label) else {
            continue;
        };
        if let Some(Some(color)) = color_by_label.get(label) {
            *pixel = *color;
        }
    }

    Ok(())
}

pub fn check_face_count(components: &[Component], palette: &[Rgb<u8>]) -> Result<(), RecolorError> {
    if components.len() != palette.len() {
        return Err(RecolorError::FaceCountMismatch {
            expected: palette.len(),
            found: components.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{segment, SegmentationConfig};
    use crate::test_support::{
        blank, fill_rect, six_squares, test_config, BACKGROUND, SQUARE_ORIGINS, SQUARE_SIZE,
    };

    fn target_palette() -> Vec<Rgb<u8>> {
        vec![
            Rgb([0x93, 0x70, 0xDA]),
            Rgb([0x00, 0xFF, 0x7F]),
            Rgb([0x41, 0x69, 0xE1]),
            Rgb([0xFF, 0x69, 0xB4]),
            Rgb([0x00, 0xCE, 0xD1]),
            Rgb([0xBA, 0x55, 0xD3]),
        ]
    }

    fn in_any_square(x: u32, y: u32) -> bool {
        SQUARE_ORIGINS
            .iter()
            .any(|&(sx, sy)| x >= sx && x < sx + SQUARE_SIZE && y >= sy && y < sy + SQUARE_SIZE)
    }

    #[test]
    fn mismatch_on_blank_image_leaves_buffer_untouched() {
        let mut img = blank(100, 100);
        let original = img.clone();

        let (components, labels) = segment(&img, &SegmentationConfig::default());
        assert!(components.is_empty());

        let err = apply_palette(&mut img, &labels, &components, &target_palette())
            .expect_err("zero faces cannot take six colors");
        assert_eq!(
            err,
            RecolorError::FaceCountMismatch {
                expected: 6,
                found: 0
            }
        );
        assert_eq!(img, original);
    }

    #[test]
    fn mismatch_with_short_palette_leaves_buffer_untouched() {
        let (mut img, _) = six_squares();
        let original = img.clone();
        let (components, labels) = segment(&img, &test_config());

        let err = apply_palette(&mut img, &labels, &components, &target_palette()[..5])
            .expect_err("six faces cannot take five colors");
        assert_eq!(
            err,
            RecolorError::FaceCountMismatch {
                expected: 5,
                found: 6
            }
        );
        assert_eq!(img, original);
    }

    #[test]
    fn six_squares_take_palette_in_reading_order() {
        let (mut img, _) = six_squares();
        let palette = target_palette();
        let (components, labels) = segment(&img, &test_config());

        apply_palette(&mut img, &labels, &components, &palette).expect("counts match");

        for ((x, y), color) in SQUARE_ORIGINS.into_iter().zip(&palette) {
            for dy in 0..SQUARE_SIZE {
                for dx in 0..SQUARE_SIZE {
                    assert_eq!(img.get_pixel(x + dx, y + dy), color);
                }
            }
        }
        for (x, y, pixel) in img.enumerate_pixels() {
            if !in_any_square(x, y) {
                assert_eq!(*pixel, BACKGROUND, "background changed at ({x}, {y})");
            }
        }
    }

    #[test]
    fn noise_fleck_keeps_its_color() {
        let (mut img, _) = six_squares();
        let fleck = Rgb([0, 0, 0]);
        fill_rect(&mut img, 280, 10, 5, 5, fleck);

        let (components, labels) = segment(&img, &test_config());
        apply_palette(&mut img, &labels, &components, &target_palette()).expect("counts match");

        for y in 10..15 {
            for x in 280..285 {
                assert_eq!(*img.get_pixel(x, y), fleck);
            }
        }
    }

    #[test]
    fn negative_component_id_is_skipped() {
        let (mut img, _) = six_squares();
        let original = img.clone();
        let (_, labels) = segment(&img, &test_config());
        let stray = Component {
            id: -1,
            area: 1,
            min_x: 0,
            max_x: 0,
            min_y: 0,
            max_y: 0,
            centroid_x: 0.0,
            centroid_y: 0.0,
        };

        apply_palette(&mut img, &labels, &[stray], &[Rgb([1, 2, 3])]).expect("counts match");
        assert_eq!(img, original);
    }

    #[test]
    fn label_grid_of_other_size_leaves_buffer_untouched() {
        let (small, _) = six_squares();
        let (components, labels) = segment(&small, &test_config());

        let mut img = blank(400, 300);
        fill_rect(&mut img, 50, 50, SQUARE_SIZE, SQUARE_SIZE, Rgb([200, 30, 30]));
        let original = img.clone();

        apply_palette(&mut img, &labels, &components, &target_palette()).expect("counts match");
        assert_eq!(img, original);
    }

    #[test]
    fn color_preserving_rewrite_keeps_labels() {
        let (mut img, colors) = six_squares();
        fill_rect(&mut img, 280, 10, 5, 5, Rgb([0, 0, 0]));
        let (components, labels) = segment(&img, &test_config());

        let before = img.clone();
        apply_palette(&mut img, &labels, &components, &colors).expect("counts match");
        assert_eq!(img, before);

        let (again, relabeled) = segment(&img, &test_config());
        assert_eq!(again, components);
        assert_eq!(relabeled, labels);
    }
}
