//! Synthetic textures shared by the unit tests.

use crate::regions::SegmentationConfig;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const BACKGROUND: Rgb<u8> = Rgb([240, 240, 240]);

pub const SQUARE_SIZE: u32 = 60;

/// Top-left corners of the six faces, already in reading order.
pub const SQUARE_ORIGINS: [(u32, u32); 6] = [
    (50, 50),
    (130, 50),
    (210, 50),
    (50, 130),
    (130, 130),
    (210, 130),
];

pub const SQUARE_COLORS: [Rgb<u8>; 6] = [
    Rgb([200, 30, 30]),
    Rgb([30, 160, 60]),
    Rgb([30, 60, 200]),
    Rgb([230, 200, 20]),
    Rgb([250, 120, 10]),
    Rgb([40, 40, 40]),
];

pub fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BACKGROUND)
}

pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    draw_filled_rect_mut(
        img,
        Rect::at(x as i32, y as i32).of_size(width, height),
        color,
    );
}

/// 300x200 texture with two rows of three 60x60 faces.
pub fn six_squares() -> (RgbImage, [Rgb<u8>; 6]) {
    let mut img = blank(300, 200);
    for ((x, y), color) in SQUARE_ORIGINS.into_iter().zip(SQUARE_COLORS) {
        fill_rect(&mut img, x, y, SQUARE_SIZE, SQUARE_SIZE, color);
    }
    (img, SQUARE_COLORS)
}

/// Defaults with a minimum size that fits the 3600 px test faces.
pub fn test_config() -> SegmentationConfig {
    SegmentationConfig {
        min_component_size: 1_000,
        ..SegmentationConfig::default()
    }
}
