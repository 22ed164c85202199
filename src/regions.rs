use image::RgbImage;
use serde::Deserialize;
use std::collections::VecDeque;

pub const UNLABELED: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentationConfig {
    pub sample_window: u32,
    pub distance_threshold: f32,
    pub min_component_size: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            sample_window: 40,
            distance_threshold: 12.0,
            min_component_size: 20_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundColor(pub [f32; 3]);

impl BackgroundColor {
    /// Mean of the top-left `window` x `window` pixels, clamped to the image.
    pub fn sample(buffer: &RgbImage, window: u32) -> Self {
        let sample_w = buffer.width().min(window);
        let sample_h = buffer.height().min(window);
        let count = sample_w as u64 * sample_h as u64;
        if count == 0 {
            return Self([0.0; 3]);
        }

        let mut sum = [0u64; 3];
        for y in 0..sample_h {
            for x in 0..sample_w {
                let pixel = buffer.get_pixel(x, y);
                for (acc, channel) in sum.iter_mut().zip(pixel.0) {
                    *acc += channel as u64;
                }
            }
        }

        let count = count as f64;
        Self([
            (sum[0] as f64 / count) as f32,
            (sum[1] as f64 / count) as f32,
            (sum[2] as f64 / count) as f32,
        ])
    }

    pub fn distance(&self, rgb: [u8; 3]) -> f32 {
        let dr = rgb[0] as f32 - self.0[0];
        let dg = rgb[1] as f32 - self.0[1];
        let db = rgb[2] as f32 - self.0[2];
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl ForegroundMask {
    pub fn build(buffer: &RgbImage, background: &BackgroundColor, threshold: f32) -> Self {
        let cells = buffer
            .pixels()
            .map(|pixel| background.distance(pixel.0) > threshold)
            .collect();

        Self {
            width: buffer.width(),
            height: buffer.height(),
            cells,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    width: u32,
    height: u32,
    labels: Vec<i32>,
}

impl LabelGrid {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: vec![UNLABELED; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major, matching `RgbImage::pixels`.
    pub fn as_slice(&self) -> &[i32] {
        &self.labels
    }

    #[cfg(test)]
    pub(crate) fn get(&self, x: u32, y: u32) -> i32 {
        self.labels[y as usize * self.width as usize + x as usize]
    }

    #[cfg(test)]
    pub(crate) fn pixel_count(&self, id: i32) -> usize {
        self.labels.iter().filter(|label| **label == id).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: i32,
    pub area: usize,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    // Bounding-box midpoint, not the pixel mean.
    pub centroid_x: f32,
    pub centroid_y: f32,
}

/// Labels foreground regions and orders them top-to-bottom, then
/// left-to-right. Equal centroids keep discovery order.
pub fn segment(buffer: &RgbImage, config: &SegmentationConfig) -> (Vec<Component>, LabelGrid) {
    let background = BackgroundColor::sample(buffer, config.sample_window);
    let mask = ForegroundMask::build(buffer, &background, config.distance_threshold);

    log::debug!(
        "Segmenting {}x{}: background {:?}, {} foreground pixels",
        buffer.width(),
        buffer.height(),
        background.0,
        mask.foreground_count()
    );

    label_components(&mask, config.min_component_size)
}

pub fn label_components(mask: &ForegroundMask, min_size: usize) -> (Vec<Component>, LabelGrid) {
    let width = mask.width as usize;
    let height = mask.height as usize;
    let mut grid = LabelGrid::new(mask.width, mask.height);
    let mut components = Vec::<Component>::new();
    let mut queue = VecDeque::<usize>::new();
    let mut next_id: i32 = 0;
    let mut discarded = 0usize;

    for start in 0..width * height {
        if !mask.cells[start] || grid.labels[start] != UNLABELED {
            continue;
        }

        let id = next_id;
        next_id += 1;
        grid.labels[start] = id;
        queue.push_back(start);

        let mut area = 0usize;
        let mut min_x = width;
        let mut max_x = 0usize;
        let mut min_y = height;
        let mut max_y = 0usize;

        while let Some(idx) = queue.pop_front() {
            area += 1;

            let x = idx % width;
            let y = idx / width;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    let n = ny * width + nx;
                    if mask.cells[n] && grid.labels[n] == UNLABELED {
                        grid.labels[n] = id;
                        queue.push_back(n);
                    }
                }
            }
        }

        if area < min_size {
            discarded += 1;
            continue;
        }

        components.push(Component {
            id,
            area,
            min_x: min_x as u32,
            max_x: max_x as u32,
            min_y: min_y as u32,
            max_y: max_y as u32,
            centroid_x: (min_x + max_x) as f32 / 2.0,
            centroid_y: (min_y + max_y) as f32 / 2.0,
        });
    }

    components.sort_by(|a, b| {
        a.centroid_y
            .total_cmp(&b.centroid_y)
            .then(a.centroid_x.total_cmp(&b.centroid_x))
            .then(a.id.cmp(&b.id))
    });

    log::debug!(
        "Labeled {} components, kept {}, dropped {} below {} px",
        next_id,
        components.len(),
        discarded,
        min_size
    );

    (components, grid)
}
