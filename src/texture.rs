//! Loads, recolors and saves the per-theme base color textures.

use crate::error::AppError;
use crate::palettes::{rgb_to_hex, NamedPalette};
use crate::recolor::{apply_palette, check_face_count};
use crate::regions::{segment, BackgroundColor, SegmentationConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecolorMode {
    /// Recolor and overwrite the texture.
    Write,
    /// Segment and check the face count only.
    DryRun,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureReport {
    pub name: String,
    pub path: PathBuf,
    pub faces: usize,
    /// Mean color of the sampled corner, as used for the foreground cut.
    pub background: [f32; 3],
}

#[derive(Debug)]
pub struct TextureOutcome {
    pub name: String,
    pub result: Result<TextureReport, AppError>,
}

pub fn texture_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("Rubik_baseColor_{name}.png"))
}

/// Runs the full pipeline for one theme's texture.
///
/// Nothing is written unless the face count matches the palette.
pub fn recolor_texture(
    dir: &Path,
    palette: &NamedPalette,
    config: &SegmentationConfig,
    mode: RecolorMode,
) -> Result<TextureReport, AppError> {
    let path = texture_path(dir, &palette.name);
    if !path.exists() {
        return Err(AppError::MissingTexture(path));
    }

    let colors = palette.resolve()?;
    let mut buffer = image::open(&path)?.to_rgb8();
    let background = BackgroundColor::sample(&buffer, config.sample_window);
    let (components, labels) = segment(&buffer, config);

    for (component, color) in components.iter().zip(&colors) {
        log::debug!(
            "{}: face {} ({} px, centroid {:.1},{:.1}) -> {}",
            palette.name,
            component.id,
            component.area,
            component.centroid_x,
            component.centroid_y,
            rgb_to_hex(*color)
        );
    }

    match mode {
        RecolorMode::Write => {
            apply_palette(&mut buffer, &labels, &components, &colors)?;
            buffer.save(&path)?;
            log::info!("Updated {} -> {}", palette.name, path.display());
        }
        RecolorMode::DryRun => {
            check_face_count(&components, &colors)?;
            log::info!(
                "{}: {} faces match palette (dry run)",
                palette.name,
                components.len()
            );
        }
    }

    Ok(TextureReport {
        name: palette.name.clone(),
        path,
        faces: components.len(),
        background: background.0,
    })
}

/// Recolors every texture independently; outcomes keep the input order.
pub fn recolor_all(
    dir: &Path,
    palettes: &[&NamedPalette],
    config: &SegmentationConfig,
    mode: RecolorMode,
) -> Vec<TextureOutcome> {
    palettes
        .par_iter()
        .map(|palette| {
            let result = recolor_texture(dir, palette, config, mode);
            if let Err(err) = &result {
                log::warn!("{}: {}", palette.name, err);
            }
            TextureOutcome {
                name: palette.name.clone(),
                result,
            }
        })
        .collect()
}
