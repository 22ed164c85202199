use crate::error::AppError;
use crate::regions::SegmentationConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEXTURE_DIR: &str = "public/textures";

/// Optional JSON settings file. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacepaintConfig {
    pub texture_dir: PathBuf,
    pub segmentation: SegmentationConfig,
    /// Extra palettes by name; these win over built-ins with the same name.
    pub palettes: BTreeMap<String, Vec<String>>,
}

impl Default for FacepaintConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from(DEFAULT_TEXTURE_DIR),
            segmentation: SegmentationConfig::default(),
            palettes: BTreeMap::new(),
        }
    }
}

impl FacepaintConfig {
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
