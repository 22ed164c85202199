//! Target face colors per texture theme.

use crate::error::AppError;
use image::Rgb;
use palette::Srgb;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Built-in themes, each listing its six faces in reading order
/// (top row left-to-right, then bottom row).
const BUILTIN_PALETTES: &[(&str, [&str; 6])] = &[
    ("aurora", ["#9370DA", "#00FF7F", "#4169E1", "#FF69B4", "#00CED1", "#BA55D3"]),
    ("candy", ["#87CDEA", "#FF69B4", "#98FB98", "#DDA0DD", "#FFD580", "#FFD1DC"]),
    ("classic", ["#00B040", "#FFD700", "#B90000", "#D0D0D0", "#FF6600", "#0046AD"]),
    ("fire", ["#FED600", "#FF4500", "#FF0000", "#FFFF00", "#FF6600", "#8B0000"]),
    ("forest", ["#00FE00", "#32CD32", "#006400", "#ADFF2F", "#228B22", "#8B4513"]),
    ("galaxy", ["#0000FE", "#9400D3", "#FF00FF", "#00FFFF", "#4B0082", "#00BFFF"]),
    ("ice", ["#00BEFE", "#24A9FF", "#B0E0E6", "#E0FFFF", "#66D9FF", "#F8F8FF"]),
    ("miami", ["#00FE9E", "#FFEB3B", "#FF1493", "#9B59B6", "#FF6B6B", "#40E0D0"]),
    ("neonTokyo", ["#00D3FE", "#39FF14", "#FFFFFF", "#FF8C00", "#FF1493", "#9400D3"]),
    ("ocean", ["#00FE7E", "#00CED1", "#4169E1", "#87CEEB", "#20B2AA", "#005F73"]),
    ("sunset", ["#FE8C00", "#FFD700", "#C71585", "#FF1493", "#FF6347", "#FF4500"]),
];

/// A theme name and its hex colors, unparsed until [`NamedPalette::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPalette {
    pub name: String,
    pub colors: Vec<String>,
}

impl NamedPalette {
    pub fn new(name: impl Into<String>, colors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Parses every color, failing on the first bad entry.
    pub fn resolve(&self) -> Result<Vec<Rgb<u8>>, AppError> {
        self.colors.iter().map(|hex| parse_hex(hex)).collect()
    }
}

pub fn builtin_palettes() -> Vec<NamedPalette> {
    BUILTIN_PALETTES
        .iter()
        .map(|(name, colors)| {
            NamedPalette::new(*name, colors.iter().map(|hex| hex.to_string()).collect())
        })
        .collect()
}

/// Built-ins plus `extra`; an extra palette replaces a built-in of the same name.
///
/// The result is sorted by name.
pub fn with_overrides(extra: &BTreeMap<String, Vec<String>>) -> Vec<NamedPalette> {
    let mut merged: BTreeMap<String, Vec<String>> = builtin_palettes()
        .into_iter()
        .map(|palette| (palette.name, palette.colors))
        .collect();
    for (name, colors) in extra {
        merged.insert(name.clone(), colors.clone());
    }

    merged
        .into_iter()
        .map(|(name, colors)| NamedPalette::new(name, colors))
        .collect()
}

/// Keeps only the palettes named in `names`, in the order they are given.
/// An empty selection keeps everything.
pub fn select<'a>(
    palettes: &'a [NamedPalette],
    names: &[String],
) -> Result<Vec<&'a NamedPalette>, AppError> {
    if names.is_empty() {
        return Ok(palettes.iter().collect());
    }

    names
        .iter()
        .map(|name| {
            palettes
                .iter()
                .find(|palette| &palette.name == name)
                .ok_or_else(|| AppError::UnknownPalette(name.clone()))
        })
        .collect()
}

/// Parses `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand.
pub fn parse_hex(value: &str) -> Result<Rgb<u8>, AppError> {
    let srgb = Srgb::<u8>::from_str(value.trim()).map_err(|err| AppError::InvalidColor {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    Ok(Rgb([srgb.red, srgb.green, srgb.blue]))
}

pub fn rgb_to_hex(rgb: Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
