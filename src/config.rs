use crate::error::{GeneratorError, Result};
use crate::palette::{self, Palette};
use image::Rgb;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FONT: &str = "DejaVuSans.ttf";
pub const DEFAULT_PREFIX: &str = "pub_bazaria_";
/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIDE: u32 = 8192;
/// Largest accepted text size, in pixels.
pub const MAX_FONT_PX: f32 = 1024.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub palette: Palette,
    pub headline: String,
    pub tagline: String,
    pub headline_px: f32,
    pub tagline_px: f32,
    /// Vertical space between the two lines, in pixels.
    pub line_gap: u32,
    pub font: PathBuf,
    pub prefix: String,
    pub extension: String,
    pub output_dir: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background: Rgb([245, 245, 245]),
            palette: Palette::default(),
            headline: "Bazaria".to_string(),
            tagline: "Publicité".to_string(),
            headline_px: 38.0,
            tagline_px: 20.0,
            line_gap: 8,
            font: PathBuf::from(DEFAULT_FONT),
            prefix: DEFAULT_PREFIX.to_string(),
            extension: "png".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Settings read from a JSON config file. Absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(deserialize_with = "palette::hex_color::option::deserialize")]
    pub background: Option<Rgb<u8>>,
    pub palette: Option<Palette>,
    pub headline: Option<String>,
    pub tagline: Option<String>,
    pub headline_px: Option<f32>,
    pub tagline_px: Option<f32>,
    pub line_gap: Option<u32>,
    pub font: Option<PathBuf>,
    pub prefix: Option<String>,
    pub extension: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Values given on the command line, applied last.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub output_dir: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub prefix: Option<String>,
}

impl GeneratorConfig {
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(v) = file.width {
            self.width = v;
        }
        if let Some(v) = file.height {
            self.height = v;
        }
        if let Some(v) = file.background {
            self.background = v;
        }
        if let Some(v) = file.palette {
            self.palette = v;
        }
        if let Some(v) = file.headline {
            self.headline = v;
        }
        if let Some(v) = file.tagline {
            self.tagline = v;
        }
        if let Some(v) = file.headline_px {
            self.headline_px = v;
        }
        if let Some(v) = file.tagline_px {
            self.tagline_px = v;
        }
        if let Some(v) = file.line_gap {
            self.line_gap = v;
        }
        if let Some(v) = file.font {
            self.font = v;
        }
        if let Some(v) = file.prefix {
            self.prefix = v;
        }
        if let Some(v) = file.extension {
            self.extension = v;
        }
        if let Some(v) = file.output_dir {
            self.output_dir = v;
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(v) = overrides.output_dir {
            self.output_dir = v;
        }
        if let Some(v) = overrides.font {
            self.font = v;
        }
        if let Some(v) = overrides.prefix {
            self.prefix = v;
        }
    }

    /// Defaults, then the optional config file, then command-line overrides.
    pub fn resolve(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = config_path {
            config.apply_file(ConfigFile::load(path)?);
        }
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let sides = 1..=MAX_CANVAS_SIDE;
        if !sides.contains(&self.width) || !sides.contains(&self.height) {
            return Err(GeneratorError::config(format!(
                "canvas must be between 1x1 and {max}x{max}, got {}x{}",
                self.width,
                self.height,
                max = MAX_CANVAS_SIDE
            )));
        }
        if self.palette.is_empty() {
            return Err(GeneratorError::config("palette must contain at least one color"));
        }
        for px in [self.headline_px, self.tagline_px] {
            if !(px.is_finite() && px > 0.0 && px <= MAX_FONT_PX) {
                return Err(GeneratorError::config(format!(
                    "font sizes must be in (0, {}], got {}",
                    MAX_FONT_PX, px
                )));
            }
        }
        if self.extension.is_empty() {
            return Err(GeneratorError::config("file extension must not be empty"));
        }
        Ok(())
    }
}
