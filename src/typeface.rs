use crate::builtin_font;
use crate::error::{GeneratorError, Result};
use crate::layout::TextBox;
use ab_glyph::{point, Font, FontVec, GlyphId, OutlinedGlyph, PxScale, ScaleFont};
use image::{Pixel, Rgb, RgbImage};
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub enum Typeface {
    Outline { font: FontVec, path: PathBuf },
    Builtin,
}

impl Typeface {
    /// Reads an outline font from `path`. A missing file selects the built-in
    /// bitmap font, reported through `FontSet::warning`; every other failure is
    /// returned.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read(path) {
            Ok(bytes) => {
                let font = FontVec::try_from_vec(bytes).map_err(|_| GeneratorError::InvalidFont {
                    path: path.to_path_buf(),
                })?;
                Ok(Typeface::Outline {
                    font,
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Typeface::Builtin),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Typeface::Builtin)
    }

    pub fn describe(&self) -> String {
        match self {
            Typeface::Outline { path, .. } => path.display().to_string(),
            Typeface::Builtin => "built-in 5x7 bitmap".to_string(),
        }
    }

    pub fn measure(&self, text: &str, px: f32) -> TextBox {
        match self {
            Typeface::Outline { font, .. } => {
                let mut bounds: Option<(i32, i32, i32, i32)> = None;
                layout_outline(font, px, text, |glyph| {
                    let bb = glyph.px_bounds();
                    let (x0, y0) = (bb.min.x as i32, bb.min.y as i32);
                    let (x1, y1) = (bb.max.x as i32, bb.max.y as i32);
                    bounds = Some(match bounds {
                        Some((a, b, c, d)) => (a.min(x0), b.min(y0), c.max(x1), d.max(y1)),
                        None => (x0, y0, x1, y1),
                    });
                });
                match bounds {
                    Some((x0, y0, x1, y1)) => TextBox {
                        left: x0,
                        top: y0,
                        width: (x1 - x0).max(0) as u32,
                        height: (y1 - y0).max(0) as u32,
                    },
                    None => TextBox::default(),
                }
            }
            Typeface::Builtin => builtin_font::measure(text, px),
        }
    }

    /// Draws `text` with its pen origin at `origin`, blending glyph coverage
    /// over the existing pixels.
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, px: f32, origin: (i32, i32), color: Rgb<u8>) {
        match self {
            Typeface::Outline { font, .. } => {
                let (width, height) = (canvas.width() as i32, canvas.height() as i32);
                layout_outline(font, px, text, |glyph| {
                    let bb = glyph.px_bounds();
                    let base_x = origin.0 + bb.min.x as i32;
                    let base_y = origin.1 + bb.min.y as i32;
                    glyph.draw(|gx, gy, coverage| {
                        let x = base_x + gx as i32;
                        let y = base_y + gy as i32;
                        if x < 0 || y < 0 || x >= width || y >= height {
                            return;
                        }
                        let coverage = coverage.clamp(0.0, 1.0);
                        let pixel = canvas.get_pixel_mut(x as u32, y as u32);
                        *pixel = pixel.map2(&color, |bg, fg| {
                            (bg as f32 * (1.0 - coverage) + fg as f32 * coverage).round() as u8
                        });
                    });
                });
            }
            Typeface::Builtin => builtin_font::draw(canvas, text, px, origin.0, origin.1, color),
        }
    }
}

/// Lays glyphs out on one baseline placed at the font ascent, calling `f`
/// for every glyph that has an outline.
///
/// Measuring and drawing share this walk so that the measured ink box is
/// exactly where the pixels land. `imageproc::drawing::text_size` reports the
/// advance width and line height instead, which can't center visible ink.
fn layout_outline(font: &FontVec, px: f32, text: &str, mut f: impl FnMut(&OutlinedGlyph)) {
    let scale = PxScale::from(px);
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            f(&outlined);
        }
    }
}

/// The typeface shared by every image of a run, with the two line sizes.
pub struct FontSet {
    pub typeface: Typeface,
    pub headline_px: f32,
    pub tagline_px: f32,
    /// Set when the requested font was missing and the bitmap font is used.
    pub warning: Option<String>,
}

impl FontSet {
    pub fn load(path: &Path, headline_px: f32, tagline_px: f32) -> Result<Self> {
        let typeface = Typeface::load(path)?;
        let warning = typeface.is_builtin().then(|| {
            format!(
                "Font {} not found, using the built-in bitmap font (accents not guaranteed)",
                path.display()
            )
        });
        info!(
            "Using font {} at {}px / {}px",
            typeface.describe(),
            headline_px,
            tagline_px
        );
        Ok(Self {
            typeface,
            headline_px,
            tagline_px,
            warning,
        })
    }

    #[cfg(test)]
    pub fn builtin(headline_px: f32, tagline_px: f32) -> Self {
        Self {
            typeface: Typeface::Builtin,
            headline_px,
            tagline_px,
            warning: None,
        }
    }
}

/// DejaVu Sans checked in under `assets/fonts` for tests.
#[cfg(test)]
pub(crate) const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf");
