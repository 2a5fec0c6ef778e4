use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::layout::{center_two_lines, TextLayout};
use crate::palette::AccentColor;
use crate::typeface::FontSet;
use image::RgbImage;
use log::debug;
use std::path::PathBuf;

/// File name of the image for the zero-based `index`.
pub fn output_file_name(config: &GeneratorConfig, index: usize) -> String {
    format!("{}{}.{}", config.prefix, index + 1, config.extension)
}

pub fn render_placeholder(config: &GeneratorConfig, fonts: &FontSet, accent: &AccentColor) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(config.width, config.height, config.background);
    let face = &fonts.typeface;

    let headline_box = face.measure(&config.headline, fonts.headline_px);
    let tagline_box = face.measure(&config.tagline, fonts.tagline_px);

    let layout = center_two_lines(
        config.width,
        config.height,
        &headline_box,
        &tagline_box,
        config.line_gap,
    );
    debug!(
        "{}: headline {:?} at {:?}, tagline {:?} at {:?}",
        accent.name, headline_box, layout.first, tagline_box, layout.second
    );

    face.draw(
        &mut canvas,
        &config.headline,
        fonts.headline_px,
        TextLayout::pen_origin(layout.first, &headline_box),
        accent.color,
    );
    face.draw(
        &mut canvas,
        &config.tagline,
        fonts.tagline_px,
        TextLayout::pen_origin(layout.second, &tagline_box),
        accent.color,
    );

    canvas
}

/// Renders the image for `index` and saves it into the output directory.
pub fn write_placeholder(
    config: &GeneratorConfig,
    fonts: &FontSet,
    index: usize,
    accent: &AccentColor,
) -> Result<PathBuf> {
    let image = render_placeholder(config, fonts, accent);
    let path = config.output_dir.join(output_file_name(config, index));
    image
        .save(&path)
        .map_err(|source| GeneratorError::Save {
            path: path.clone(),
            source,
        })?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeface::TEST_FONT;
    use image::Rgb;
    use std::path::Path;

    fn fonts() -> FontSet {
        FontSet::builtin(38.0, 20.0)
    }

    fn orange() -> AccentColor {
        AccentColor::new("orange", 241, 90, 34)
    }

    #[test]
    fn test_output_file_name() {
        let config = GeneratorConfig::default();
        assert_eq!(output_file_name(&config, 0), "pub_bazaria_1.png");
        assert_eq!(output_file_name(&config, 6), "pub_bazaria_7.png");
    }

    #[test]
    fn test_render_keeps_canvas_and_background() {
        let config = GeneratorConfig::default();
        let image = render_placeholder(&config, &fonts(), &orange());
        assert_eq!(image.dimensions(), (400, 300));
        for (x, y) in [(0, 0), (399, 0), (0, 299), (399, 299), (200, 10)] {
            assert_eq!(*image.get_pixel(x, y), Rgb([245, 245, 245]));
        }
    }

    /// Asserts that non-background pixels form two stacked bands whose
    /// overall extent is centered on the canvas within one pixel.
    fn assert_two_centered_bands(image: &RgbImage, background: Rgb<u8>) {
        let (width, height) = image.dimensions();
        let inked = |x: u32, y: u32| *image.get_pixel(x, y) != background;

        let inked_rows: Vec<u32> = (0..height)
            .filter(|&y| (0..width).any(|x| inked(x, y)))
            .collect();
        assert!(!inked_rows.is_empty());

        let bands = inked_rows.windows(2).filter(|w| w[1] != w[0] + 1).count() + 1;
        assert_eq!(bands, 2);

        let top = *inked_rows.first().unwrap() as i64;
        let bottom = *inked_rows.last().unwrap() as i64 + 1;
        assert!(
            (top - (height as i64 - bottom)).abs() <= 1,
            "not vertically centered: {}..{}",
            top,
            bottom
        );

        let inked_cols: Vec<u32> = (0..width)
            .filter(|&x| (0..height).any(|y| inked(x, y)))
            .collect();
        let left = *inked_cols.first().unwrap() as i64;
        let right = *inked_cols.last().unwrap() as i64 + 1;
        assert!(
            (left - (width as i64 - right)).abs() <= 1,
            "not horizontally centered: {}..{}",
            left,
            right
        );
    }

    #[test]
    fn test_render_draws_two_centered_bands() {
        let config = GeneratorConfig::default();
        let image = render_placeholder(&config, &fonts(), &orange());
        assert_two_centered_bands(&image, config.background);
    }

    #[test]
    fn test_outline_font_draws_two_centered_bands() {
        let config = GeneratorConfig::default();
        let fonts = FontSet::load(Path::new(TEST_FONT), config.headline_px, config.tagline_px).unwrap();
        assert!(!fonts.typeface.is_builtin());

        let image = render_placeholder(&config, &fonts, &orange());
        assert_eq!(image.dimensions(), (400, 300));
        assert_two_centered_bands(&image, config.background);
        assert!(image.pixels().any(|p| *p == Rgb([241, 90, 34])));
    }

    #[test]
    fn test_only_background_and_accent_with_bitmap_font() {
        let config = GeneratorConfig::default();
        let image = render_placeholder(&config, &fonts(), &orange());
        assert!(image
            .pixels()
            .all(|p| *p == Rgb([245, 245, 245]) || *p == Rgb([241, 90, 34])));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = GeneratorConfig::default();
        let a = render_placeholder(&config, &fonts(), &orange());
        let b = render_placeholder(&config, &fonts(), &orange());
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_text_larger_than_canvas_is_clipped() {
        let config = GeneratorConfig {
            width: 20,
            height: 10,
            ..Default::default()
        };
        let image = render_placeholder(&config, &fonts(), &orange());
        assert_eq!(image.dimensions(), (20, 10));
    }

    #[test]
    fn test_write_placeholder_saves_png() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let path = write_placeholder(&config, &fonts(), 0, &orange()).unwrap();
        assert_eq!(path, dir.path().join("pub_bazaria_1.png"));

        let saved = image::open(&path).unwrap().into_rgb8();
        assert_eq!(saved, render_placeholder(&config, &fonts(), &orange()));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            output_dir: dir.path().join("missing"),
            ..Default::default()
        };
        let err = write_placeholder(&config, &fonts(), 0, &orange()).unwrap_err();
        let expected = dir.path().join("missing").join("pub_bazaria_1.png");
        match &err {
            GeneratorError::Save { path, .. } => assert_eq!(path, &expected),
            other => panic!("expected a save error, got {}", other),
        }
        assert!(err.to_string().contains("pub_bazaria_1.png"), "{}", err);
    }
}
