use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::render::{output_file_name, write_placeholder};
use crate::typeface::FontSet;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Written files, in palette order.
    pub files: Vec<PathBuf>,
    /// Printed on stderr when the requested font was missing.
    pub font_warning: Option<String>,
}

impl Report {
    pub fn used_fallback_font(&self) -> bool {
        self.font_warning.is_some()
    }
}

pub fn completion_line(output_dir: &Path) -> String {
    if output_dir == Path::new(".") || output_dir.as_os_str().is_empty() {
        "All images have been generated in the current directory.".to_string()
    } else {
        format!("All images have been generated in {}", output_dir.display())
    }
}

/// Generates one image per palette color. The first failure stops the run;
/// files written before it are left in place.
pub fn run(config: &GeneratorConfig) -> Result<Report> {
    let fonts = FontSet::load(&config.font, config.headline_px, config.tagline_px)?;
    run_with_fonts(config, &fonts)
}

pub fn run_with_fonts(config: &GeneratorConfig, fonts: &FontSet) -> Result<Report> {
    if let Some(warning) = &fonts.warning {
        eprintln!("⚠ Warning: {}", warning);
    }
    info!(
        "Generating {} images ({}x{}) into {}",
        config.palette.len(),
        config.width,
        config.height,
        config.output_dir.display()
    );

    let mut files = Vec::with_capacity(config.palette.len());
    for (index, accent) in config.palette.colors().enumerate() {
        let path = write_placeholder(config, fonts, index, accent)?;
        println!("Image {} generated.", output_file_name(config, index));
        files.push(path);
    }

    println!("{}", completion_line(&config.output_dir));

    Ok(Report {
        files,
        font_warning: fonts.warning.clone(),
    })
}
