mod builtin_font;
mod config;
mod error;
mod generator;
mod layout;
mod palette;
mod render;
mod typeface;

use clap::Parser;
use config::{GeneratorConfig, Overrides};
use std::path::PathBuf;
use std::process::ExitCode;

/// Generates the placeholder advertisement images, one per accent color.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory the images are written to (must exist)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Preferred TrueType/OpenType font; falls back to a built-in font if missing
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// JSON file overriding canvas, palette, texts or naming
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// File name prefix, followed by the 1-based image number
    #[arg(long)]
    prefix: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let overrides = Overrides {
        output_dir: args.output_dir,
        font: args.font,
        prefix: args.prefix,
    };

    let result = GeneratorConfig::resolve(args.config.as_deref(), overrides)
        .and_then(|config| generator::run(&config));

    match result {
        Ok(report) => {
            log::debug!(
                "Wrote {} files (fallback font: {})",
                report.files.len(),
                report.used_fallback_font()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
