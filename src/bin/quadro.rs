//! Command-line front end: render one styled QR code to a PNG file.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use quadro_renderer::{LogoSource, QrRenderer, StyleSettings};

/// Render a styled QR code to a PNG file.
#[derive(Parser)]
#[command(name = "quadro", version)]
struct Args {
    /// Text to encode.
    text: String,

    /// Module style: square, rounded, or dot.
    #[arg(long, default_value = "square")]
    style: String,

    /// Module color as six hex digits.
    #[arg(long, default_value = "000000")]
    color: String,

    /// Background color as six hex digits.
    #[arg(long, default_value = "ffffff")]
    background: String,

    /// Edge length of one module in pixels.
    #[arg(long, default_value_t = 20)]
    scale: u32,

    /// Logo image file to composite at the center.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Output path.
    #[arg(short, long, default_value = "qr.png")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = StyleSettings::new()
        .with_style(args.style.as_str())
        .with_module_color(args.color.as_str())
        .with_background_color(args.background.as_str())
        .with_pixels_per_module(args.scale);

    let logo = match &args.logo {
        Some(path) => Some(LogoSource::from_bytes(fs::read(path)?)),
        None => None,
    };

    let renderer = QrRenderer::new();
    let png = renderer.render_styled(&args.text, &settings, logo.as_ref())?;
    fs::write(&args.out, &png)?;
    println!("wrote {}", args.out.display());
    Ok(())
}
