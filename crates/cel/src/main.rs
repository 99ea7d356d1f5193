//! cel: batch anime-stylization driver.
//!
//! Applies one or more named parameter presets to every image in a
//! directory, writing each preset's results to its own subdirectory:
//!
//! ```text
//! cel photos/ -o stylized/ --preset anime_style --preset monochrome
//! ```
//!
//! produces `stylized/anime_style/<file>` and
//! `stylized/monochrome/<file>` for every jpg/jpeg/png/bmp file in
//! `photos/`. With no `--preset` flags, all presets are applied.
//!
//! Per-file problems (corrupt images, unwritable outputs) are logged
//! via `env_logger` (`RUST_LOG=warn` and up) and skipped; the batch
//! keeps going.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod batch;

use std::path::PathBuf;

use cel_pipeline::Preset;
use clap::Parser;

/// Batch anime-stylization: posterized colors with black line art.
#[derive(Parser)]
#[command(name = "cel", version)]
struct Cli {
    /// Directory of input images (jpg, jpeg, png, bmp).
    input_dir: PathBuf,

    /// Output directory; one subdirectory per preset is created inside.
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Preset to apply; may be repeated or comma-separated.
    /// Defaults to every preset.
    #[arg(long = "preset", value_delimiter = ',')]
    presets: Vec<Preset>,

    /// Print the preset table and exit.
    #[arg(long)]
    list_presets: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_presets {
        for preset in Preset::ALL {
            let p = preset.params();
            println!(
                "{:<12} saturation={:<4} levels={:<3} smoothing={:<5} edge_sensitivity={}",
                preset.name(),
                p.saturation,
                p.levels,
                p.smoothing,
                p.edge_sensitivity,
            );
        }
        return Ok(());
    }

    let presets = if cli.presets.is_empty() {
        Preset::ALL.to_vec()
    } else {
        cli.presets
    };

    let report = batch::run_batch(&cli.input_dir, &cli.output_dir, &presets)?;

    println!(
        "Stylized {} image(s) into {} output(s) under {}",
        report.images,
        report.outputs,
        cli.output_dir.display(),
    );
    if report.failures > 0 {
        println!("{} file(s) skipped due to errors (see log)", report.failures);
    }
    Ok(())
}
