//! Batch driver: apply one or more presets to every image in a
//! directory.
//!
//! For each file in the input directory whose extension is one of
//! {jpg, jpeg, png, bmp} (case-insensitive), and for each selected
//! preset, the stylized result is written to
//! `<output_dir>/<preset_name>/<original_filename>`. Non-image files
//! are silently skipped. A decode or write failure on one file is
//! logged and counted; the batch continues.

use std::fs;
use std::path::{Path, PathBuf};

use cel_pipeline::{Preset, RgbImage, stylize};

/// Extensions accepted as input images, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// Fatal batch failures. Per-file decode/write problems are not fatal;
/// they are logged and counted in [`BatchReport::failures`].
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The input directory could not be read at all.
    #[error("failed to read input directory {path}: {source}")]
    ReadInputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-preset output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counters describing what a batch run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Image files successfully decoded.
    pub images: usize,
    /// Stylized outputs written (up to `images * presets`).
    pub outputs: usize,
    /// Files or outputs that failed and were skipped.
    pub failures: usize,
}

/// Whether a path carries one of the accepted image extensions.
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Run the whole batch.
///
/// Output directories (`<output_dir>/<preset_name>`) are created up
/// front so a preset typo fails before any pixel work.
///
/// # Errors
///
/// Returns [`BatchError`] only for failures that make the whole run
/// impossible: an unreadable input directory or an uncreatable output
/// directory.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    presets: &[Preset],
) -> Result<BatchReport, BatchError> {
    let entries = fs::read_dir(input_dir).map_err(|source| BatchError::ReadInputDir {
        path: input_dir.to_path_buf(),
        source,
    })?;

    for preset in presets {
        let dir = output_dir.join(preset.name());
        fs::create_dir_all(&dir).map_err(|source| BatchError::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;
    }

    // Deterministic processing order regardless of directory iteration.
    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let mut report = BatchReport::default();
    for path in paths {
        if !is_image_file(&path) {
            log::debug!("skipping non-image file {}", path.display());
            continue;
        }
        let Some(filename) = path.file_name() else {
            continue;
        };

        let decoded: RgbImage = match image::open(&path) {
            Ok(img) => img.to_rgb8(),
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                report.failures += 1;
                continue;
            }
        };
        report.images += 1;
        log::info!(
            "{} ({}x{})",
            path.display(),
            decoded.width(),
            decoded.height(),
        );

        for preset in presets {
            let out_path = output_dir.join(preset.name()).join(filename);
            let styled = match stylize(&decoded, &preset.params()) {
                Ok(img) => img,
                Err(err) => {
                    log::warn!("{preset} on {}: {err}", path.display());
                    report.failures += 1;
                    continue;
                }
            };
            match styled.save(&out_path) {
                Ok(()) => report.outputs += 1,
                Err(err) => {
                    log::warn!("failed to write {}: {err}", out_path.display());
                    report.failures += 1;
                }
            }
        }
    }
    Ok(report)
}
