//! Rotate-then-blur file pipeline.
//!
//! The pipeline is the only part of the crate that touches the file system.
//! It runs these steps in order and stops at the first failure:
//!
//! 1. Load the input bitmap
//! 2. Rotate it by 90 degrees
//! 3. Write the rotated bitmap
//! 4. Read the rotated bitmap back from disk
//! 5. Blur the reloaded image
//! 6. Write the blurred bitmap, using the reloaded header
//!
//! The blur always works on what was read back in step 4, not on the
//! rotated image still in memory.

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bitmap::{Bitmap, BitmapError, ErrorKind};
use crate::filter::blur_bitmap;
use crate::transform::rotate_bitmap;

/// Default input file name.
pub const DEFAULT_INPUT: &str = "bmp02.bmp";
/// Default output for the rotated image.
pub const DEFAULT_ROTATED_OUTPUT: &str = "finish.bmp";
/// Default output for the blurred image.
pub const DEFAULT_BLURRED_OUTPUT: &str = "finishG.bmp";

/// File locations for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bitmap to read.
    pub input: PathBuf,
    /// Where the rotated bitmap is written (and read back from).
    pub rotated_output: PathBuf,
    /// Where the blurred bitmap is written.
    pub blurred_output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            rotated_output: PathBuf::from(DEFAULT_ROTATED_OUTPUT),
            blurred_output: PathBuf::from(DEFAULT_BLURRED_OUTPUT),
        }
    }
}

/// A fallible step of the pipeline, used to report where a failure happened.
///
/// Rotation and blur cannot fail and have no stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Load,
    WriteRotated,
    ReloadRotated,
    WriteBlurred,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load input",
            Stage::WriteRotated => "write rotated image",
            Stage::ReloadRotated => "reload rotated image",
            Stage::WriteBlurred => "write blurred image",
        };
        f.write_str(name)
    }
}

/// A pipeline failure: the stage it happened in and the underlying error.
#[derive(Debug, Error)]
#[error("{stage} failed ({kind}): {source}", kind = .source.kind())]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: BitmapError,
}

impl PipelineError {
    /// Category of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Attach a stage to a bitmap error.
trait StageContext<T> {
    fn at(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageContext<T> for Result<T, BitmapError> {
    fn at(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Input dimensions `(width, height)`.
    pub source_dimensions: (u32, u32),
    /// Dimensions after rotation.
    pub rotated_dimensions: (u32, u32),
    /// Size of the rotated file in bytes.
    pub rotated_bytes: usize,
    /// Size of the blurred file in bytes.
    pub blurred_bytes: usize,
}

/// Run the full rotate-then-blur pipeline.
///
/// # Errors
///
/// Returns a [`PipelineError`] naming the first stage that failed. Files
/// written by earlier stages are left in place.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let source = Bitmap::load(&config.input).at(Stage::Load)?;
    info!(
        "Loaded {} ({}x{})",
        config.input.display(),
        source.width(),
        source.height()
    );

    let rotated = rotate_bitmap(&source);
    let rotated_bytes = rotated.save(&config.rotated_output).at(Stage::WriteRotated)?;
    info!(
        "Rotated image written to {}",
        config.rotated_output.display()
    );

    let reloaded = Bitmap::load(&config.rotated_output).at(Stage::ReloadRotated)?;
    let blurred = blur_bitmap(&reloaded);
    let blurred_bytes = blurred.save(&config.blurred_output).at(Stage::WriteBlurred)?;
    info!(
        "Gaussian blur written to {}",
        config.blurred_output.display()
    );

    Ok(PipelineReport {
        source_dimensions: (source.width(), source.height()),
        rotated_dimensions: (reloaded.width(), reloaded.height()),
        rotated_bytes,
        blurred_bytes,
    })
}

/// Rotate a single file.
pub fn rotate_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<Bitmap, PipelineError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = Bitmap::load(input).at(Stage::Load)?;
    let rotated = rotate_bitmap(&source);
    rotated.save(output).at(Stage::WriteRotated)?;
    info!("Rotated {} into {}", input.display(), output.display());
    Ok(rotated)
}

/// Blur a single file.
pub fn blur_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<Bitmap, PipelineError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let source = Bitmap::load(input).at(Stage::Load)?;
    let blurred = blur_bitmap(&source);
    blurred.save(output).at(Stage::WriteBlurred)?;
    info!("Blurred {} into {}", input.display(), output.display());
    Ok(blurred)
}
