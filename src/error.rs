use std::path::PathBuf;
use thiserror::Error;

use crate::readers::ReadError;

/// Errors raised by the preprocessing pipeline.
///
/// `InputNotFound` and `OutputPreparation` abort a run. Every other variant is
/// scoped to a single image and is recorded in the run summary instead.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Input directory not found at {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputPreparation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Wavelength {wavelength}nm is below the sensor start wavelength {start}nm")]
    WavelengthBelowStart { wavelength: f64, start: f64 },

    #[error("Band index out of range: red={red}, nir={nir}, available={available}")]
    OutOfRangeBand {
        red: usize,
        nir: usize,
        available: usize,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] ReadError),

    #[error("Failed to resize array: {0}")]
    Resize(String),

    #[error("Failed to write array: {0}")]
    Persist(#[from] std::io::Error),

    #[error("Failed to write run summary: {0}")]
    Summary(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProcessError>;
