use ndarray::Array3;
use std::fmt;
use thiserror::Error;

/// Decodes a raw image into a cube with its native (height, width, band) axes.
pub trait CubeReader {
    fn read_cube(&self) -> Result<Array3<f32>, ReadError>;
}

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("Inconsistent image layout: {0}")]
    Layout(String),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("NPY error: {0}")]
    Npy(String),

    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Tiff,
    Npy,
}

/// Shape, element type and value range of an array found on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayInfo {
    pub shape: Vec<usize>,
    pub dtype: String,
    pub min: f32,
    pub max: f32,
}

impl ArrayInfo {
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn from_values(shape: Vec<usize>, dtype: &str, values: &[f32]) -> Self {
        let (min, max) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Self {
            shape,
            dtype: dtype.to_string(),
            min,
            max,
        }
    }
}

impl fmt::Display for ArrayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape: {:?}, dtype: {}, size: {}",
            self.shape,
            self.dtype,
            self.size()
        )?;

        if self.min <= self.max {
            write!(f, ", min: {}, max: {}", self.min, self.max)?;
        }

        Ok(())
    }
}
