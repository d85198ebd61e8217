//! Hyperspectral crop-canopy images to NDVI arrays.
//!
//! Raw images are organised per crop health class (`Health`, `Rust`, `Other`).
//! Each one is decoded into a (band, height, width) cube, reduced to an NDVI
//! map from its red and near-infrared bands, resized to a fixed square and
//! saved as a `.npy` array under the same class in the output tree.

pub mod batch;
pub mod config;
pub mod error;
pub mod inspect;
pub mod ndvi;
pub mod readers;
pub mod resize;
pub mod sensor;
pub mod writers;

#[cfg(test)]
mod test_support;

pub use batch::{BatchRunner, ClassLabel, RunSummary};
pub use config::Config;
pub use error::{ProcessError, Result};
pub use ndvi::compute_ndvi;
pub use resize::resize_area;
pub use sensor::SensorConfig;
