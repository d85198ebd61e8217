//! Normalized Difference Vegetation Index from a hyperspectral cube.
//!
//! `NDVI = (NIR - Red) / (NIR + Red)`, computed on the two bands located by
//! [`SensorConfig`] and cleansed so every output value is a finite number in
//! [-1, 1].

use ndarray::{Array2, ArrayView3, Axis, Zip};

use crate::error::{ProcessError, Result};
use crate::sensor::SensorConfig;

/// Added to the denominator so that two all-zero bands give 0 instead of NaN.
pub const NDVI_EPSILON: f32 = 1e-8;

/// Compute NDVI from a cube laid out as (band, height, width).
pub fn compute_ndvi(cube: ArrayView3<f32>, sensor: &SensorConfig) -> Result<Array2<f32>> {
    let red_band = sensor.red_band()?;
    let nir_band = sensor.nir_band()?;

    let total_bands = cube.len_of(Axis(0));
    if red_band >= total_bands || nir_band >= total_bands {
        return Err(ProcessError::OutOfRangeBand {
            red: red_band,
            nir: nir_band,
            available: total_bands,
        });
    }

    let red = cube.index_axis(Axis(0), red_band);
    let nir = cube.index_axis(Axis(0), nir_band);

    let ndvi = Zip::from(&nir)
        .and(&red)
        .map_collect(|&nir, &red| {
            cleanse((nir - red) / (nir + red + NDVI_EPSILON))
        });

    Ok(ndvi)
}

/// NaN becomes 0, infinities become +/-1 and finite values are clamped to [-1, 1].
pub fn cleanse(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else if value == f32::INFINITY {
        1.0
    } else if value == f32::NEG_INFINITY {
        -1.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, s};

    fn cube_with(red: f32, nir: f32, bands: usize) -> Array3<f32> {
        let mut cube = Array3::<f32>::from_elem((bands, 4, 3), 0.25);
        cube.slice_mut(s![45, .., ..]).fill(red);
        cube.slice_mut(s![90, .., ..]).fill(nir);
        cube
    }

    #[test]
    fn test_ndvi_of_vegetation() {
        let sensor = SensorConfig::default();
        let cube = cube_with(0.1, 0.5, 125);

        let ndvi = compute_ndvi(cube.view(), &sensor).unwrap();

        assert_eq!(ndvi.dim(), (4, 3));
        let expected = (0.5 - 0.1) / (0.5 + 0.1);
        assert!(ndvi.iter().all(|v| (v - expected).abs() < 1e-6));
    }

    #[test]
    fn test_zero_bands_give_zero() {
        let sensor = SensorConfig::default();
        let cube = cube_with(0.0, 0.0, 125);

        let ndvi = compute_ndvi(cube.view(), &sensor).unwrap();

        assert!(ndvi.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_values_stay_in_range() {
        let sensor = SensorConfig::default();
        let mut cube = Array3::<f32>::zeros((91, 2, 3));
        let red = [0.0, 1.0, f32::MAX, -5.0, f32::NAN, 3.0];
        let nir = [7.0, 0.0, f32::MAX, 2.0, 1.0, f32::INFINITY];
        for (i, (r, n)) in red.iter().zip(nir.iter()).enumerate() {
            cube[[45, i / 3, i % 3]] = *r;
            cube[[90, i / 3, i % 3]] = *n;
        }

        let ndvi = compute_ndvi(cube.view(), &sensor).unwrap();

        for v in ndvi.iter() {
            assert!(v.is_finite() && (-1.0..=1.0).contains(v));
        }
    }

    #[test]
    fn test_too_few_bands_is_rejected() {
        let sensor = SensorConfig::default();
        let cube = Array3::<f32>::ones((46, 2, 2));

        let err = compute_ndvi(cube.view(), &sensor).unwrap_err();

        match err {
            ProcessError::OutOfRangeBand {
                red,
                nir,
                available,
            } => {
                assert_eq!(red, 45);
                assert_eq!(nir, 90);
                assert_eq!(available, 46);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_exactly_enough_bands() {
        let sensor = SensorConfig::default();
        let cube = Array3::<f32>::ones((91, 2, 2));
        assert!(compute_ndvi(cube.view(), &sensor).is_ok());
    }

    #[test]
    fn test_cleanse() {
        assert_eq!(cleanse(f32::NAN), 0.0);
        assert_eq!(cleanse(f32::INFINITY), 1.0);
        assert_eq!(cleanse(f32::NEG_INFINITY), -1.0);
        assert_eq!(cleanse(0.3), 0.3);
        assert_eq!(cleanse(3.0), 1.0);
        assert_eq!(cleanse(-3.0), -1.0);
    }
}
