use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::config::ConfigError;
use crate::error::{ProcessError, Result};

pub const DEFAULT_START_WAVELENGTH: f64 = 490.0;
pub const DEFAULT_RESOLUTION: f64 = 4.0;
pub const DEFAULT_RED_WAVELENGTH: f64 = 670.0;
pub const DEFAULT_NIR_WAVELENGTH: f64 = 850.0;

/// Spectral layout of the hyperspectral camera and the two wavelengths used
/// for NDVI.
///
/// Construction goes through [`SensorConfig::new`] (or deserialization of
/// [`crate::config::Config`]), which enforces a strictly positive resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorConfig {
    start_wavelength: f64,
    resolution: f64,
    red_wavelength: f64,
    nir_wavelength: f64,
}

impl SensorConfig {
    pub fn new(
        start_wavelength: f64,
        resolution: f64,
        red_wavelength: f64,
        nir_wavelength: f64,
    ) -> std::result::Result<Self, ConfigError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ConfigError::Resolution(resolution));
        }

        if !start_wavelength.is_finite()
            || !red_wavelength.is_finite()
            || !nir_wavelength.is_finite()
        {
            return Err(ConfigError::Wavelength);
        }

        Ok(Self {
            start_wavelength,
            resolution,
            red_wavelength,
            nir_wavelength,
        })
    }

    pub fn start_wavelength(&self) -> f64 {
        self.start_wavelength
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn red_wavelength(&self) -> f64 {
        self.red_wavelength
    }

    pub fn nir_wavelength(&self) -> f64 {
        self.nir_wavelength
    }

    /// Convert a wavelength in nanometers to the band index of the cube.
    ///
    /// The quotient is truncated toward zero, so 672nm with a 490nm start and
    /// 4nm steps lands on band 45 like 670nm does.
    pub fn band_index(&self, wavelength_nm: f64) -> Result<usize> {
        let offset = (wavelength_nm - self.start_wavelength) / self.resolution;

        // Anything in (-1, 0) truncates to band 0, like an int() cast would.
        if !offset.is_finite() || offset <= -1.0 {
            return Err(ProcessError::WavelengthBelowStart {
                wavelength: wavelength_nm,
                start: self.start_wavelength,
            });
        }

        Ok(offset.trunc() as usize)
    }

    pub fn red_band(&self) -> Result<usize> {
        self.band_index(self.red_wavelength)
    }

    pub fn nir_band(&self) -> Result<usize> {
        self.band_index(self.nir_wavelength)
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            start_wavelength: DEFAULT_START_WAVELENGTH,
            resolution: DEFAULT_RESOLUTION,
            red_wavelength: DEFAULT_RED_WAVELENGTH,
            nir_wavelength: DEFAULT_NIR_WAVELENGTH,
        }
    }
}

impl<'de> Deserialize<'de> for SensorConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct SensorHelper {
            #[serde(default = "default_start")]
            start_wavelength: f64,
            #[serde(default = "default_resolution")]
            resolution: f64,
            #[serde(default = "default_red")]
            red_wavelength: f64,
            #[serde(default = "default_nir")]
            nir_wavelength: f64,
        }

        fn default_start() -> f64 {
            DEFAULT_START_WAVELENGTH
        }
        fn default_resolution() -> f64 {
            DEFAULT_RESOLUTION
        }
        fn default_red() -> f64 {
            DEFAULT_RED_WAVELENGTH
        }
        fn default_nir() -> f64 {
            DEFAULT_NIR_WAVELENGTH
        }

        let helper = SensorHelper::deserialize(deserializer)?;

        SensorConfig::new(
            helper.start_wavelength,
            helper.resolution,
            helper.red_wavelength,
            helper.nir_wavelength,
        )
        .map_err(D::Error::custom)
    }
}

impl Display for SensorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "start={}nm, step={}nm, red={}nm, nir={}nm",
            self.start_wavelength,
            self.resolution,
            self.red_wavelength,
            self.nir_wavelength
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_band_index_matches_camera_layout() {
        let sensor = SensorConfig::default();
        assert_eq!(sensor.band_index(670.0).unwrap(), 45);
        assert_eq!(sensor.red_band().unwrap(), 45);
        assert_eq!(sensor.nir_band().unwrap(), 90);
    }

    #[test]
    fn test_band_index_truncates() {
        let sensor = SensorConfig::default();
        assert_eq!(sensor.band_index(672.0).unwrap(), 45);
        assert_eq!(sensor.band_index(673.9).unwrap(), 45);
        assert_eq!(sensor.band_index(674.0).unwrap(), 46);
        assert_eq!(sensor.band_index(490.0).unwrap(), 0);
    }

    #[test]
    fn test_band_index_slightly_below_start_is_first_band() {
        let sensor = SensorConfig::default();
        assert_eq!(sensor.band_index(488.0).unwrap(), 0);
    }

    #[test]
    fn test_band_index_below_start_is_rejected() {
        let sensor = SensorConfig::default();
        let err = sensor.band_index(400.0).unwrap_err();
        assert!(matches!(err, ProcessError::WavelengthBelowStart { .. }));
    }

    #[test]
    fn test_resolution_must_be_positive() {
        assert!(matches!(
            SensorConfig::new(490.0, 0.0, 670.0, 850.0),
            Err(ConfigError::Resolution(_))
        ));
        assert!(matches!(
            SensorConfig::new(490.0, -4.0, 670.0, 850.0),
            Err(ConfigError::Resolution(_))
        ));
        assert!(SensorConfig::new(490.0, f64::NAN, 670.0, 850.0).is_err());
        assert!(SensorConfig::new(490.0, 2.5, 670.0, 850.0).is_ok());
    }

    #[test]
    fn test_wavelengths_must_be_finite() {
        assert!(matches!(
            SensorConfig::new(490.0, 4.0, f64::INFINITY, 850.0),
            Err(ConfigError::Wavelength)
        ));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let sensor: SensorConfig =
            serde_json::from_str(r#"{ "resolution": 2.0 }"#).unwrap();
        assert_eq!(sensor.start_wavelength(), 490.0);
        assert_eq!(sensor.red_band().unwrap(), 90);

        let invalid = serde_json::from_str::<SensorConfig>(r#"{ "resolution": 0.0 }"#);
        let message = invalid.unwrap_err().to_string();
        assert!(message.contains("resolution must be a positive number"));
    }
}
