use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::sensor::SensorConfig;

pub mod error;
pub use error::ConfigError;

pub const DEFAULT_INPUT_DIR: &str = "data/raw/train";
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";
pub const DEFAULT_IMG_SIZE: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    input_dir: PathBuf,
    output_dir: PathBuf,
    img_size: usize,
    sensor: SensorConfig,
    parallel: bool,
}

// Deserializes a Config, rejecting a zero img_size. Sensor validation happens in
// SensorConfig's own Deserialize.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct ConfigHelper {
            input_dir: PathBuf,
            output_dir: PathBuf,
            img_size: usize,
            #[serde(default)]
            sensor: SensorConfig,
            #[serde(default)]
            parallel: bool,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.img_size == 0 {
            return Err(D::Error::custom(ConfigError::ImgSize));
        }

        Ok(Config {
            input_dir: helper.input_dir,
            output_dir: helper.output_dir,
            img_size: helper.img_size,
            sensor: helper.sensor,
            parallel: helper.parallel,
        })
    }
}

impl Config {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        input_dir: P,
        output_dir: Q,
        img_size: usize,
    ) -> Result<Self, ConfigError> {
        if img_size == 0 {
            return Err(ConfigError::ImgSize);
        }

        Ok(Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            img_size,
            sensor: SensorConfig::default(),
            parallel: false,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_input_dir<P: Into<PathBuf>>(mut self, input_dir: P) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_img_size(mut self, img_size: usize) -> Result<Self, ConfigError> {
        if img_size == 0 {
            return Err(ConfigError::ImgSize);
        }
        self.img_size = img_size;
        Ok(self)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn img_size(&self) -> usize {
        self.img_size
    }

    pub fn sensor(&self) -> &SensorConfig {
        &self.sensor
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            img_size: DEFAULT_IMG_SIZE,
            sensor: SensorConfig::default(),
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let mut file = File::create(&file_path).unwrap();

        let config_data = r#"
    {
        "input_dir": "data/raw/train",
        "output_dir": "data/processed",
        "img_size": 32,
        "sensor": {
            "start_wavelength": 400.0,
            "resolution": 2.0,
            "red_wavelength": 670.0,
            "nir_wavelength": 850.0
        },
        "parallel": true
    }
    "#;

        file.write_all(config_data.as_bytes()).unwrap();

        let config = Config::from_file(file_path).unwrap();

        assert_eq!(config.input_dir(), Path::new("data/raw/train"));
        assert_eq!(config.output_dir(), Path::new("data/processed"));
        assert_eq!(config.img_size(), 32);
        assert!(config.parallel());
        assert_eq!(config.sensor().red_band().unwrap(), 135);
    }

    #[test]
    fn test_sensor_defaults_when_omitted() {
        let config: Config = serde_json::from_str(
            r#"{ "input_dir": "in", "output_dir": "out", "img_size": 64 }"#,
        )
        .unwrap();

        assert_eq!(config.sensor(), &SensorConfig::default());
        assert!(!config.parallel());
    }

    #[test]
    fn test_zero_img_size_is_rejected() {
        let result = serde_json::from_str::<Config>(
            r#"{ "input_dir": "in", "output_dir": "out", "img_size": 0 }"#,
        );
        assert!(result.is_err());

        assert!(matches!(
            Config::new("in", "out", 0),
            Err(ConfigError::ImgSize)
        ));
        assert!(Config::default().with_img_size(0).is_err());
    }

    #[test]
    fn test_invalid_resolution_is_rejected() {
        let result = serde_json::from_str::<Config>(
            r#"{ "input_dir": "in", "output_dir": "out", "img_size": 64,
                 "sensor": { "resolution": -4.0 } }"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("got -4"));
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/definitely/not/a/config.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_matches_reference_layout() {
        let config = Config::default();
        assert_eq!(config.input_dir(), Path::new("data/raw/train"));
        assert_eq!(config.output_dir(), Path::new("data/processed"));
        assert_eq!(config.img_size(), 64);
    }
}
