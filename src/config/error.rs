use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("img_size must be a positive number of pixels")]
    ImgSize,

    #[error("Wavelength resolution must be a positive number, got {0}")]
    Resolution(f64),

    #[error("Wavelengths must be finite numbers")]
    Wavelength,
}
