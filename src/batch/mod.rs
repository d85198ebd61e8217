pub mod class_label;
pub mod runner;
pub mod summary;

pub use class_label::ClassLabel;
pub use runner::{BatchRunner, find_raw_images};
pub use summary::{ClassSummary, FileFailure, RunSummary, SUMMARY_FILE_NAME};

/// Extension of the raw hyperspectral images picked up in each class directory.
pub const RAW_EXTENSION: &str = "tif";
