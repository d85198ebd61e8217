use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::readers::{self, ArrayInfo, FileType, ReadError};

/// Description of one raw cube or processed array.
#[derive(Debug)]
pub struct Inspection {
    pub path: PathBuf,
    pub kind: FileType,
    pub info: Result<ArrayInfo, ReadError>,
}

pub fn inspect_file(path: &Path) -> Result<Inspection, ReadError> {
    let kind = readers::reader_from_filetype(path)?;
    let info = match kind {
        FileType::Tiff => readers::cube_info(path),
        FileType::Npy => readers::npy_info(path),
    };

    Ok(Inspection {
        path: path.to_path_buf(),
        kind,
        info,
    })
}

/// Inspect a file, or every `.tif`/`.npy` file below a directory.
pub fn inspect_path(path: &Path) -> Vec<Inspection> {
    if path.is_file() {
        return match inspect_file(path) {
            Ok(inspection) => vec![inspection],
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                Vec::new()
            }
        };
    }

    let found: Vec<Inspection> = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| inspect_file(entry.path()).ok())
        .collect();

    if found.is_empty() {
        warn!("No raw images or arrays found under {}", path.display());
    }
    found
}

impl std::fmt::Display for Inspection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.kind {
            FileType::Tiff => "Tiff image",
            FileType::Npy => "Array",
        };
        match &self.info {
            Ok(info) => write!(f, "{} {}: {}", label, self.path.display(), info),
            Err(e) => write!(f, "{} {}: unreadable ({})", label, self.path.display(), e),
        }
    }
}
