use super::types::{FileType, ReadError};
use std::path::Path;

pub fn reader_from_filetype(path: &Path) -> Result<FileType, ReadError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("tif") | Some("tiff") => Ok(FileType::Tiff),
        Some("npy") => Ok(FileType::Npy),
        _ => Err(ReadError::UnknownFileType(path.display().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filetype_from_extension() {
        assert_eq!(
            reader_from_filetype(Path::new("hyper (1).tif")).unwrap(),
            FileType::Tiff
        );
        assert_eq!(
            reader_from_filetype(Path::new("a/b.tiff")).unwrap(),
            FileType::Tiff
        );
        assert_eq!(
            reader_from_filetype(Path::new("a/b.npy")).unwrap(),
            FileType::Npy
        );
        assert!(reader_from_filetype(Path::new("notes.txt")).is_err());
        assert!(reader_from_filetype(Path::new("no_extension")).is_err());
    }
}
