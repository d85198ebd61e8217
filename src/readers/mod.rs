pub mod npy;
pub mod tiff_cube;
pub mod types;
pub mod utils;

pub use npy::{npy_info, read_npy};
pub use tiff_cube::TiffCubeReader;
pub use types::{ArrayInfo, CubeReader, FileType, ReadError};
pub use utils::reader_from_filetype;

use std::path::Path;

pub fn create_reader<P: AsRef<Path>>(file_name: P) -> Result<Box<dyn CubeReader>, ReadError> {
    let path = file_name.as_ref();
    match reader_from_filetype(path)? {
        FileType::Tiff => Ok(Box::new(TiffCubeReader {
            file_name: path.to_path_buf(),
        })),
        FileType::Npy => Err(ReadError::UnknownFileType(format!(
            "{} is an array file, not a raw cube",
            path.display()
        ))),
    }
}

/// Shape and value range of a raw cube, as decoded (height, width, band).
pub fn cube_info<P: AsRef<Path>>(file_name: P) -> Result<ArrayInfo, ReadError> {
    let cube = create_reader(file_name)?.read_cube()?;
    let values: Vec<f32> = cube.iter().copied().collect();
    let shape = cube.shape().to_vec();
    Ok(ArrayInfo::from_values(shape, "float32", &values))
}
