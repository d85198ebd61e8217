use super::{ArrayInfo, ReadError};
use ndarray::{ArrayD, IxDyn};
use npyz::{DType, NpyFile};
use std::path::Path;

/// Reads an f32 `.npy` file, returning its dtype descriptor and the array.
pub fn read_npy<P: AsRef<Path>>(path: P) -> Result<(String, ArrayD<f32>), ReadError> {
    let bytes = std::fs::read(path)?;
    let npy = NpyFile::new(&bytes[..]).map_err(|e| ReadError::Npy(e.to_string()))?;

    let shape: Vec<usize> = npy.shape().iter().map(|&d| d as usize).collect();
    let dtype = match npy.dtype() {
        DType::Plain(type_str) => type_str.to_string(),
        other => format!("{:?}", other),
    };

    let data: Vec<f32> = npy
        .into_vec()
        .map_err(|e| ReadError::Npy(format!("{} ({})", e, dtype)))?;
    let array = ArrayD::from_shape_vec(IxDyn(&shape), data)?;

    Ok((dtype, array))
}

pub fn npy_info<P: AsRef<Path>>(path: P) -> Result<ArrayInfo, ReadError> {
    let (dtype, array) = read_npy(path)?;
    let values: Vec<f32> = array.iter().copied().collect();
    let shape = array.shape().to_vec();
    Ok(ArrayInfo::from_values(shape, &dtype, &values))
}
