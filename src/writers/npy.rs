use ndarray::ArrayView2;
use npyz::WriterBuilder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const ARRAY_EXTENSION: &str = "npy";

/// Write a 2-D f32 array as a C-order `.npy` file.
pub fn write_npy<P: AsRef<Path>>(path: P, array: ArrayView2<f32>) -> std::io::Result<()> {
    let (rows, cols) = array.dim();
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    let mut writer = npyz::WriteOptions::new()
        .default_dtype()
        .shape(&[rows as u64, cols as u64])
        .writer(&mut out)
        .begin_nd()?;

    // Logical iteration order is row-major whatever the memory layout.
    for value in array.iter() {
        writer.push(value)?;
    }
    writer.finish()?;
    out.flush()?;

    Ok(())
}
