//! TIFF fixtures shared by the unit tests.

use ndarray::{Array3, Axis};
use std::fs::File;
use std::path::Path;
use tiff::encoder::{TiffEncoder, colortype};

/// (height, width, bands) cube at 0.25 everywhere, with 0.1 in the red band
/// (45) and 0.5 in the NIR band (90) of the default sensor when present.
pub fn vegetation_cube(height: usize, width: usize, bands: usize) -> Array3<f32> {
    Array3::from_shape_fn((height, width, bands), |(_, _, band)| match band {
        45 => 0.1,
        90 => 0.5,
        _ => 0.25,
    })
}

/// Writes an (H, W, B) cube as H single-sample pages of W rows by B columns.
pub fn write_cube_tiff(path: &Path, cube: &Array3<f32>) {
    let (_, width, bands) = cube.dim();
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();

    for page in cube.axis_iter(Axis(0)) {
        let data: Vec<f32> = page.iter().copied().collect();
        encoder
            .write_image::<colortype::Gray32Float>(bands as u32, width as u32, &data)
            .unwrap();
    }
}

pub fn write_rgb_f32_tiff(path: &Path, width: u32, height: u32, data: &[f32]) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder
        .write_image::<colortype::RGB32Float>(width, height, data)
        .unwrap();
}

pub fn write_gray_u16_tiff(path: &Path, width: u32, height: u32, data: &[u16]) {
    let file = File::create(path).unwrap();
    let mut encoder = TiffEncoder::new(file).unwrap();
    encoder
        .write_image::<colortype::Gray16>(width, height, data)
        .unwrap();
}
