use super::{CubeReader, ReadError};
use ndarray::Array3;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tiff::decoder::{Decoder, DecodingResult};

/// Reads a hyperspectral TIFF into a (height, width, band) cube.
///
/// Two layouts are understood:
/// - a single page whose samples per pixel are the bands;
/// - a stack of single-sample pages, which is how numpy-oriented writers store
///   an (H, W, B) array whose last axis is not a colour axis. Pages become the
///   first axis, so page rows and columns map to (W, B).
pub struct TiffCubeReader {
    pub file_name: PathBuf,
}

struct Page {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CubeReader for TiffCubeReader {
    fn read_cube(&self) -> Result<Array3<f32>, ReadError> {
        let file = File::open(&self.file_name)?;
        let mut decoder = Decoder::new(BufReader::new(file))?;

        let mut pages = Vec::new();
        loop {
            let (width, height) = decoder.dimensions()?;
            let data = to_f32(decoder.read_image()?)?;
            pages.push(Page {
                width,
                height,
                data,
            });

            if !decoder.more_images() {
                break;
            }
            decoder.next_image()?;
        }

        assemble_cube(pages)
    }
}

fn to_f32(result: DecodingResult) -> Result<Vec<f32>, ReadError> {
    let data = match result {
        DecodingResult::U8(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U16(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U32(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::U64(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I8(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I16(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I32(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::I64(data) => data.iter().map(|&x| x as f32).collect(),
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.iter().map(|&x| x as f32).collect(),
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ReadError::UnsupportedFormat(
                "sample type cannot be converted to f32".to_string(),
            ));
        }
    };

    Ok(data)
}

fn assemble_cube(mut pages: Vec<Page>) -> Result<Array3<f32>, ReadError> {
    if pages.len() == 1 {
        let Some(page) = pages.pop() else {
            return Err(ReadError::Layout("image has no pages".to_string()));
        };
        let pixels = page.width as usize * page.height as usize;

        if pixels == 0 || page.data.len() % pixels != 0 {
            return Err(ReadError::Layout(format!(
                "{} samples do not fill a {}x{} image",
                page.data.len(),
                page.width,
                page.height
            )));
        }

        let samples = page.data.len() / pixels;
        let cube = Array3::from_shape_vec(
            (page.height as usize, page.width as usize, samples),
            page.data,
        )?;
        return Ok(cube);
    }

    let (width, height) = (pages[0].width, pages[0].height);
    let page_len = width as usize * height as usize;
    let mut data = Vec::with_capacity(pages.len() * page_len);

    for (index, page) in pages.iter().enumerate() {
        if page.width != width || page.height != height {
            return Err(ReadError::Layout(format!(
                "page {} is {}x{}, expected {}x{}",
                index, page.width, page.height, width, height
            )));
        }
        if page.data.len() != page_len {
            return Err(ReadError::Layout(format!(
                "page {} holds {} samples per pixel, stacked pages must hold one",
                index,
                page.data.len() / page_len.max(1)
            )));
        }
        data.extend_from_slice(&page.data);
    }

    let cube = Array3::from_shape_vec((pages.len(), height as usize, width as usize), data)?;
    Ok(cube)
}
