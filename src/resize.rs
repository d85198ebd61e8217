use ndarray::{Array2, ArrayView2};

use crate::error::{ProcessError, Result};

/// Resample a 2-D array to `(rows, cols)` by pixel-area averaging.
///
/// Each output pixel covers a rectangle of the source grid; its value is the
/// mean of the source pixels under that rectangle, weighted by how much of
/// each one is covered. This is the usual choice for shrinking since it
/// avoids aliasing. Output values never leave the source value range.
pub fn resize_area(source: ArrayView2<f32>, (rows, cols): (usize, usize)) -> Result<Array2<f32>> {
    let (src_rows, src_cols) = source.dim();

    if rows == 0 || cols == 0 {
        return Err(ProcessError::Resize(format!(
            "target size must be positive, got {}x{}",
            rows, cols
        )));
    }
    if src_rows == 0 || src_cols == 0 {
        return Err(ProcessError::Resize(format!(
            "source array is empty ({}x{})",
            src_rows, src_cols
        )));
    }

    let row_weights = axis_weights(src_rows, rows);
    let col_weights = axis_weights(src_cols, cols);

    // Rows first, then columns.
    let mut partial = Array2::<f64>::zeros((rows, src_cols));
    for (out_row, weights) in row_weights.iter().enumerate() {
        for &(src_row, weight) in weights {
            for col in 0..src_cols {
                partial[[out_row, col]] += weight * source[[src_row, col]] as f64;
            }
        }
    }

    let mut resized = Array2::<f32>::zeros((rows, cols));
    for out_row in 0..rows {
        for (out_col, weights) in col_weights.iter().enumerate() {
            let value: f64 = weights
                .iter()
                .map(|&(src_col, weight)| weight * partial[[out_row, src_col]])
                .sum();
            resized[[out_row, out_col]] = value as f32;
        }
    }

    Ok(resized)
}

/// For every destination index, the source indices it overlaps and the share
/// of the destination footprint each one covers. Shares sum to one.
fn axis_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|dst| {
            let start = dst as f64 * scale;
            let end = ((dst + 1) as f64 * scale).min(src_len as f64);

            let first = start.floor() as usize;
            let last = (end.ceil() as usize).clamp(first + 1, src_len);

            let mut weights: Vec<(usize, f64)> = (first..last)
                .filter_map(|src| {
                    let overlap = (end.min((src + 1) as f64) - start.max(src as f64)).max(0.0);
                    (overlap > 0.0).then_some((src, overlap))
                })
                .collect();

            let total: f64 = weights.iter().map(|(_, w)| w).sum();
            if total > 0.0 {
                for (_, w) in weights.iter_mut() {
                    *w /= total;
                }
            } else {
                weights = vec![(first.min(src_len - 1), 1.0)];
            }

            weights
        })
        .collect()
}
