//! Frame rescaling.

use crate::BgrImage;
use ndarray::Array3;

/// Rescale a BGR frame by a uniform factor with bilinear interpolation.
///
/// Output dimensions are rounded and never drop below one pixel. Sample
/// coordinates use the half-pixel-center convention and clamp at the
/// image border.
pub fn resize_bilinear(frame: &BgrImage, factor: f64) -> BgrImage {
    let (rows, cols, _) = frame.dim();
    let out_rows = ((rows as f64 * factor).round() as usize).max(1);
    let out_cols = ((cols as f64 * factor).round() as usize).max(1);

    if out_rows == rows && out_cols == cols {
        return frame.clone();
    }

    let row_scale = rows as f64 / out_rows as f64;
    let col_scale = cols as f64 / out_cols as f64;
    let mut out: BgrImage = Array3::zeros((out_rows, out_cols, 3));

    for i in 0..out_rows {
        let src_y = ((i as f64 + 0.5) * row_scale - 0.5).clamp(0.0, (rows - 1) as f64);
        let y0 = src_y.floor() as usize;
        let y1 = (y0 + 1).min(rows - 1);
        let dy = src_y - y0 as f64;

        for j in 0..out_cols {
            let src_x = ((j as f64 + 0.5) * col_scale - 0.5).clamp(0.0, (cols - 1) as f64);
            let x0 = src_x.floor() as usize;
            let x1 = (x0 + 1).min(cols - 1);
            let dx = src_x - x0 as f64;

            for c in 0..3 {
                let top = frame[[y0, x0, c]] as f64 * (1.0 - dx) + frame[[y0, x1, c]] as f64 * dx;
                let bottom =
                    frame[[y1, x0, c]] as f64 * (1.0 - dx) + frame[[y1, x1, c]] as f64 * dx;
                out[[i, j, c]] = (top * (1.0 - dy) + bottom * dy).round() as u8;
            }
        }
    }

    out
}
