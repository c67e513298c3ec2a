//! Binary edge map with double-threshold hysteresis.
//!
//! Sobel gradients with zero padding outside the image, so a foreground
//! region flush against the frame border still produces a closed edge
//! ring. Pixels above the high threshold seed the edge set; pixels above
//! the low threshold join it when 8-connected to a seed.

use crate::Mask;
use ndarray::Array2;

#[inline]
fn sample(mask: &Mask, i: isize, j: isize) -> f64 {
    let (rows, cols) = mask.dim();
    if i < 0 || j < 0 || i >= rows as isize || j >= cols as isize {
        0.0
    } else {
        mask[[i as usize, j as usize]] as f64
    }
}

/// Compute the edge map of a mask.
///
/// `low` and `high` are hysteresis thresholds on gradient magnitude
/// (defaults 100/200 in the pipeline configuration). Output samples are
/// 255 on edges, 0 elsewhere.
pub fn edge_map(mask: &Mask, low: f64, high: f64) -> Mask {
    let (rows, cols) = mask.dim();
    let mut magnitude = Array2::<f64>::zeros((rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            let ii = i as isize;
            let jj = j as isize;

            let gx = -sample(mask, ii - 1, jj - 1) + sample(mask, ii - 1, jj + 1)
                - 2.0 * sample(mask, ii, jj - 1)
                + 2.0 * sample(mask, ii, jj + 1)
                - sample(mask, ii + 1, jj - 1)
                + sample(mask, ii + 1, jj + 1);
            let gy = -sample(mask, ii - 1, jj - 1) - 2.0 * sample(mask, ii - 1, jj)
                - sample(mask, ii - 1, jj + 1)
                + sample(mask, ii + 1, jj - 1)
                + 2.0 * sample(mask, ii + 1, jj)
                + sample(mask, ii + 1, jj + 1);

            magnitude[[i, j]] = (gx * gx + gy * gy).sqrt();
        }
    }

    // Seed with strong pixels, then grow through weak ones with a flood
    // fill over the 8-neighborhood.
    let neighbors = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ];

    let mut edges: Mask = Array2::zeros((rows, cols));
    let mut stack = Vec::new();

    for i in 0..rows {
        for j in 0..cols {
            if magnitude[[i, j]] > high && edges[[i, j]] == 0 {
                edges[[i, j]] = 255;
                stack.push((i, j));

                while let Some((y, x)) = stack.pop() {
                    for &(dy, dx) in &neighbors {
                        let ny = y as isize + dy;
                        let nx = x as isize + dx;
                        if ny < 0 || nx < 0 || ny >= rows as isize || nx >= cols as isize {
                            continue;
                        }
                        let ny = ny as usize;
                        let nx = nx as usize;
                        if edges[[ny, nx]] == 0 && magnitude[[ny, nx]] > low {
                            edges[[ny, nx]] = 255;
                            stack.push((ny, nx));
                        }
                    }
                }
            }
        }
    }

    edges
}
