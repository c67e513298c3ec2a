//! Binary morphology over {0,255} masks.
//!
//! Dilation and erosion with a square all-ones kernel, implemented as
//! separable running max/min passes. The erosion window is the reflection
//! of the dilation window so that `close` (dilate then erode) forms a
//! proper adjunction and is idempotent for every kernel size, odd or even.
//!
//! Pixels outside the image act as background for dilation and as
//! foreground for erosion, so a mask covering the whole frame is a fixed
//! point of closing.

use crate::Mask;
use ndarray::Array2;

/// Anchor split for a kernel of side `k`: window spans `[-lo, +hi]`.
fn anchor(k: usize) -> (usize, usize) {
    ((k - 1) / 2, k / 2)
}

/// One separable max pass along an axis; `axis` 0 sweeps rows, 1 columns.
fn max_pass(mask: &Mask, lo: usize, hi: usize, axis: usize) -> Mask {
    let (rows, cols) = mask.dim();
    let mut out = Array2::zeros((rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            let (center, len) = if axis == 0 { (i, rows) } else { (j, cols) };
            let start = center.saturating_sub(lo);
            let end = (center + hi).min(len - 1);

            let mut best = 0u8;
            for t in start..=end {
                let v = if axis == 0 { mask[[t, j]] } else { mask[[i, t]] };
                best = best.max(v);
            }
            out[[i, j]] = best;
        }
    }

    out
}

/// One separable min pass along an axis, ignoring out-of-bounds samples.
fn min_pass(mask: &Mask, lo: usize, hi: usize, axis: usize) -> Mask {
    let (rows, cols) = mask.dim();
    let mut out = Array2::zeros((rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            let (center, len) = if axis == 0 { (i, rows) } else { (j, cols) };
            let start = center.saturating_sub(lo);
            let end = (center + hi).min(len - 1);

            let mut worst = 255u8;
            for t in start..=end {
                let v = if axis == 0 { mask[[t, j]] } else { mask[[i, t]] };
                worst = worst.min(v);
            }
            out[[i, j]] = worst;
        }
    }

    out
}

/// Dilate with a `kernel_size` x `kernel_size` all-ones kernel.
pub fn dilate(mask: &Mask, kernel_size: usize) -> Mask {
    assert!(kernel_size >= 1, "kernel size must be at least 1");
    let (lo, hi) = anchor(kernel_size);
    let horizontal = max_pass(mask, lo, hi, 1);
    max_pass(&horizontal, lo, hi, 0)
}

/// Erode with the reflected kernel window.
pub fn erode(mask: &Mask, kernel_size: usize) -> Mask {
    assert!(kernel_size >= 1, "kernel size must be at least 1");
    let (lo, hi) = anchor(kernel_size);
    // reflected: [-hi, +lo]
    let horizontal = min_pass(mask, hi, lo, 1);
    min_pass(&horizontal, hi, lo, 0)
}

/// Morphological closing: dilation followed by erosion with the same
/// kernel. Fills gaps narrower than the kernel inside foreground regions
/// before contour tracing.
pub fn close(mask: &Mask, kernel_size: usize) -> Mask {
    erode(&dilate(mask, kernel_size), kernel_size)
}
