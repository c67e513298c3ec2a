//! Color segmentation: HSV range test producing a binary mask.

use crate::color::HsvRange;
use crate::{HsvImage, Mask};
use ndarray::Array2;

/// Build a mask marking every pixel whose HSV sample lies inside the
/// range.
///
/// A matching sample becomes 255, everything else 0. Degenerate ranges
/// simply produce an all-zero mask.
pub fn in_range(hsv: &HsvImage, range: &HsvRange) -> Mask {
    let (rows, cols, _) = hsv.dim();
    let mut mask = Array2::zeros((rows, cols));

    for i in 0..rows {
        for j in 0..cols {
            if range.contains(hsv[[i, j, 0]], hsv[[i, j, 1]], hsv[[i, j, 2]]) {
                mask[[i, j]] = 255;
            }
        }
    }

    mask
}
