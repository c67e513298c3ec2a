//! Image dimensions and size utilities

use crate::{BgrImage, Mask};
use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image dimensions structure
///
/// Represents the width and height of a frame, mask or canvas.
/// Provides convenience constructors for the buffer shapes used
/// throughout the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
}

impl ImageSize {
    /// Create a new ImageSize
    pub fn from_width_height(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Dimensions of an existing BGR frame
    ///
    /// Note the row-major ordering convention: the array shape is
    /// (height, width, 3), so rows come first.
    pub fn of_frame(frame: &BgrImage) -> Self {
        let shape = frame.shape();
        Self {
            width: shape[1],
            height: shape[0],
        }
    }

    /// Create an all-black BGR buffer with this size
    pub fn empty_bgr(&self) -> BgrImage {
        Array3::zeros((self.height, self.width, 3))
    }

    /// Create an all-zero mask with this size
    pub fn empty_mask(&self) -> Mask {
        Array2::zeros((self.height, self.width))
    }

    /// Get total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Convert to tuple (width, height)
    pub fn to_tuple(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

impl From<(usize, usize)> for ImageSize {
    fn from(dimensions: (usize, usize)) -> Self {
        Self {
            width: dimensions.0,
            height: dimensions.1,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
