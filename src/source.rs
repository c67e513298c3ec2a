//! Frame acquisition.
//!
//! The pipeline pulls frames through the [`FrameSource`] trait and treats
//! exhaustion as a normal terminal condition, not an error to recover
//! from. Two sources ship with the crate: an in-memory buffer used by
//! tests and offline runs, and a decoder over a directory of image files.

use crate::BgrImage;
use log::debug;
use ndarray::Array3;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a capture attempt produced no frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The source has no more frames. Normal termination, not a failure.
    #[error("frame source exhausted")]
    EndOfStream,

    /// The source failed to produce a readable frame.
    #[error("frame capture failed: {0}")]
    Failed(String),
}

/// Pull-based supplier of successive BGR frames.
///
/// One call yields one frame; any error ends the consuming pipeline's
/// generator loop and releases the source.
pub trait FrameSource {
    fn capture_frame(&mut self) -> Result<BgrImage, CaptureError>;
}

/// Frame source over a pre-built in-memory frame sequence.
#[derive(Debug, Default)]
pub struct BufferedSource {
    frames: VecDeque<BgrImage>,
}

impl BufferedSource {
    pub fn new(frames: Vec<BgrImage>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// Remaining undelivered frames
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for BufferedSource {
    fn capture_frame(&mut self) -> Result<BgrImage, CaptureError> {
        self.frames.pop_front().ok_or(CaptureError::EndOfStream)
    }
}

/// Frame source decoding a directory of image files in lexicographic
/// order.
///
/// Decoded pixels are rearranged into the B,G,R channel order the
/// pipeline expects.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Scan a directory for frames.
    ///
    /// Every regular file is taken to be a decodable image; decode
    /// problems surface later, per frame, from `capture_frame`.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        debug!("frame sequence: {} files under {}", paths.len(), dir.display());
        Ok(Self {
            paths: paths.into(),
        })
    }
}

impl FrameSource for ImageSequenceSource {
    fn capture_frame(&mut self) -> Result<BgrImage, CaptureError> {
        let path = self.paths.pop_front().ok_or(CaptureError::EndOfStream)?;
        let decoded = image::open(&path)
            .map_err(|e| CaptureError::Failed(format!("{}: {e}", path.display())))?;
        Ok(rgb_image_to_bgr(&decoded.to_rgb8()))
    }
}

/// Repack an `image` crate RGB buffer into the (height, width, 3) BGR
/// array layout.
pub fn rgb_image_to_bgr(img: &image::RgbImage) -> BgrImage {
    let (width, height) = img.dimensions();
    let mut frame: BgrImage = Array3::zeros((height as usize, width as usize, 3));

    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = img.get_pixel(x, y).0;
            frame[[y as usize, x as usize, 0]] = b;
            frame[[y as usize, x as usize, 1]] = g;
            frame[[y as usize, x as usize, 2]] = r;
        }
    }

    frame
}

/// Repack a BGR array into an `image` crate RGB buffer for encoding.
pub fn bgr_to_rgb_image(frame: &BgrImage) -> image::RgbImage {
    let (rows, cols, _) = frame.dim();
    let mut img = image::RgbImage::new(cols as u32, rows as u32);

    for y in 0..rows {
        for x in 0..cols {
            let b = frame[[y, x, 0]];
            let g = frame[[y, x, 1]];
            let r = frame[[y, x, 2]];
            img.put_pixel(x as u32, y as u32, image::Rgb([r, g, b]));
        }
    }

    img
}
