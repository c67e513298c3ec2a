//! Virtual paintbrush over a live color video stream.
//!
//! Tracks one or more colored objects frame-by-frame and accumulates a
//! drawing on a persistent canvas at each tracked object's centroid, then
//! overlays the canvas on the live frame. Per frame, each configured color
//! runs through the same chain:
//!
//! segmentation -> morphological closing -> edge map -> contour trace ->
//! polygon simplification -> moment centroid -> canvas draw
//!
//! after which the canvas is alpha-composited over the frame. The pipeline
//! is a pull-based iterator: each call to `next()` blocks on the frame
//! source, runs the compute stages, and yields a [`PaintedFrame`] triple.
//!
//! Frame acquisition, interactive range tuning and window display are
//! external collaborators; this crate only consumes a [`FrameSource`] and
//! yields images.

pub mod canvas;
pub mod color;
pub mod config;
pub mod image_proc;
pub mod image_size;
pub mod pipeline;
pub mod source;

pub use canvas::PaintCanvas;
pub use color::{HsvRange, PaintColor};
pub use config::{BrushConfig, ConfigError, ContourSelection, TrackedColor};
pub use image_size::ImageSize;
pub use pipeline::{BrushPipeline, CancelToken, PaintedFrame};
pub use source::{BufferedSource, CaptureError, FrameSource, ImageSequenceSource};

use ndarray::{Array2, Array3};

/// Three-channel 8-bit image in B,G,R channel order, shaped (height, width, 3).
pub type BgrImage = Array3<u8>;

/// Three-channel 8-bit image holding H (0-179), S and V (0-255) planes.
pub type HsvImage = Array3<u8>;

/// Single-channel binary mask; every sample is 0 or 255.
pub type Mask = Array2<u8>;
