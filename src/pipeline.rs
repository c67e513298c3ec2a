//! Frame-by-frame tracking and painting pipeline.
//!
//! [`BrushPipeline`] owns a frame source and the persistent canvas, and
//! exposes the whole run as a pull-based iterator: nothing is captured or
//! processed until the consumer asks for the next frame. Each pull runs
//! every tracked color through segmentation, closing, edge detection,
//! contour tracing and centroid extraction, stamps a disc per detected
//! centroid, and yields the frame/canvas/composite triple.

use crate::canvas::PaintCanvas;
use crate::color::bgr_to_hsv;
use crate::config::{BrushConfig, ConfigError, ContourSelection, TrackedColor};
use crate::image_proc::{
    approx_polygon, centroid, close, edge_map, find_contours, in_range, resize_bilinear, Point,
};
use crate::image_size::ImageSize;
use crate::source::{CaptureError, FrameSource};
use crate::{BgrImage, HsvImage};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative stop signal for a running pipeline.
///
/// Clones share one flag; setting it from any thread makes the iterator
/// return `None` on its next pull instead of capturing another frame.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Output of one pipeline step.
#[derive(Debug, Clone)]
pub struct PaintedFrame {
    /// The captured frame, after rescaling
    pub frame: BgrImage,
    /// Snapshot of the persistent canvas after this frame's draws
    pub canvas: BgrImage,
    /// Canvas composited over the frame
    pub result: BgrImage,
}

/// The tracking-and-painting loop over a frame source.
pub struct BrushPipeline<S: FrameSource> {
    source: S,
    config: BrushConfig,
    canvas: Option<PaintCanvas>,
    cancel: CancelToken,
    frame_index: u64,
    finished: bool,
}

impl<S: FrameSource> BrushPipeline<S> {
    /// Build a pipeline over a source.
    ///
    /// The configuration is validated here, so a misconfigured pipeline
    /// fails before the first capture.
    pub fn new(source: S, config: BrushConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            "pipeline configured: {} tracked colors, kernel {}, brush radius {}",
            config.colors.len(),
            config.kernel_size,
            config.brush_radius
        );
        Ok(Self {
            source,
            config,
            canvas: None,
            cancel: CancelToken::new(),
            frame_index: 0,
            finished: false,
        })
    }

    /// Handle for stopping the run from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Canvas contents so far, once the first frame has been seen.
    pub fn canvas(&self) -> Option<&BgrImage> {
        self.canvas.as_ref().map(PaintCanvas::image)
    }

    /// Process one captured frame into an output triple.
    fn process(&mut self, frame: BgrImage) -> Option<PaintedFrame> {
        let frame = if self.config.scale_factor != 1.0 {
            resize_bilinear(&frame, self.config.scale_factor)
        } else {
            frame
        };

        let size = ImageSize::of_frame(&frame);
        if let Some(canvas) = &self.canvas {
            if canvas.size() != size {
                warn!(
                    "frame {} is {size}, canvas is {}; skipping frame",
                    self.frame_index,
                    canvas.size()
                );
                return None;
            }
        }

        let hsv = bgr_to_hsv(&frame);

        // Colors are independent until the draw, so detection fans out
        // across threads and only the canvas writes are serialized.
        let config = &self.config;
        let detections: Vec<(Option<Point>, TrackedColor)> = config
            .colors
            .par_iter()
            .map(|tracked| (detect(&hsv, tracked, config), *tracked))
            .collect();

        let canvas = self.canvas.get_or_insert_with(|| {
            info!("canvas initialized at {size}");
            PaintCanvas::new(size)
        });
        for (center, tracked) in detections {
            if let Some(center) = center {
                debug!(
                    "frame {}: centroid ({}, {}) for range {:?}",
                    self.frame_index, center.x, center.y, tracked.range
                );
                canvas.draw_disc(center, self.config.brush_radius, tracked.paint);
            }
        }

        let canvas_snapshot = canvas.image().clone();
        let result = canvas.composite_over(&frame);
        Some(PaintedFrame {
            frame,
            canvas: canvas_snapshot,
            result,
        })
    }
}

/// Locate one tracked color in a converted frame.
///
/// Runs the per-color detection chain and returns the brush position, or
/// `None` when no contour survives the area filter.
fn detect(hsv: &HsvImage, tracked: &TrackedColor, config: &BrushConfig) -> Option<Point> {
    let mask = in_range(hsv, &tracked.range);
    let closed = close(&mask, config.kernel_size);
    let edges = edge_map(&closed, config.edge_low, config.edge_high);

    let contours = find_contours(&edges);
    let mut survivors = contours
        .iter()
        .filter(|c| c.area() > config.min_contour_area);

    let chosen = match config.selection {
        ContourSelection::FirstTraced => survivors.next(),
        ContourSelection::LargestArea => {
            survivors.max_by(|a, b| a.area().total_cmp(&b.area()))
        }
    }?;

    let epsilon = config.approx_tolerance_factor * chosen.perimeter();
    let polygon = approx_polygon(&chosen.points, epsilon);
    Some(centroid(&polygon))
}

impl<S: FrameSource> Iterator for BrushPipeline<S> {
    type Item = PaintedFrame;

    fn next(&mut self) -> Option<PaintedFrame> {
        loop {
            if self.finished {
                return None;
            }
            if self.cancel.is_cancelled() {
                info!("pipeline cancelled after {} frames", self.frame_index);
                self.finished = true;
                return None;
            }

            let frame = match self.source.capture_frame() {
                Ok(frame) => frame,
                Err(CaptureError::EndOfStream) => {
                    info!("source exhausted after {} frames", self.frame_index);
                    self.finished = true;
                    return None;
                }
                Err(CaptureError::Failed(reason)) => {
                    warn!("capture failed, stopping pipeline: {reason}");
                    self.finished = true;
                    return None;
                }
            };

            self.frame_index += 1;
            // a size-mismatched frame is skipped, not terminal
            if let Some(output) = self.process(frame) {
                return Some(output);
            }
        }
    }
}
