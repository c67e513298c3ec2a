//! Pipeline configuration.
//!
//! All tunable behavior lives here: the ordered list of tracked colors and
//! the scalar knobs for every stage. Configuration is validated once, at
//! pipeline construction, so bad values surface before any frame is pulled.

use crate::color::{HsvRange, PaintColor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tracked color: the HSV range that detects it and the color it
/// paints with.
///
/// Keeping range and paint in one record means a ranges/colors length
/// mismatch cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedColor {
    /// Detection bounds in HSV space
    pub range: HsvRange,
    /// Brush color in B,G,R order
    pub paint: PaintColor,
}

/// Policy for choosing one contour when several survive the area filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContourSelection {
    /// First surviving curve in trace order. The pick is a function of
    /// raster enumeration order rather than blob size.
    #[default]
    FirstTraced,
    /// Largest enclosed area among the survivors.
    LargestArea,
}

/// Full pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Tracked colors, processed independently every frame
    pub colors: Vec<TrackedColor>,

    /// Uniform scale applied to every captured frame before processing
    pub scale_factor: f64,

    /// Radius of the filled disc drawn at each detected centroid, in pixels
    pub brush_radius: usize,

    /// Side length of the square all-ones closing kernel. Larger kernels
    /// merge nearby blobs, a tunable tradeoff.
    pub kernel_size: usize,

    /// Lower hysteresis threshold for the edge detector
    pub edge_low: f64,

    /// Upper hysteresis threshold for the edge detector
    pub edge_high: f64,

    /// Noise floor: traced curves with enclosed area at or below this many
    /// square pixels are discarded
    pub min_contour_area: f64,

    /// Polygon simplification tolerance as a fraction of contour perimeter
    pub approx_tolerance_factor: f64,

    /// Which surviving contour becomes the candidate for a color
    pub selection: ContourSelection,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            scale_factor: 1.0,
            brush_radius: 8,
            kernel_size: 30,
            edge_low: 100.0,
            edge_high: 200.0,
            min_contour_area: 100.0,
            approx_tolerance_factor: 0.02,
            selection: ContourSelection::FirstTraced,
        }
    }
}

impl BrushConfig {
    /// Validate every scalar parameter and the tracked-color list.
    ///
    /// Called by the pipeline constructor; a failed check means no frame is
    /// ever pulled from the source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::NoTrackedColors);
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConfigError::InvalidScaleFactor {
                value: self.scale_factor,
            });
        }
        if self.brush_radius == 0 {
            return Err(ConfigError::ZeroBrushRadius);
        }
        if self.kernel_size == 0 {
            return Err(ConfigError::ZeroKernelSize);
        }
        if !(self.edge_low.is_finite()
            && self.edge_high.is_finite()
            && self.edge_low > 0.0
            && self.edge_low < self.edge_high)
        {
            return Err(ConfigError::InvalidEdgeThresholds {
                low: self.edge_low,
                high: self.edge_high,
            });
        }
        if !(self.approx_tolerance_factor.is_finite() && self.approx_tolerance_factor > 0.0) {
            return Err(ConfigError::InvalidToleranceFactor {
                value: self.approx_tolerance_factor,
            });
        }
        Ok(())
    }
}

/// Configuration errors reported before any frame is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no tracked colors configured; the pipeline would never paint")]
    NoTrackedColors,

    #[error("scale factor must be finite and positive, got {value}")]
    InvalidScaleFactor { value: f64 },

    #[error("brush radius must be at least 1 pixel")]
    ZeroBrushRadius,

    #[error("morphology kernel size must be at least 1 pixel")]
    ZeroKernelSize,

    #[error("edge thresholds must satisfy 0 < low < high, got {low}/{high}")]
    InvalidEdgeThresholds { low: f64, high: f64 },

    #[error("polygon tolerance factor must be finite and positive, got {value}")]
    InvalidToleranceFactor { value: f64 },
}
