//! Color value types and BGR to HSV conversion.
//!
//! Segmentation happens in hue/saturation/value space because color
//! similarity is easier to threshold there than in raw channel space.
//! The 8-bit convention used throughout is H in [0, 179] (degrees halved)
//! and S, V in [0, 255], matching the ranges the tracked-color
//! configuration is expressed in.

use crate::{BgrImage, HsvImage};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

/// Color painted on the canvas for one tracked object, in B,G,R order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintColor {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl PaintColor {
    pub fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    /// Channel values in storage order
    pub fn as_bgr(&self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// Inclusive lower/upper bounds over (hue, saturation, value).
///
/// A sample matches when every channel lies within its closed interval.
/// A degenerate range (lower above upper on any channel) matches nothing,
/// which is valid configuration, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lower (hue, saturation, value) bound; hue in [0, 179]
    pub lower: [u8; 3],
    /// Upper (hue, saturation, value) bound; hue in [0, 179]
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Range covering the entire HSV domain
    pub fn full() -> Self {
        Self {
            lower: [0, 0, 0],
            upper: [179, 255, 255],
        }
    }

    /// Inclusive membership test for one HSV sample
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.lower[0]
            && h <= self.upper[0]
            && s >= self.lower[1]
            && s <= self.upper[1]
            && v >= self.lower[2]
            && v <= self.upper[2]
    }
}

/// Convert a single BGR sample to (h, s, v) bytes.
///
/// Hue is degrees halved into [0, 179]; an achromatic sample (zero delta)
/// reports hue 0.
pub fn bgr_to_hsv_pixel(b: u8, g: u8, r: u8) -> (u8, u8, u8) {
    let bf = b as f32;
    let gf = g as f32;
    let rf = r as f32;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        let h = 60.0 * (gf - bf) / delta;
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };

    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };

    // hue is circular: rounding just under 360 degrees halves to 180,
    // which wraps back to 0
    let h = (h_deg / 2.0).round() as u16 % 180;
    (h as u8, s.round() as u8, max as u8)
}

/// Convert a BGR frame into its HSV representation.
///
/// Output shape matches the input; planes are (H, S, V) per pixel.
pub fn bgr_to_hsv(frame: &BgrImage) -> HsvImage {
    let (rows, cols, _) = frame.dim();
    let mut hsv = Array3::zeros((rows, cols, 3));

    for i in 0..rows {
        for j in 0..cols {
            let (h, s, v) =
                bgr_to_hsv_pixel(frame[[i, j, 0]], frame[[i, j, 1]], frame[[i, j, 2]]);
            hsv[[i, j, 0]] = h;
            hsv[[i, j, 1]] = s;
            hsv[[i, j, 2]] = v;
        }
    }

    hsv
}
