//! Per-frame image processing stages.
//!
//! Each submodule is one stage of the tracking chain, pure and stateless:
//! color segmentation, morphological mask cleanup, edge detection, contour
//! tracing, and polygon simplification with moment centroiding. The
//! pipeline wires them together once per color per frame.

pub mod contour;
pub mod edges;
pub mod morphology;
pub mod polygon;
pub mod resize;
pub mod segment;

// Re-export key functionality for easier access
pub use contour::{find_contours, Contour, Point};
pub use edges::edge_map;
pub use morphology::close;
pub use polygon::{approx_polygon, centroid, raw_moments, RawMoments};
pub use resize::resize_bilinear;
pub use segment::in_range;
