//! Persistent drawing canvas and compositor.
//!
//! The canvas is the only state that survives across frames: an all-black
//! BGR buffer sized from the first captured frame, written exclusively
//! through [`PaintCanvas::draw_disc`], and never reset for the lifetime
//! of a pipeline run. Compositing is purely derived and recomputed every
//! frame.

use crate::color::PaintColor;
use crate::image_proc::Point;
use crate::image_size::ImageSize;
use crate::BgrImage;

/// Long-lived drawing surface with exclusive write access.
#[derive(Debug, Clone)]
pub struct PaintCanvas {
    pixels: BgrImage,
    size: ImageSize,
}

impl PaintCanvas {
    /// Create an all-black canvas with the given dimensions.
    pub fn new(size: ImageSize) -> Self {
        Self {
            pixels: size.empty_bgr(),
            size,
        }
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Current canvas contents.
    pub fn image(&self) -> &BgrImage {
        &self.pixels
    }

    /// Paint a filled disc centered at a tracked centroid.
    ///
    /// Pixels inside the radius are overwritten permanently; there is no
    /// erase. Discs overlapping the border are clipped.
    pub fn draw_disc(&mut self, center: Point, radius: usize, color: PaintColor) {
        let r = radius as i64;
        let r2 = r * r;
        let [b, g, rr] = color.as_bgr();

        let y_min = (center.y as i64 - r).max(0);
        let y_max = (center.y as i64 + r).min(self.size.height as i64 - 1);
        let x_min = (center.x as i64 - r).max(0);
        let x_max = (center.x as i64 + r).min(self.size.width as i64 - 1);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dy = y - center.y as i64;
                let dx = x - center.x as i64;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[[y as usize, x as usize, 0]] = b;
                    self.pixels[[y as usize, x as usize, 1]] = g;
                    self.pixels[[y as usize, x as usize, 2]] = rr;
                }
            }
        }
    }

    /// Alpha-blend the canvas over a live frame.
    ///
    /// A pixel counts as painted when the canvas intensity there exceeds
    /// 1; painted pixels show the canvas, everything else shows the
    /// frame: result = canvas + frame x (1 - alpha), saturating.
    pub fn composite_over(&self, frame: &BgrImage) -> BgrImage {
        let (rows, cols, _) = frame.dim();
        let mut result = frame.clone();

        for i in 0..rows {
            for j in 0..cols {
                let b = self.pixels[[i, j, 0]] as f64;
                let g = self.pixels[[i, j, 1]] as f64;
                let r = self.pixels[[i, j, 2]] as f64;
                let intensity = 0.299 * r + 0.587 * g + 0.114 * b;

                if intensity > 1.0 {
                    for c in 0..3 {
                        result[[i, j, c]] = self.pixels[[i, j, c]];
                    }
                } else {
                    for c in 0..3 {
                        result[[i, j, c]] =
                            frame[[i, j, c]].saturating_add(self.pixels[[i, j, c]]);
                    }
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn canvas_8x8() -> PaintCanvas {
        PaintCanvas::new(ImageSize::from_width_height(8, 8))
    }

    #[test]
    fn test_new_canvas_is_black() {
        let canvas = canvas_8x8();
        assert!(canvas.image().iter().all(|&v| v == 0));
        assert_eq!(canvas.size(), ImageSize::from_width_height(8, 8));
    }

    #[test]
    fn test_draw_disc_radius_one_paints_a_cross() {
        let mut canvas = canvas_8x8();
        canvas.draw_disc(Point::new(4, 3), 1, PaintColor::new(255, 0, 0));

        let painted: Vec<(usize, usize)> = (0..8)
            .flat_map(|i| (0..8).map(move |j| (i, j)))
            .filter(|&(i, j)| canvas.image()[[i, j, 0]] == 255)
            .collect();
        assert_eq!(painted, vec![(2, 4), (3, 3), (3, 4), (3, 5), (4, 4)]);
    }

    #[test]
    fn test_draw_disc_pixel_count_radius_five() {
        let mut canvas = PaintCanvas::new(ImageSize::from_width_height(20, 20));
        canvas.draw_disc(Point::new(10, 10), 5, PaintColor::new(0, 0, 255));
        let painted = canvas.image().iter().filter(|&&v| v == 255).count();
        assert_eq!(painted, 81);
    }

    #[test]
    fn test_draw_disc_clips_at_border() {
        let mut canvas = canvas_8x8();
        canvas.draw_disc(Point::new(0, 0), 3, PaintColor::new(0, 255, 0));
        // corner painted, nothing panics, far side untouched
        assert_eq!(canvas.image()[[0, 0, 1]], 255);
        assert_eq!(canvas.image()[[7, 7, 1]], 0);
    }

    #[test]
    fn test_blank_canvas_composites_to_frame() {
        let canvas = canvas_8x8();
        let mut frame: BgrImage = Array3::zeros((8, 8, 3));
        for (k, v) in frame.iter_mut().enumerate() {
            *v = (k % 251) as u8;
        }
        assert_eq!(canvas.composite_over(&frame), frame);
    }

    #[test]
    fn test_painted_pixels_replace_frame_content() {
        let mut canvas = canvas_8x8();
        canvas.draw_disc(Point::new(4, 4), 1, PaintColor::new(10, 20, 200));

        let frame: BgrImage = Array3::from_elem((8, 8, 3), 123);
        let result = canvas.composite_over(&frame);

        assert_eq!(
            (result[[4, 4, 0]], result[[4, 4, 1]], result[[4, 4, 2]]),
            (10, 20, 200)
        );
        // unpainted pixels pass the frame through
        assert_eq!(result[[0, 0, 0]], 123);
    }

    #[test]
    fn test_near_black_paint_falls_below_alpha_threshold() {
        // intensity of BGR (1,0,0) is 0.114, under the painted cutoff,
        // so the literal formula adds canvas to frame instead of
        // replacing it
        let mut canvas = canvas_8x8();
        canvas.draw_disc(Point::new(2, 2), 0, PaintColor::new(1, 0, 0));

        let frame: BgrImage = Array3::from_elem((8, 8, 3), 254);
        let result = canvas.composite_over(&frame);
        assert_eq!(result[[2, 2, 0]], 255);
        assert_eq!(result[[2, 2, 1]], 254);
    }
}
