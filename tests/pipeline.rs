//! End-to-end pipeline tests over synthetic frames.

use chromabrush::{
    BgrImage, BrushConfig, BrushPipeline, BufferedSource, ContourSelection, HsvRange, PaintColor,
    TrackedColor,
};
use ndarray::Array3;

const RED_RANGE: HsvRange = HsvRange {
    lower: [0, 100, 100],
    upper: [10, 255, 255],
};
const GREEN_RANGE: HsvRange = HsvRange {
    lower: [50, 100, 100],
    upper: [70, 255, 255],
};

fn black_frame(side: usize) -> BgrImage {
    Array3::zeros((side, side, 3))
}

/// Paint a solid BGR rectangle, rows and cols half-open.
fn fill_rect(frame: &mut BgrImage, rows: (usize, usize), cols: (usize, usize), bgr: [u8; 3]) {
    for i in rows.0..rows.1 {
        for j in cols.0..cols.1 {
            for c in 0..3 {
                frame[[i, j, c]] = bgr[c];
            }
        }
    }
}

fn tracker(range: HsvRange, paint: PaintColor) -> TrackedColor {
    TrackedColor { range, paint }
}

fn config(colors: Vec<TrackedColor>) -> BrushConfig {
    BrushConfig {
        colors,
        kernel_size: 3,
        brush_radius: 5,
        min_contour_area: 10.0,
        ..BrushConfig::default()
    }
}

/// Pixels where the canvas exactly matches a paint color.
fn painted_pixels(canvas: &BgrImage, paint: PaintColor) -> Vec<(usize, usize)> {
    let (rows, cols, _) = canvas.dim();
    let [b, g, r] = paint.as_bgr();
    (0..rows)
        .flat_map(|i| (0..cols).map(move |j| (i, j)))
        .filter(|&(i, j)| {
            canvas[[i, j, 0]] == b && canvas[[i, j, 1]] == g && canvas[[i, j, 2]] == r
        })
        .collect()
}

fn bbox_center(pixels: &[(usize, usize)]) -> (usize, usize) {
    let i_min = pixels.iter().map(|p| p.0).min().unwrap();
    let i_max = pixels.iter().map(|p| p.0).max().unwrap();
    let j_min = pixels.iter().map(|p| p.1).min().unwrap();
    let j_max = pixels.iter().map(|p| p.1).max().unwrap();
    ((i_min + i_max) / 2, (j_min + j_max) / 2)
}

#[test]
fn test_solid_color_frame_paints_disc_at_center() {
    let mut frame = black_frame(64);
    fill_rect(&mut frame, (0, 64), (0, 64), [0, 0, 255]);

    let paint = PaintColor::new(255, 255, 0);
    let mut pipeline = BrushPipeline::new(
        BufferedSource::new(vec![frame]),
        config(vec![tracker(RED_RANGE, paint)]),
    )
    .unwrap();

    let output = pipeline.next().unwrap();
    let painted = painted_pixels(&output.canvas, paint);

    // a fully interior radius-5 disc covers exactly 81 pixels
    assert_eq!(painted.len(), 81);
    let (ci, cj) = bbox_center(&painted);
    assert!((30..=33).contains(&ci), "disc row center was {ci}");
    assert!((30..=33).contains(&cj), "disc col center was {cj}");

    // the composite shows the canvas where painted, the frame elsewhere
    assert_eq!(
        (
            output.result[[ci, cj, 0]],
            output.result[[ci, cj, 1]],
            output.result[[ci, cj, 2]]
        ),
        (255, 255, 0)
    );
    assert_eq!(output.result[[0, 0, 2]], 255);
}

#[test]
fn test_two_colors_paint_independently() {
    let mut frame = black_frame(64);
    fill_rect(&mut frame, (8, 24), (8, 24), [0, 0, 255]);
    fill_rect(&mut frame, (40, 56), (40, 56), [0, 255, 0]);

    let red_paint = PaintColor::new(0, 0, 255);
    let green_paint = PaintColor::new(0, 255, 0);
    let mut pipeline = BrushPipeline::new(
        BufferedSource::new(vec![frame]),
        config(vec![
            tracker(RED_RANGE, red_paint),
            tracker(GREEN_RANGE, green_paint),
        ]),
    )
    .unwrap();

    let output = pipeline.next().unwrap();

    let red = painted_pixels(&output.canvas, red_paint);
    assert!(!red.is_empty());
    let (ri, rj) = bbox_center(&red);
    assert!((13..=18).contains(&ri) && (13..=18).contains(&rj));

    let green = painted_pixels(&output.canvas, green_paint);
    assert!(!green.is_empty());
    let (gi, gj) = bbox_center(&green);
    assert!((45..=50).contains(&gi) && (45..=50).contains(&gj));
}

#[test]
fn test_undetected_frame_leaves_canvas_unchanged() {
    let mut red_frame = black_frame(64);
    fill_rect(&mut red_frame, (0, 64), (0, 64), [0, 0, 255]);
    let empty = black_frame(64);

    let paint = PaintColor::new(255, 0, 255);
    let pipeline = BrushPipeline::new(
        BufferedSource::new(vec![red_frame, empty.clone()]),
        config(vec![tracker(RED_RANGE, paint)]),
    )
    .unwrap();

    let outputs: Vec<_> = pipeline.collect();
    assert_eq!(outputs.len(), 2);
    assert!(!painted_pixels(&outputs[0].canvas, paint).is_empty());
    // frame two detects nothing, so the canvas is byte-identical
    assert_eq!(outputs[1].canvas, outputs[0].canvas);
    // painted pixels still show through over the black frame
    let painted = painted_pixels(&outputs[1].canvas, paint);
    let (i, j) = painted[painted.len() / 2];
    assert_eq!(outputs[1].result[[i, j, 0]], 255);
    assert_eq!(outputs[1].result[[i, j, 2]], 255);
}

#[test]
fn test_canvas_accumulates_across_frames() {
    // the tracked blob moves; both positions end up painted
    let mut first = black_frame(64);
    fill_rect(&mut first, (8, 24), (8, 24), [0, 0, 255]);
    let mut second = black_frame(64);
    fill_rect(&mut second, (40, 56), (40, 56), [0, 0, 255]);

    let paint = PaintColor::new(0, 255, 255);
    let pipeline = BrushPipeline::new(
        BufferedSource::new(vec![first, second]),
        config(vec![tracker(RED_RANGE, paint)]),
    )
    .unwrap();

    let outputs: Vec<_> = pipeline.collect();
    assert_eq!(outputs.len(), 2);

    let after_first = painted_pixels(&outputs[0].canvas, paint).len();
    let after_second = painted_pixels(&outputs[1].canvas, paint);
    assert!(after_second.len() > after_first);

    // both blob neighborhoods carry paint
    assert!(after_second.iter().any(|&(i, j)| i < 24 && j < 24));
    assert!(after_second.iter().any(|&(i, j)| i >= 40 && j >= 40));
}

#[test]
fn test_contour_selection_policies_differ() {
    // small blob first in raster order, large blob below it
    let mut frame = black_frame(64);
    fill_rect(&mut frame, (4, 12), (4, 12), [0, 0, 255]);
    fill_rect(&mut frame, (32, 56), (32, 56), [0, 0, 255]);

    let paint = PaintColor::new(255, 255, 255);
    let first_traced = config(vec![tracker(RED_RANGE, paint)]);
    let largest_area = BrushConfig {
        selection: ContourSelection::LargestArea,
        ..first_traced.clone()
    };

    let mut by_order = BrushPipeline::new(
        BufferedSource::new(vec![frame.clone()]),
        first_traced,
    )
    .unwrap();
    let (oi, _) = bbox_center(&painted_pixels(&by_order.next().unwrap().canvas, paint));
    assert!(oi < 16, "trace-order pick should land on the top blob, got row {oi}");

    let mut by_area = BrushPipeline::new(BufferedSource::new(vec![frame]), largest_area).unwrap();
    let (ai, _) = bbox_center(&painted_pixels(&by_area.next().unwrap().canvas, paint));
    assert!(ai > 30, "largest-area pick should land on the big blob, got row {ai}");
}

#[test]
fn test_area_floor_rejects_small_blobs() {
    // a 4x4 blob traces a contour well under the default 100 px^2 floor
    let mut frame = black_frame(64);
    fill_rect(&mut frame, (20, 24), (20, 24), [0, 0, 255]);

    let paint = PaintColor::new(0, 0, 255);
    let cfg = BrushConfig {
        min_contour_area: 100.0,
        ..config(vec![tracker(RED_RANGE, paint)])
    };
    let mut pipeline = BrushPipeline::new(BufferedSource::new(vec![frame]), cfg).unwrap();

    let output = pipeline.next().unwrap();
    assert!(painted_pixels(&output.canvas, paint).is_empty());
}
