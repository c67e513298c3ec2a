//! Contour extraction by border following.
//!
//! Implements Suzuki-Abe border following over a binary edge map: a
//! raster scan discovers border start points, each border is traced
//! through the 8-neighborhood, and traced pixels are marked so a border
//! is emitted exactly once. Hole borders are traced along with outer
//! borders and each contour carries its parent in the nesting hierarchy.
//! Contours are returned in raster-scan discovery order; the selection
//! policy downstream depends on that order.

use crate::Mask;
use itertools::Itertools;
use ndarray::Array2;
use std::collections::HashMap;

/// Integer pixel coordinate, x to the right and y down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One traced closed boundary curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Boundary pixels in trace order
    pub points: Vec<Point>,
    /// True for the border of a hole, false for an outer border
    pub is_hole: bool,
    /// Index of the enclosing contour, None at the top level
    pub parent: Option<usize>,
}

impl Contour {
    /// Enclosed area in square pixels (absolute shoelace sum).
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self
            .points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| (a.x as f64) * (b.y as f64) - (b.x as f64) * (a.y as f64))
            .sum();
        (twice / 2.0).abs()
    }

    /// Closed-loop perimeter: sum of consecutive point distances,
    /// including the closing segment.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        self.points
            .iter()
            .circular_tuple_windows()
            .map(|(a, b)| a.distance(b))
            .sum()
    }
}

/// 8-neighborhood offsets (dy, dx), clockwise starting east.
const DIRS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

fn dir_between(from: (isize, isize), to: (isize, isize)) -> usize {
    let delta = (to.0 - from.0, to.1 - from.1);
    DIRS.iter()
        .position(|&d| d == delta)
        .expect("points must be 8-adjacent")
}

fn value_at(f: &Array2<i32>, p: (isize, isize)) -> i32 {
    let (rows, cols) = f.dim();
    if p.0 < 0 || p.1 < 0 || p.0 >= rows as isize || p.1 >= cols as isize {
        0
    } else {
        f[[p.0 as usize, p.1 as usize]]
    }
}

/// Trace one border starting at `start`, whose neighbor `from` is the
/// zero pixel that triggered the scan. Marks visited pixels in `f` with
/// +/- `nbd` per the Suzuki-Abe rules.
fn follow_border(
    f: &mut Array2<i32>,
    start: (usize, usize),
    from: (isize, isize),
    nbd: i32,
) -> Vec<Point> {
    let start_pos = (start.0 as isize, start.1 as isize);

    // Clockwise scan around the start pixel for the first nonzero
    // neighbor.
    let init_dir = dir_between(start_pos, from);
    let mut first = None;
    for step in 1..=8 {
        let d = (init_dir + step) % 8;
        let candidate = (start_pos.0 + DIRS[d].0, start_pos.1 + DIRS[d].1);
        if value_at(f, candidate) != 0 {
            first = Some(candidate);
            break;
        }
    }

    let first = match first {
        Some(p) => p,
        None => {
            // isolated pixel
            f[[start.0, start.1]] = -nbd;
            return vec![Point::new(start_pos.1 as i32, start_pos.0 as i32)];
        }
    };

    let mut points = Vec::new();
    let mut prev = first;
    let mut current = start_pos;

    loop {
        // Counterclockwise scan around `current`, starting just past
        // `prev`, for the next border pixel. Track whether the east
        // neighbor was examined and found empty; that drives the -NBD
        // marking which stops re-detection of this border.
        let back_dir = dir_between(current, prev);
        let mut next = None;
        let mut east_was_empty = false;
        for step in 1..=8 {
            let d = (back_dir + 8 - step) % 8;
            let candidate = (current.0 + DIRS[d].0, current.1 + DIRS[d].1);
            let v = value_at(f, candidate);
            if v != 0 {
                next = Some(candidate);
                break;
            }
            if d == 0 {
                east_was_empty = true;
            }
        }
        // a traced border always has a nonzero neighbor (at worst `prev`)
        let next = next.expect("border pixel lost its neighborhood");

        let cell = &mut f[[current.0 as usize, current.1 as usize]];
        if east_was_empty {
            *cell = -nbd;
        } else if *cell == 1 {
            *cell = nbd;
        }
        points.push(Point::new(current.1 as i32, current.0 as i32));

        if next == start_pos && current == first {
            break;
        }
        prev = current;
        current = next;
    }

    points
}

/// Find all closed boundary curves in a binary edge map.
///
/// Returns outer and hole borders in raster-scan discovery order, each
/// with its parent contour index.
pub fn find_contours(edge: &Mask) -> Vec<Contour> {
    let (rows, cols) = edge.dim();
    let mut f: Array2<i32> = edge.mapv(|v| i32::from(v != 0));

    let mut contours: Vec<Contour> = Vec::new();
    // border number -> contour index; border 1 is the frame and has no
    // contour
    let mut border_index: HashMap<i32, usize> = HashMap::new();
    let mut nbd = 1;

    for i in 0..rows {
        let mut lnbd = 1;
        for j in 0..cols {
            let fij = f[[i, j]];
            if fij == 0 {
                continue;
            }

            let start = if fij == 1 && (j == 0 || f[[i, j - 1]] == 0) {
                // outer border start
                nbd += 1;
                Some(((i as isize, j as isize - 1), false))
            } else if fij >= 1 && (j + 1 == cols || f[[i, j + 1]] == 0) {
                // hole border start
                nbd += 1;
                if fij > 1 {
                    lnbd = fij;
                }
                Some(((i as isize, j as isize + 1), true))
            } else {
                None
            };

            if let Some((from, is_hole)) = start {
                let points = follow_border(&mut f, (i, j), from, nbd);
                let parent = border_index.get(&lnbd).map(|&idx| {
                    if contours[idx].is_hole == is_hole {
                        contours[idx].parent
                    } else {
                        Some(idx)
                    }
                });
                border_index.insert(nbd, contours.len());
                contours.push(Contour {
                    points,
                    is_hole,
                    parent: parent.flatten(),
                });
            }

            if f[[i, j]] != 1 {
                lnbd = f[[i, j]].abs();
            }
        }
    }

    contours
}
