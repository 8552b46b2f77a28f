// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Converting polygons into fillable stroke outlines.
//!
//! The outline is assembled from independent closed pieces: one quad per segment, a circular
//! wedge on the outer side of every join and a half disc for every cap. All pieces are emitted
//! with the same orientation, so filling the result with the non-zero rule unions them into
//! the stroke. Overlaps and self-intersections are left for the fill rule to resolve.

use crate::kurbo::{Arc, BezPath, Point, Vec2};
use core::f64::consts::{PI, TAU};

/// The default tolerance used when flattening round joins and caps.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Segments shorter than this are treated as zero-length and skipped.
const MIN_SEGMENT_LENGTH: f64 = 1.0e-9;
/// Turns smaller than this (in radians) don't need a join.
const MIN_TURN_ANGLE: f64 = 1.0e-9;

/// Builds stroke outlines of polygons with round joins and caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStroker {
    tolerance: f64,
}

impl Default for PolygonStroker {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl PolygonStroker {
    /// Create a stroker that approximates arcs within `tolerance`.
    ///
    /// A non-finite or non-positive tolerance falls back to [`DEFAULT_TOLERANCE`].
    pub fn new(tolerance: f64) -> Self {
        if tolerance.is_finite() && tolerance > 0.0 {
            Self { tolerance }
        } else {
            log::warn!("invalid stroke tolerance {tolerance}, using {DEFAULT_TOLERANCE}");
            Self::default()
        }
    }

    /// The tolerance used for round joins and caps.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Build the outline of a stroke of `width`, centered on the edges of `points`.
    ///
    /// If `closed` is true the last point connects back to the first one and the outline has
    /// no caps; otherwise both ends get round caps. Consecutive duplicate points are merged.
    ///
    /// The returned path is meant to be filled with the non-zero fill rule. It is empty if
    /// fewer than two points are given or if `width` is not a positive, finite number.
    pub fn stroke(&self, points: &[Point], width: f64, closed: bool) -> BezPath {
        let mut path = BezPath::new();

        if points.len() < 2 {
            log::warn!("cannot stroke a polygon with {} points", points.len());
            return path;
        }
        if !width.is_finite() || width <= 0.0 {
            log::warn!("cannot stroke a polygon with width {width}");
            return path;
        }
        if points.iter().any(|p| !p.is_finite()) {
            log::warn!("polygon contains non-finite points, ignoring it");
            return path;
        }

        let half_width = width * 0.5;
        let pts = dedup(points, closed);

        if let [center] = pts[..] {
            // Everything collapsed into a single point, which looks like a dot when stroked
            // with round caps.
            self.push_disc(&mut path, center, half_width);
            return path;
        }

        let n = pts.len();
        let segment_count = if closed { n } else { n - 1 };
        let dirs = (0..segment_count)
            .map(|i| (pts[(i + 1) % n] - pts[i]).normalize())
            .collect::<Vec<_>>();

        for (i, dir) in dirs.iter().enumerate() {
            let offset = dir.turn_90() * half_width;
            let (a, b) = (pts[i], pts[(i + 1) % n]);

            path.move_to(a + offset);
            path.line_to(b + offset);
            path.line_to(b - offset);
            path.line_to(a - offset);
            path.close_path();
        }

        if closed {
            for i in 0..n {
                let incoming = dirs[(i + segment_count - 1) % segment_count];
                self.push_join(&mut path, pts[i], incoming, dirs[i], half_width);
            }
        } else {
            for i in 1..n - 1 {
                self.push_join(&mut path, pts[i], dirs[i - 1], dirs[i], half_width);
            }

            let first = dirs[0];
            let last = dirs[segment_count - 1];
            // The start cap bulges backwards, the end cap forwards.
            self.push_cap(&mut path, pts[0], -first.turn_90() * half_width);
            self.push_cap(&mut path, pts[n - 1], last.turn_90() * half_width);
        }

        log::trace!(
            "stroked {} points (closed: {closed}) into {} path elements",
            points.len(),
            path.elements().len()
        );

        path
    }

    /// Add the wedge filling the outer side of the turn from `d0` to `d1` at `vertex`.
    fn push_join(&self, path: &mut BezPath, vertex: Point, d0: Vec2, d1: Vec2, radius: f64) {
        let cross = d0.cross(d1);
        let turn = cross.atan2(d0.dot(d1));
        if turn.abs() < MIN_TURN_ANGLE {
            return;
        }

        // Every piece is swept clockwise (negative angles). For a clockwise turn the outer
        // side is the left one, and we can go from the incoming offset to the outgoing one.
        // For a counter-clockwise turn the outer side is the right one, and we go backwards
        // from the outgoing offset to the incoming one. A full reversal (`cross == 0`) takes
        // the first branch and produces a half disc.
        let (start, sweep) = if cross <= 0.0 {
            (d0.turn_90() * radius, -turn.abs())
        } else {
            (-d1.turn_90() * radius, -turn)
        };

        path.move_to(vertex);
        path.line_to(vertex + start);
        self.push_arc(path, vertex, start, sweep);
        path.close_path();
    }

    /// Add a half disc at `center`, starting at `center + start` and bulging to its right.
    fn push_cap(&self, path: &mut BezPath, center: Point, start: Vec2) {
        path.move_to(center + start);
        self.push_arc(path, center, start, -PI);
        path.close_path();
    }

    fn push_disc(&self, path: &mut BezPath, center: Point, radius: f64) {
        let start = Vec2::new(radius, 0.0);
        path.move_to(center + start);
        self.push_arc(path, center, start, -TAU);
        path.close_path();
    }

    /// Continue `path` (currently at `center + start`) with a circular arc of `sweep` radians.
    fn push_arc(&self, path: &mut BezPath, center: Point, start: Vec2, sweep: f64) {
        let radius = start.length();
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: start.atan2(),
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        path.extend(arc.append_iter(self.tolerance));
    }
}

/// Build the outline of a stroke with the default tolerance.
///
/// See [`PolygonStroker::stroke`].
pub fn stroke_polygon(points: &[Point], width: f64, closed: bool) -> BezPath {
    PolygonStroker::default().stroke(points, width, closed)
}

/// Remove consecutive duplicates, including a closing point equal to the first one.
fn dedup(points: &[Point], closed: bool) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        match pts.last() {
            Some(&last) if (p - last).hypot() <= MIN_SEGMENT_LENGTH => {}
            _ => pts.push(p),
        }
    }

    if closed {
        while pts.len() > 1 && (pts[pts.len() - 1] - pts[0]).hypot() <= MIN_SEGMENT_LENGTH {
            pts.pop();
        }
    }

    if pts.len() < points.len() {
        log::debug!(
            "dropped {} zero-length segments while stroking",
            points.len() - pts.len()
        );
    }

    pts
}
