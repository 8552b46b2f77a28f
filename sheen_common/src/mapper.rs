// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping device pixels into shader-local space.

use crate::kurbo::{Affine, Point, Vec2};

/// Transforms whose determinant is smaller than this are treated as singular.
const DEGENERATE_THRESHOLD: f64 = 1.0e-12;
/// We sample in the center of a pixel and not in its corner.
pub const PIXEL_CENTER_OFFSET: f64 = 0.5;

/// Maps device coordinates into the local coordinate space of a shader.
///
/// A mapper is created once per draw call from the forward (local to device) transform, which
/// is usually the canvas transform composed with the shader's own local transform. After that
/// it is a pure function and can be used from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMapper {
    inverse: Affine,
    x_advance: Vec2,
}

impl PositionMapper {
    /// Create a mapper for the given local-to-device transform.
    ///
    /// Returns `None` if the transform cannot be inverted, in which case nothing drawn with it
    /// would be visible anyway.
    pub fn new(transform: Affine) -> Option<Self> {
        let det = transform.determinant();
        if !det.is_finite() || det.abs() <= DEGENERATE_THRESHOLD {
            log::debug!("singular shader transform {transform:?}, skipping");
            return None;
        }

        Some(Self::from_inverse(transform.inverse()))
    }

    /// Create a mapper from an already inverted (device-to-local) transform.
    pub fn from_inverse(inverse: Affine) -> Self {
        // How far one step in the x direction moves in local space.
        let [a, b, _, _, _, _] = inverse.as_coeffs();

        Self {
            inverse,
            x_advance: Vec2::new(a, b),
        }
    }

    /// The device-to-local transform.
    #[inline]
    pub fn inverse(&self) -> Affine {
        self.inverse
    }

    /// The local-space distance covered by one pixel step in x.
    #[inline]
    pub fn x_advance(&self) -> Vec2 {
        self.x_advance
    }

    /// Map a device coordinate into local space.
    #[inline]
    pub fn map(&self, device: Point) -> Point {
        self.inverse * device
    }

    /// Map the center of the pixel at `(x, y)` into local space.
    #[inline]
    pub fn map_pixel(&self, x: i32, y: i32) -> Point {
        self.map(Point::new(
            f64::from(x) + PIXEL_CENTER_OFFSET,
            f64::from(y) + PIXEL_CENTER_OFFSET,
        ))
    }

    /// Local positions of the centers of `len` consecutive pixels starting at `(x, y)`.
    ///
    /// Every position is computed from the span start rather than accumulated, so the
    /// result does not depend on where a span begins.
    pub fn span(&self, x: i32, y: i32, len: usize) -> impl Iterator<Item = Point> + '_ {
        let start = self.map_pixel(x, y);
        (0..len).map(move |i| start + self.x_advance * i as f64)
    }
}
