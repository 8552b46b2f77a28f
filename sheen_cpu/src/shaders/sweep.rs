// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep gradients.

use core::f64::consts::TAU;

use sheen_common::error::ShaderError;
use sheen_common::gradient::Ramp;
use sheen_common::kurbo::{Affine, Point};
use sheen_common::peniko::Color;
use sheen_common::util::is_finite;

use crate::Shader;

/// A gradient that interpolates colors by angle around a center.
///
/// The colors are spread evenly over a full turn, counter-clockwise in a y-up coordinate
/// system (clockwise on a y-down canvas), starting with the first color at the start angle.
/// The last color blends back into the first one, so there is no seam.
///
/// Each of `n` colors owns a slice of `1/n` of the turn and sits at its start, so the last
/// color is reached at `(n - 1)/n` of the turn rather than at its end. With `[red, blue]` the
/// opposite side of the start is pure blue. To have the last color at the end of the turn,
/// and a hard seam at the start angle, end the list with a color close to the first one;
/// a list that starts and ends with the same color gives that color a double-width band.
#[derive(Debug, Clone)]
pub struct SweepGradientShader {
    center: Point,
    start_angle: f64,
    ramp: Ramp,
    transform: Affine,
}

impl SweepGradientShader {
    /// Create a new sweep gradient.
    ///
    /// At least two colors are needed. This is only checked in debug builds; use
    /// [`try_new`](Self::try_new) for untrusted input.
    pub fn new(center: Point, start_angle: f64, colors: &[Color]) -> Self {
        debug_assert!(colors.len() >= 2, "a sweep gradient needs two colors");

        log::debug!(
            "created sweep gradient at {center:?} with {} colors",
            colors.len()
        );

        Self {
            center,
            start_angle,
            ramp: Ramp::evenly_wrapped(colors),
            transform: Affine::IDENTITY,
        }
    }

    /// Create a new sweep gradient, checking the arguments first.
    pub fn try_new(center: Point, start_angle: f64, colors: &[Color]) -> Result<Self, ShaderError> {
        if colors.len() < 2 {
            return Err(ShaderError::TooFewColors {
                required: 2,
                actual: colors.len(),
            });
        }
        if !center.is_finite() {
            return Err(ShaderError::NonFinite("sweep center"));
        }
        if !start_angle.is_finite() {
            return Err(ShaderError::NonFinite("start angle"));
        }
        if colors.iter().any(|&c| !is_finite(c)) {
            return Err(ShaderError::NonFinite("gradient color"));
        }

        Ok(Self::new(center, start_angle, colors))
    }

    /// Place the shader's local space with `transform`.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// The center of the sweep.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The angle of the first color, in radians.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The position of `point` along the sweep, in `[0, 1)`.
    ///
    /// The center itself has no angle and maps to `0`.
    pub fn parameter(&self, point: Point) -> f64 {
        let d = point - self.center;
        if d.x == 0.0 && d.y == 0.0 {
            return 0.0;
        }

        let turn = (d.atan2() - self.start_angle).rem_euclid(TAU) / TAU;
        // `rem_euclid` can round up to exactly TAU.
        if turn >= 1.0 { 0.0 } else { turn }
    }
}

impl Shader for SweepGradientShader {
    fn is_opaque(&self) -> bool {
        self.ramp.is_opaque()
    }

    fn local_transform(&self) -> Affine {
        self.transform
    }

    fn color_at(&self, point: Point) -> Color {
        self.ramp.sample(self.parameter(point) as f32)
    }
}
