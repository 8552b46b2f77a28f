// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear gradients with positioned color stops.

use sheen_common::error::ShaderError;
use sheen_common::gradient::{GradientStop, Ramp};
use sheen_common::kurbo::{Affine, Point, Vec2};
use sheen_common::peniko::Color;
use sheen_common::util::clamp;

use crate::Shader;

/// Lines shorter than this are treated as a single point.
const DEGENERATE_THRESHOLD: f64 = 1.0e-12;

/// A linear gradient whose colors sit at arbitrary positions along the line.
///
/// `color[i]` is placed at `p0 + pos[i] * (p1 - p0)`. Points beyond either end take the
/// color at that end.
///
/// Repeated positions are hard steps, and a point exactly on a step takes the color after
/// it. That includes `p0` itself: with `pos = [0.0, 0.0, 1.0]`, `p0` and everything before
/// it is `color[1]`, and `color[0]` is never visible.
#[derive(Debug, Clone)]
pub struct LinearPosGradientShader {
    p0: Point,
    p1: Point,
    // (p1 - p0) / |p1 - p0|², or `None` if the line has no length.
    scaled_dir: Option<Vec2>,
    ramp: Ramp,
    first: Color,
    transform: Affine,
}

impl LinearPosGradientShader {
    /// Create a new gradient.
    ///
    /// There must be at least two colors and one position per color. Positions must start
    /// at `0.0`, end at `1.0` and never decrease. This is only checked in debug builds; use
    /// [`try_new`](Self::try_new) for untrusted input.
    pub fn new(p0: Point, p1: Point, colors: &[Color], positions: &[f32]) -> Self {
        let ramp = Ramp::from_positions(colors, positions);
        debug_assert!(ramp.is_ok(), "invalid gradient: {:?}", ramp.as_ref().err());

        // In release builds, fall back to spreading the colors evenly.
        let ramp = ramp.unwrap_or_else(|_| even_ramp(colors));
        Self::from_ramp(p0, p1, ramp, colors.first().copied())
    }

    /// Create a new gradient, checking the arguments first.
    pub fn try_new(
        p0: Point,
        p1: Point,
        colors: &[Color],
        positions: &[f32],
    ) -> Result<Self, ShaderError> {
        if !p0.is_finite() || !p1.is_finite() {
            return Err(ShaderError::NonFinite("gradient endpoint"));
        }

        let ramp = Ramp::from_positions(colors, positions)?;
        Ok(Self::from_ramp(p0, p1, ramp, colors.first().copied()))
    }

    fn from_ramp(p0: Point, p1: Point, ramp: Ramp, first: Option<Color>) -> Self {
        let dir = p1 - p0;
        let len_sq = dir.hypot2();
        let scaled_dir = if len_sq > DEGENERATE_THRESHOLD {
            Some(dir / len_sq)
        } else {
            log::debug!("linear gradient from {p0:?} to {p1:?} has no length");
            None
        };

        log::debug!(
            "created positioned linear gradient with {} segments",
            ramp.ranges().len()
        );

        Self {
            p0,
            p1,
            scaled_dir,
            ramp,
            first: clamp(first.unwrap_or(Color::TRANSPARENT)),
            transform: Affine::IDENTITY,
        }
    }

    /// Place the shader's local space with `transform`.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// The start and end point of the gradient line.
    pub fn line(&self) -> (Point, Point) {
        (self.p0, self.p1)
    }

    /// The unclamped position of `point` along the line, `0` at `p0` and `1` at `p1`.
    ///
    /// Returns `None` if the gradient line has no length.
    pub fn parameter(&self, point: Point) -> Option<f64> {
        self.scaled_dir.map(|dir| (point - self.p0).dot(dir))
    }
}

impl Shader for LinearPosGradientShader {
    fn is_opaque(&self) -> bool {
        self.ramp.is_opaque()
    }

    fn local_transform(&self) -> Affine {
        self.transform
    }

    fn color_at(&self, point: Point) -> Color {
        match self.parameter(point) {
            Some(t) => self.ramp.sample(t as f32),
            None => self.first,
        }
    }
}

fn even_ramp(colors: &[Color]) -> Ramp {
    if colors.len() < 2 {
        let color = colors.first().copied().unwrap_or(Color::TRANSPARENT);
        return Ramp::new(&[GradientStop::new(0.0, color), GradientStop::new(1.0, color)]);
    }

    let last = (colors.len() - 1) as f32;
    let stops = colors
        .iter()
        .enumerate()
        .map(|(i, &color)| GradientStop::new(i as f32 / last, color))
        .collect::<Vec<_>>();
    Ramp::new(&stops)
}
