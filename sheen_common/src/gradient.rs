// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color ramps for gradients.
//!
//! A [`Ramp`] maps a parameter `t` in `[0, 1]` to a color by interpolating between a sorted
//! list of [`GradientStop`]s. The geometric part of a gradient (projecting a point onto a line,
//! measuring an angle) lives in the shaders; they all end up sampling a ramp.

use smallvec::SmallVec;

use crate::error::ShaderError;
use crate::peniko::Color;
use crate::util::{clamp, is_finite, is_opaque, lerp};

/// A color at a position along a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// The position of the stop, in `[0, 1]`.
    pub offset: f32,
    /// The unpremultiplied color of the stop.
    pub color: Color,
}

impl GradientStop {
    /// Create a new stop.
    #[inline]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// An encoded range between two neighbouring stops.
#[derive(Debug, Clone, Copy)]
pub struct GradientRange {
    /// The start value of the range.
    pub x0: f32,
    /// The end value of the range.
    pub x1: f32,
    /// The color at `x0`.
    pub c0: Color,
    /// The color at `x1`.
    pub c1: Color,
}

impl GradientRange {
    /// Whether the range has zero width, i.e. it is a hard step to `c1`.
    #[inline]
    pub fn is_step(&self) -> bool {
        self.x1 <= self.x0
    }

    #[inline]
    fn eval(&self, t: f32) -> Color {
        if self.is_step() {
            return self.c1;
        }

        let frac = ((t - self.x0) / (self.x1 - self.x0)).clamp(0.0, 1.0);
        lerp(self.c0, self.c1, frac)
    }
}

/// A sampled color ramp with clamp ("pad") tiling.
#[derive(Debug, Clone)]
pub struct Ramp {
    ranges: SmallVec<[GradientRange; 4]>,
    opaque: bool,
}

impl Ramp {
    /// Create a ramp from sorted stops.
    ///
    /// The stops must number at least two, be sorted by offset, start at `0.0` and end at
    /// `1.0`. This is only checked in debug builds; use [`try_new`](Self::try_new) for
    /// untrusted input.
    pub fn new(stops: &[GradientStop]) -> Self {
        debug_assert!(
            validate(stops).is_ok(),
            "invalid gradient stops: {:?}",
            validate(stops)
        );

        // With fewer than two stops there is nothing to interpolate, but keep one
        // (degenerate) range so sampling never indexes out of bounds.
        let ranges: SmallVec<[GradientRange; 4]> = if stops.len() < 2 {
            let color = stops.first().map_or(Color::TRANSPARENT, |s| s.color);
            smallvec::smallvec![GradientRange {
                x0: 0.0,
                x1: 0.0,
                c0: color,
                c1: color,
            }]
        } else {
            stops
                .windows(2)
                .map(|pair| GradientRange {
                    x0: pair[0].offset,
                    x1: pair[1].offset,
                    c0: pair[0].color,
                    c1: pair[1].color,
                })
                .collect()
        };

        Self {
            opaque: !stops.is_empty() && stops.iter().all(|s| is_opaque(s.color)),
            ranges,
        }
    }

    /// Create a ramp from sorted stops, checking every precondition of [`new`](Self::new).
    pub fn try_new(stops: &[GradientStop]) -> Result<Self, ShaderError> {
        validate(stops)?;
        Ok(Self::new(stops))
    }

    /// Create a ramp from parallel color and offset arrays.
    pub fn from_positions(colors: &[Color], positions: &[f32]) -> Result<Self, ShaderError> {
        if positions.len() != colors.len() {
            return Err(ShaderError::LengthMismatch {
                what: "positions",
                expected: colors.len(),
                actual: positions.len(),
            });
        }

        let stops = colors
            .iter()
            .zip(positions)
            .map(|(&color, &offset)| GradientStop::new(offset, color))
            .collect::<SmallVec<[GradientStop; 8]>>();

        Self::try_new(&stops)
    }

    /// Create a ramp that distributes `colors` evenly over `[0, 1)` and blends the last color
    /// back into the first one at `1.0`.
    ///
    /// This is the ramp of a sweep gradient, whose parameter wraps around a full turn.
    pub fn evenly_wrapped(colors: &[Color]) -> Self {
        debug_assert!(!colors.is_empty(), "a wrapped ramp needs at least one color");

        let count = colors.len() as f32;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| GradientStop::new(i as f32 / count, color))
            .chain(colors.first().map(|&first| GradientStop::new(1.0, first)))
            .collect::<SmallVec<[GradientStop; 8]>>();

        Self::new(&stops)
    }

    /// The encoded ranges of this ramp.
    pub fn ranges(&self) -> &[GradientRange] {
        &self.ranges
    }

    /// Whether every color of the ramp is opaque.
    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    /// Sample the ramp at `t`, which is clamped to `[0, 1]` first.
    ///
    /// A zero-width range `[x, x]` acts as a hard step: any `t >= x` takes the color that
    /// follows the step.
    #[inline]
    pub fn sample(&self, t: f32) -> Color {
        // NaN can only come from degenerate geometry upstream; pin it to the start.
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let idx = self
            .ranges
            .partition_point(|r| r.x1 <= t)
            .min(self.ranges.len() - 1);

        clamp(self.ranges[idx].eval(t))
    }
}

fn validate(stops: &[GradientStop]) -> Result<(), ShaderError> {
    if stops.len() < 2 {
        return Err(ShaderError::TooFewColors {
            required: 2,
            actual: stops.len(),
        });
    }

    if stops
        .iter()
        .any(|s| !s.offset.is_finite() || !is_finite(s.color))
    {
        return Err(ShaderError::NonFinite("gradient stop"));
    }

    let first = stops[0].offset;
    let last = stops[stops.len() - 1].offset;
    if first != 0.0 || last != 1.0 || stops.windows(2).any(|w| w[0].offset > w[1].offset) {
        return Err(ShaderError::InvalidStopOffsets);
    }

    Ok(())
}
