// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color helpers.
//!
//! Colors are [`Color`]s (unpremultiplied sRGB with `f32` components). Every blend in this
//! workspace happens in unpremultiplied space and is clamped into `[0, 1]` before it leaves
//! a shader.

use crate::color::PremulRgba8;
use crate::peniko::Color;

/// Linearly interpolate two unpremultiplied colors, component by component.
///
/// `t == 0.0` returns `c0` and `t == 1.0` returns `c1` exactly.
#[inline]
pub fn lerp(c0: Color, c1: Color, t: f32) -> Color {
    let a = c0.components;
    let b = c1.components;
    let s = 1.0 - t;
    Color::new([
        a[0] * s + b[0] * t,
        a[1] * s + b[1] * t,
        a[2] * s + b[2] * t,
        a[3] * s + b[3] * t,
    ])
}

/// Clamp every component into `[0, 1]`. NaN components become `0`.
#[inline]
pub fn clamp(color: Color) -> Color {
    Color::new(color.components.map(|c| {
        // `f32::clamp` propagates NaN.
        if c.is_nan() { 0.0 } else { c.clamp(0.0, 1.0) }
    }))
}

/// Whether all four components are finite.
#[inline]
pub fn is_finite(color: Color) -> bool {
    color.components.iter().all(|c| c.is_finite())
}

/// Whether the color is fully opaque.
#[inline]
pub fn is_opaque(color: Color) -> bool {
    color.components[3] >= 1.0
}

/// Premultiply a color and quantize it to 8 bits per channel.
///
/// The color is clamped first, so out-of-range input never wraps around.
#[inline]
pub fn to_premul_rgba8(color: Color) -> PremulRgba8 {
    let [r, g, b, a] = clamp(color).components;
    // The value is in [0.5, 255.5) so it always fits in a u8.
    let quantize = |v: f32| (v * 255.0 + 0.5) as u8;
    PremulRgba8 {
        r: quantize(r * a),
        g: quantize(g * a),
        b: quantize(b * a),
        a: quantize(a),
    }
}
