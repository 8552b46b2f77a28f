// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 4×5 matrices that transform unpremultiplied colors.

use core::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};

use crate::peniko::Color;
use crate::util::clamp;

/// A 4×5 matrix that transforms unpremultiplied colors.
///
/// The matrix is stored column by column. Each column holds the contribution of one input
/// term (red, green, blue, alpha and a constant 1) to the four output channels:
///
/// ```text
/// new_color = [0 4  8 12 16] [old.r]
///             [1 5  9 13 17] [old.g]
///             [2 6 10 14 18] [old.b]
///             [3 7 11 15 19] [old.a]
///                            [  1  ]
/// ```
///
/// so `new.r = M[0] * old.r + M[4] * old.g + M[8] * old.b + M[12] * old.a + M[16]`.
///
/// The result of [`apply`](Self::apply) is always clamped to `[0, 1]`, since a matrix with
/// large or negative coefficients can easily leave the legal range.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(transparent)]
pub struct ColorMatrix(pub [f32; 20]);

impl ColorMatrix {
    /// The matrix that leaves every color unchanged.
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
        0.0, 0.0, 0.0, 0.0,
    ]);

    /// Create a matrix from its 20 coefficients, in the column order documented on the type.
    pub const fn from_array(coeffs: [f32; 20]) -> Self {
        Self(coeffs)
    }

    /// Scale the red, green and blue channels by `s`, leaving alpha untouched.
    #[rustfmt::skip]
    pub const fn scale(s: f32) -> Self {
        Self([
              s, 0.0, 0.0, 0.0,
            0.0,   s, 0.0, 0.0,
            0.0, 0.0,   s, 0.0,
            0.0, 0.0, 0.0, 1.0,
            0.0, 0.0, 0.0, 0.0,
        ])
    }

    /// Replace red, green and blue by `1 - value`, leaving alpha untouched.
    pub fn invert() -> Self {
        let mut m = Self::scale(-1.0);
        m.0[16] = 1.0;
        m.0[17] = 1.0;
        m.0[18] = 1.0;
        m
    }

    /// Replace red, green and blue by the Rec. 601 luma of the color.
    #[rustfmt::skip]
    pub const fn grayscale() -> Self {
        const R: f32 = 0.299;
        const G: f32 = 0.587;
        const B: f32 = 0.114;
        Self([
              R,   R,   R, 0.0,
              G,   G,   G, 0.0,
              B,   B,   B, 0.0,
            0.0, 0.0, 0.0, 1.0,
            0.0, 0.0, 0.0, 0.0,
        ])
    }

    /// The coefficients, in the column order documented on the type.
    #[inline]
    pub fn as_array(&self) -> &[f32; 20] {
        &self.0
    }

    /// Whether this is exactly the identity matrix.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Whether the output alpha is guaranteed to be 1 whenever the input alpha is 1.
    ///
    /// That is the case if the alpha row ignores red, green and blue and maps an alpha of 1
    /// to at least 1.
    pub fn preserves_opacity(&self) -> bool {
        let m = &self.0;
        m[3] == 0.0 && m[7] == 0.0 && m[11] == 0.0 && m[15] + m[19] >= 1.0
    }

    /// Transform an unpremultiplied color, clamping the result to `[0, 1]`.
    #[inline]
    pub fn apply(&self, color: Color) -> Color {
        let m = &self.0;
        let [r, g, b, a] = color.components;
        let mut out = [0.0_f32; 4];

        for (k, channel) in out.iter_mut().enumerate() {
            *channel = m[k] * r + m[4 + k] * g + m[8 + k] * b + m[12 + k] * a + m[16 + k];
        }

        clamp(Color::new(out))
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 20]> for ColorMatrix {
    fn from(coeffs: [f32; 20]) -> Self {
        Self(coeffs)
    }
}

impl Index<usize> for ColorMatrix {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for ColorMatrix {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}
