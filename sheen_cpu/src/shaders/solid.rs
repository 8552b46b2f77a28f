// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solid colors.

use sheen_common::color::PremulRgba8;
use sheen_common::kurbo::Point;
use sheen_common::mapper::PositionMapper;
use sheen_common::peniko::Color;
use sheen_common::util::{clamp, is_opaque, to_premul_rgba8};

use crate::Shader;

/// A shader that paints a single color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct SolidShader {
    color: Color,
    premul: PremulRgba8,
}

impl SolidShader {
    /// Create a new solid shader. The color is clamped to `[0, 1]`.
    pub fn new(color: Color) -> Self {
        let color = clamp(color);
        Self {
            color,
            premul: to_premul_rgba8(color),
        }
    }

    /// The color of the shader.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Shader for SolidShader {
    fn is_opaque(&self) -> bool {
        is_opaque(self.color)
    }

    fn color_at(&self, _: Point) -> Color {
        self.color
    }

    fn shade_row(&self, _: &PositionMapper, _: i32, _: i32, row: &mut [PremulRgba8]) {
        row.fill(self.premul);
    }
}
