// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A shader that filters another shader's colors through a color matrix.

use sheen_common::color_matrix::ColorMatrix;
use sheen_common::error::ShaderError;
use sheen_common::kurbo::{Affine, Point};
use sheen_common::peniko::Color;

use crate::Shader;

/// A shader that transforms the colors of another shader with a [`ColorMatrix`].
///
/// The wrapped shader is queried in its own local space, so wrapping it doesn't move it.
/// `S` decides how the wrapped shader is held: `&dyn Shader` borrows it, while
/// `Arc<dyn Shader>` shares it.
#[derive(Debug, Clone)]
pub struct ColorMatrixShader<S> {
    matrix: ColorMatrix,
    inner: S,
}

impl<S: Shader> ColorMatrixShader<S> {
    /// Wrap `inner`, transforming its colors by `matrix`.
    pub fn new(matrix: ColorMatrix, inner: S) -> Self {
        debug_assert!(matrix.is_finite(), "color matrix must be finite");

        log::debug!(
            "created color matrix shader (identity: {})",
            matrix.is_identity()
        );

        Self { matrix, inner }
    }

    /// Wrap `inner`, rejecting matrices with non-finite coefficients.
    pub fn try_new(matrix: ColorMatrix, inner: S) -> Result<Self, ShaderError> {
        if !matrix.is_finite() {
            return Err(ShaderError::NonFinite("color matrix"));
        }

        Ok(Self::new(matrix, inner))
    }

    /// The matrix applied to the colors.
    pub fn matrix(&self) -> &ColorMatrix {
        &self.matrix
    }

    /// The wrapped shader.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Shader> Shader for ColorMatrixShader<S> {
    fn is_opaque(&self) -> bool {
        self.inner.is_opaque() && self.matrix.preserves_opacity()
    }

    fn local_transform(&self) -> Affine {
        self.inner.local_transform()
    }

    fn color_at(&self, point: Point) -> Color {
        self.matrix.apply(self.inner.color_at(point))
    }
}

#[cfg(test)]
mod tests {
    use super::ColorMatrixShader;
    use crate::shaders::{SolidShader, SweepGradientShader};
    use crate::Shader;
    use sheen_common::color::palette::css::{BLUE, RED, WHITE};
    use sheen_common::color_matrix::ColorMatrix;
    use sheen_common::error::ShaderError;
    use sheen_common::kurbo::{Affine, Point};
    use sheen_common::peniko::Color;
    use std::sync::Arc;

    #[test]
    fn identity_reproduces_the_wrapped_shader() {
        let sweep = SweepGradientShader::new(Point::new(10.0, 10.0), 0.3, &[RED, BLUE, WHITE]);
        let wrapped = ColorMatrixShader::new(ColorMatrix::IDENTITY, &sweep);

        for i in 0..32 {
            let p = Point::new(f64::from(i) * 0.7, 20.0 - f64::from(i));
            assert_eq!(wrapped.color_at(p).components, sweep.color_at(p).components);
        }
        assert_eq!(wrapped.is_opaque(), sweep.is_opaque());
    }

    #[test]
    fn shares_the_local_transform() {
        let transform = Affine::translate((5.0, -2.0)) * Affine::rotate(0.4);
        let sweep = SweepGradientShader::new(Point::ORIGIN, 0.0, &[RED, BLUE])
            .with_transform(transform);
        let wrapped = ColorMatrixShader::new(ColorMatrix::grayscale(), &sweep);

        assert_eq!(wrapped.local_transform(), transform);
    }

    #[test]
    fn doubling_clamps_to_one() {
        let inner = SolidShader::new(Color::new([0.8, 0.2, 0.4, 1.0]));
        let shader = ColorMatrixShader::new(ColorMatrix::scale(2.0), inner);

        let out = shader.color_at(Point::ORIGIN).components;
        assert_eq!(out[0], 1.0);
        assert!((out[1] - 0.4).abs() < 1e-6);
        assert!((out[2] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn alpha_changes_clear_opacity() {
        let mut m = ColorMatrix::IDENTITY;
        m[15] = 0.5;
        let shader = ColorMatrixShader::new(m, SolidShader::new(RED));

        assert!(!shader.is_opaque());
        assert_eq!(shader.color_at(Point::ORIGIN).components[3], 0.5);
    }

    #[test]
    fn nests_and_shares() {
        let inner: Arc<dyn Shader> = Arc::new(SolidShader::new(WHITE));
        let once = ColorMatrixShader::new(ColorMatrix::invert(), inner.clone());
        let twice = ColorMatrixShader::new(ColorMatrix::invert(), &once);

        assert_eq!(once.color_at(Point::ORIGIN).components, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(twice.color_at(Point::ORIGIN).components, WHITE.components);
        assert_eq!(Arc::strong_count(&inner), 2);
    }

    #[test]
    fn non_finite_matrix_is_rejected() {
        let mut m = ColorMatrix::IDENTITY;
        m[4] = f32::NAN;
        assert_eq!(
            ColorMatrixShader::try_new(m, SolidShader::new(RED)).unwrap_err(),
            ShaderError::NonFinite("color matrix")
        );
    }
}
