// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The factory surface that hands shaders and geometry to a canvas.

use std::sync::Arc;

use sheen_common::color_matrix::ColorMatrix;
use sheen_common::coons::CoonsPatch;
use sheen_common::error::ShaderError;
use sheen_common::kurbo::{BezPath, Point};
use sheen_common::peniko::Color;
use sheen_common::stroke::{PolygonStroker, DEFAULT_TOLERANCE};

use crate::shaders::{
    ColorMatrixShader, LinearPosGradientShader, SweepGradientShader, VoronoiShader,
};
use crate::{MeshCanvas, Shader};

/// A set of optional effects.
///
/// Every method has a default implementation that reports the effect as unavailable, by
/// returning `None` or by drawing nothing, so an implementation only overrides what it
/// supports. Callers should skip the draw when they get `None` back.
pub trait Effects {
    /// A shader that paints every point with the color of the nearest of `points`.
    ///
    /// `colors` holds one color per point.
    fn voronoi_shader(&self, _points: &[Point], _colors: &[Color]) -> Option<Arc<dyn Shader>> {
        None
    }

    /// A sweep gradient around `center` that starts with `colors[0]` at `start_radians` and
    /// spreads the colors evenly over a full turn.
    fn sweep_gradient(
        &self,
        _center: Point,
        _start_radians: f64,
        _colors: &[Color],
    ) -> Option<Arc<dyn Shader>> {
        None
    }

    /// A linear gradient from `p0` to `p1` with `colors[i]` placed at `pos[i]` along the line.
    ///
    /// `pos` starts at `0.0`, ends at `1.0` and never decreases. Points beyond the ends take
    /// the color of the nearest end.
    fn linear_pos_gradient(
        &self,
        _p0: Point,
        _p1: Point,
        _colors: &[Color],
        _pos: &[f32],
    ) -> Option<Arc<dyn Shader>> {
        None
    }

    /// A shader that transforms the unpremultiplied colors of `shader` by `matrix`.
    fn color_matrix_shader(
        &self,
        _matrix: &ColorMatrix,
        _shader: Arc<dyn Shader>,
    ) -> Option<Arc<dyn Shader>> {
        None
    }

    /// A path that, filled with the non-zero rule, looks like a stroke of the polygon
    /// through `points` with round joins and caps.
    fn stroke_polygon(&self, _points: &[Point], _width: f64, _is_closed: bool) -> Option<BezPath> {
        None
    }

    /// Draw the Coons patch bounded by the quadratic curves in `pts` as a mesh with `level`
    /// cells per side, textured with `paint` using the corner texture coordinates `tex`.
    ///
    /// See [`CoonsPatch`] for the order of the control points.
    fn draw_quadratic_coons<C: MeshCanvas + ?Sized>(
        &self,
        _canvas: &mut C,
        _pts: &[Point; 8],
        _tex: &[Point; 4],
        _level: u32,
        _paint: &C::Paint,
    ) where
        Self: Sized,
    {
    }
}

/// Settings for [`CpuEffects`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSettings {
    /// The maximum distance between a round join or cap and its flattened approximation.
    pub tolerance: f64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// The CPU implementation of every effect.
///
/// Arguments that break a documented precondition are logged and produce `None`.
#[derive(Debug, Clone, Default)]
pub struct CpuEffects {
    settings: EffectSettings,
    stroker: PolygonStroker,
}

impl CpuEffects {
    /// Create a new set of effects.
    pub fn new(settings: EffectSettings) -> Self {
        Self {
            stroker: PolygonStroker::new(settings.tolerance),
            settings,
        }
    }

    /// The settings this was created with.
    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }
}

fn share<S: Shader + 'static>(
    kind: &str,
    shader: Result<S, ShaderError>,
) -> Option<Arc<dyn Shader>> {
    match shader {
        Ok(shader) => Some(Arc::new(shader)),
        Err(e) => {
            log::warn!("cannot create {kind}: {e}");
            None
        }
    }
}

impl Effects for CpuEffects {
    fn voronoi_shader(&self, points: &[Point], colors: &[Color]) -> Option<Arc<dyn Shader>> {
        share("voronoi shader", VoronoiShader::try_new(points, colors))
    }

    fn sweep_gradient(
        &self,
        center: Point,
        start_radians: f64,
        colors: &[Color],
    ) -> Option<Arc<dyn Shader>> {
        share(
            "sweep gradient",
            SweepGradientShader::try_new(center, start_radians, colors),
        )
    }

    fn linear_pos_gradient(
        &self,
        p0: Point,
        p1: Point,
        colors: &[Color],
        pos: &[f32],
    ) -> Option<Arc<dyn Shader>> {
        share(
            "positioned linear gradient",
            LinearPosGradientShader::try_new(p0, p1, colors, pos),
        )
    }

    fn color_matrix_shader(
        &self,
        matrix: &ColorMatrix,
        shader: Arc<dyn Shader>,
    ) -> Option<Arc<dyn Shader>> {
        share(
            "color matrix shader",
            ColorMatrixShader::try_new(*matrix, shader),
        )
    }

    fn stroke_polygon(&self, points: &[Point], width: f64, is_closed: bool) -> Option<BezPath> {
        let path = self.stroker.stroke(points, width, is_closed);
        // The stroker has already logged why it produced nothing.
        (!path.elements().is_empty()).then_some(path)
    }

    fn draw_quadratic_coons<C: MeshCanvas + ?Sized>(
        &self,
        canvas: &mut C,
        pts: &[Point; 8],
        tex: &[Point; 4],
        level: u32,
        paint: &C::Paint,
    ) {
        if pts.iter().chain(tex).any(|p| !p.is_finite()) {
            log::warn!("coons patch has non-finite control points, skipping");
            return;
        }

        crate::draw_quadratic_coons(canvas, &CoonsPatch::new(*pts, *tex), level, paint);
    }
}
