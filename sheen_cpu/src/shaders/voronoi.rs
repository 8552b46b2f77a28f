// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Voronoi diagrams.

use sheen_common::error::ShaderError;
use sheen_common::kurbo::{Affine, Point};
use sheen_common::peniko::Color;
use sheen_common::util::{clamp, is_finite, is_opaque};

use crate::Shader;

/// A site of a Voronoi diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    /// The position of the seed.
    pub point: Point,
    /// The color of every point closer to this seed than to any other.
    pub color: Color,
}

/// A shader that paints every point with the color of its nearest seed.
///
/// When several seeds are equally close, the one that was passed first wins.
#[derive(Debug, Clone)]
pub struct VoronoiShader {
    seeds: Vec<Seed>,
    transform: Affine,
    opaque: bool,
}

impl VoronoiShader {
    /// Create a shader from parallel arrays of seed points and colors.
    ///
    /// There must be at least one seed and as many colors as points. This is only checked
    /// in debug builds; use [`try_new`](Self::try_new) for untrusted input.
    pub fn new(points: &[Point], colors: &[Color]) -> Self {
        debug_assert!(!points.is_empty(), "a voronoi shader needs at least one seed");
        debug_assert_eq!(points.len(), colors.len(), "one color per seed");

        Self::from_seeds(
            points
                .iter()
                .zip(colors)
                .map(|(&point, &color)| Seed { point, color }),
        )
    }

    /// Create a shader, checking the arguments first.
    pub fn try_new(points: &[Point], colors: &[Color]) -> Result<Self, ShaderError> {
        if points.is_empty() {
            return Err(ShaderError::TooFewSeeds);
        }
        if colors.len() != points.len() {
            return Err(ShaderError::LengthMismatch {
                what: "colors",
                expected: points.len(),
                actual: colors.len(),
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(ShaderError::NonFinite("seed point"));
        }
        if colors.iter().any(|&c| !is_finite(c)) {
            return Err(ShaderError::NonFinite("seed color"));
        }

        Ok(Self::new(points, colors))
    }

    /// Create a shader from seeds.
    pub fn from_seeds(seeds: impl IntoIterator<Item = Seed>) -> Self {
        let seeds = seeds
            .into_iter()
            .map(|s| Seed {
                point: s.point,
                color: clamp(s.color),
            })
            .collect::<Vec<_>>();

        log::debug!("created voronoi shader with {} seeds", seeds.len());

        Self {
            opaque: !seeds.is_empty() && seeds.iter().all(|s| is_opaque(s.color)),
            seeds,
            transform: Affine::IDENTITY,
        }
    }

    /// Place the shader's local space with `transform`.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// The seeds of the diagram.
    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// The index of the seed closest to `point`, if there is any seed at all.
    pub fn nearest(&self, point: Point) -> Option<usize> {
        let mut best = None;
        let mut best_dist = f64::INFINITY;

        for (i, seed) in self.seeds.iter().enumerate() {
            let dist = (seed.point - point).hypot2();
            // Strictly smaller, so that ties go to the lowest index.
            if dist < best_dist || best.is_none() {
                best = Some(i);
                best_dist = dist;
            }
        }

        best
    }
}

impl Shader for VoronoiShader {
    fn is_opaque(&self) -> bool {
        self.opaque
    }

    fn local_transform(&self) -> Affine {
        self.transform
    }

    fn color_at(&self, point: Point) -> Color {
        self.nearest(point)
            .map_or(Color::TRANSPARENT, |i| self.seeds[i].color)
    }
}
