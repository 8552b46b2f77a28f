// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shader capability shared by all procedural paints.

use core::fmt::Debug;
use std::sync::Arc;

use sheen_common::color::PremulRgba8;
use sheen_common::kurbo::{Affine, Point};
use sheen_common::mapper::PositionMapper;
use sheen_common::peniko::Color;
use sheen_common::util::to_premul_rgba8;

/// A procedural paint that produces a color for every point of its local space.
///
/// Shaders are immutable once built, so a single instance can shade any number of rows, from
/// any number of threads.
pub trait Shader: Send + Sync + Debug {
    /// Whether every color this shader produces is fully opaque.
    ///
    /// A canvas can use this to skip blending with the destination.
    fn is_opaque(&self) -> bool;

    /// The transform from the shader's local space into the space it is drawn in.
    fn local_transform(&self) -> Affine {
        Affine::IDENTITY
    }

    /// The unpremultiplied color at a point in local space, clamped to `[0, 1]`.
    fn color_at(&self, point: Point) -> Color;

    /// Prepare a mapper for a draw with the canvas transform `ctm`.
    ///
    /// Returns `None` if the combined transform is singular, in which case nothing should
    /// be drawn.
    fn mapper(&self, ctm: Affine) -> Option<PositionMapper> {
        PositionMapper::new(ctm * self.local_transform())
    }

    /// Shade `row.len()` pixels starting at device pixel `(x, y)`.
    fn shade_row(&self, mapper: &PositionMapper, x: i32, y: i32, row: &mut [PremulRgba8]) {
        let len = row.len();
        for (pixel, point) in row.iter_mut().zip(mapper.span(x, y, len)) {
            *pixel = to_premul_rgba8(self.color_at(point));
        }
    }
}

macro_rules! forward_shader {
    () => {
        fn is_opaque(&self) -> bool {
            (**self).is_opaque()
        }

        fn local_transform(&self) -> Affine {
            (**self).local_transform()
        }

        fn color_at(&self, point: Point) -> Color {
            (**self).color_at(point)
        }

        fn mapper(&self, ctm: Affine) -> Option<PositionMapper> {
            (**self).mapper(ctm)
        }

        fn shade_row(&self, mapper: &PositionMapper, x: i32, y: i32, row: &mut [PremulRgba8]) {
            (**self).shade_row(mapper, x, y, row);
        }
    };
}

impl<S: Shader + ?Sized> Shader for &S {
    forward_shader!();
}

impl<S: Shader + ?Sized> Shader for Box<S> {
    forward_shader!();
}

impl<S: Shader + ?Sized> Shader for Arc<S> {
    forward_shader!();
}

/// Shade a block of rows, `width` pixels wide, whose top-left pixel is `(x, y)`.
///
/// `pixels` holds the rows one after the other; a trailing partial row is shaded as far as
/// it goes.
pub fn shade_rows<S: Shader + ?Sized>(
    shader: &S,
    mapper: &PositionMapper,
    x: i32,
    y: i32,
    width: usize,
    pixels: &mut [PremulRgba8],
) {
    if width == 0 {
        return;
    }

    for (i, row) in pixels.chunks_mut(width).enumerate() {
        shader.shade_row(mapper, x, y + i as i32, row);
    }
}

/// Like [`shade_rows`], but the rows are shaded in parallel in the current `rayon` thread
/// pool.
///
/// The output is identical to the one of [`shade_rows`].
#[cfg(feature = "multithreading")]
pub fn shade_rows_parallel<S: Shader + ?Sized>(
    shader: &S,
    mapper: &PositionMapper,
    x: i32,
    y: i32,
    width: usize,
    pixels: &mut [PremulRgba8],
) {
    use rayon::iter::{IndexedParallelIterator, ParallelIterator};
    use rayon::slice::ParallelSliceMut;

    if width == 0 {
        return;
    }

    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(i, row)| shader.shade_row(mapper, x, y + i as i32, row));
}
