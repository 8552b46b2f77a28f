// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing Coons patches on a mesh canvas.
//!
//! The patch is evaluated here; rasterizing the resulting triangles is left to the canvas.

use sheen_common::coons::{CoonsPatch, MeshGrid};

/// A canvas that can draw textured triangle meshes.
///
/// This is implemented by the renderer that receives the meshes produced by
/// [`draw_quadratic_coons`]; rasterizing the triangles and looking up the paint at the
/// interpolated texture coordinates is up to it.
pub trait MeshCanvas {
    /// The paint used to fill a mesh, usually a shader sampled at the texture coordinates.
    type Paint: ?Sized;

    /// Draw every triangle of [`MeshGrid::triangle_indices`] with `paint`.
    fn draw_mesh(&mut self, mesh: &MeshGrid, paint: &Self::Paint);
}

/// Evaluate `patch` on a grid with `level` cells per side and draw it on `canvas`.
///
/// A level of `0` is treated as `1`, and levels above
/// [`MAX_LEVEL`](sheen_common::coons::MAX_LEVEL) are clamped to it.
pub fn draw_quadratic_coons<C: MeshCanvas + ?Sized>(
    canvas: &mut C,
    patch: &CoonsPatch,
    level: u32,
    paint: &C::Paint,
) {
    let mesh = patch.evaluate(level);
    log::debug!(
        "drawing coons patch as a mesh of level {} ({} vertices)",
        mesh.level(),
        mesh.vertices().len()
    );
    canvas.draw_mesh(&mesh, paint);
}
