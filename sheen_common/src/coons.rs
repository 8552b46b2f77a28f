// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coons patches with quadratic edges, evaluated into triangle meshes.

use bytemuck::{Pod, Zeroable};

use crate::kurbo::{ParamCurve, Point, QuadBez};

/// The largest level a patch is evaluated at, so that every vertex index fits in a `u32`.
pub const MAX_LEVEL: u32 = u16::MAX as u32 - 1;

/// A vertex of an evaluated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MeshVertex {
    /// The position of the vertex, in the coordinate space of the patch.
    pub position: [f32; 2],
    /// The texture coordinate at the vertex.
    pub tex_coord: [f32; 2],
}

impl MeshVertex {
    /// The position as a point.
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(f64::from(self.position[0]), f64::from(self.position[1]))
    }

    /// The texture coordinate as a point.
    #[inline]
    pub fn tex_point(&self) -> Point {
        Point::new(f64::from(self.tex_coord[0]), f64::from(self.tex_coord[1]))
    }
}

/// A square grid of vertices covering a patch.
///
/// The grid has `level + 1` rows and columns, stored row by row. Rows follow the `v`
/// parameter (top to bottom) and columns the `u` parameter (left to right).
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    level: u32,
    vertices: Vec<MeshVertex>,
}

impl MeshGrid {
    /// The number of cells along each side of the grid.
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The number of vertices along each side of the grid.
    #[inline]
    pub fn side(&self) -> usize {
        self.level as usize + 1
    }

    /// All vertices, row by row.
    #[inline]
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    /// The vertices as raw bytes, ready to be uploaded.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The vertex in `row` (along `v`) and `col` (along `u`).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is larger than the level.
    #[inline]
    pub fn vertex(&self, row: usize, col: usize) -> MeshVertex {
        assert!(
            row < self.side() && col < self.side(),
            "vertex ({row}, {col}) is outside of a grid of level {}",
            self.level
        );
        self.vertices[row * self.side() + col]
    }

    /// Indices into [`vertices`](Self::vertices) describing a triangle list, two triangles
    /// per cell.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let side = self.level + 1;
        let mut indices = Vec::with_capacity(self.level as usize * self.level as usize * 6);

        for row in 0..self.level {
            for col in 0..self.level {
                let top_left = row * side + col;
                let top_right = top_left + 1;
                let bottom_left = top_left + side;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    top_right,
                    bottom_left,
                    top_right,
                    bottom_right,
                    bottom_left,
                ]);
            }
        }

        indices
    }

    /// Iterate over all triangles of the mesh.
    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        let indices = self.triangle_indices();
        (0..indices.len() / 3).map(move |t| {
            let i = &indices[t * 3..t * 3 + 3];
            [
                self.vertices[i[0] as usize],
                self.vertices[i[1] as usize],
                self.vertices[i[2] as usize],
            ]
        })
    }
}

/// A Coons patch bounded by four quadratic Bézier curves.
///
/// The eight control points go clockwise around the patch, starting at the top-left corner.
/// Corners are at indices 0, 2, 4 and 6, and the off-curve control point of each edge sits
/// between its corners: 1 for the top, 3 for the right, 5 for the bottom and 7 for the left.
///
/// ```text
/// 0 -- 1 -- 2
/// |         |
/// 7         3
/// |         |
/// 6 -- 5 -- 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoonsPatch {
    /// The boundary control points.
    pub points: [Point; 8],
    /// Texture coordinates at the top-left, top-right, bottom-right and bottom-left corners.
    pub tex: [Point; 4],
}

impl CoonsPatch {
    /// Create a new patch.
    pub fn new(points: [Point; 8], tex: [Point; 4]) -> Self {
        Self { points, tex }
    }

    /// The position of the patch at `(u, v)`, both in `[0, 1]`.
    ///
    /// This blends the top and bottom edges along `v`, the left and right edges along `u`,
    /// and subtracts the bilinear blend of the corners, which both of them count.
    pub fn position(&self, u: f64, v: f64) -> Point {
        let p = &self.points;
        let top = QuadBez::new(p[0], p[1], p[2]).eval(u);
        let bottom = QuadBez::new(p[6], p[5], p[4]).eval(u);
        let left = QuadBez::new(p[0], p[7], p[6]).eval(v);
        let right = QuadBez::new(p[2], p[3], p[4]).eval(v);

        let top_bottom = top.lerp(bottom, v);
        let left_right = left.lerp(right, u);
        let corners = bilinear([p[0], p[2], p[4], p[6]], u, v);

        (top_bottom.to_vec2() + left_right.to_vec2() - corners.to_vec2()).to_point()
    }

    /// The texture coordinate at `(u, v)`, interpolated bilinearly from the corners.
    pub fn tex_coord(&self, u: f64, v: f64) -> Point {
        bilinear(self.tex, u, v)
    }

    /// Evaluate the patch on a grid with `level` cells along each side.
    ///
    /// A level of `0` is treated as `1`, so the grid always has at least its four corners.
    /// Levels above [`MAX_LEVEL`] are clamped to it.
    pub fn evaluate(&self, level: u32) -> MeshGrid {
        let level = effective_level(level);

        let side = level as usize + 1;
        let step = 1.0 / f64::from(level);
        let mut vertices = Vec::with_capacity(side * side);

        for row in 0..=level {
            // Pin the last row and column exactly to 1.
            let v = if row == level { 1.0 } else { f64::from(row) * step };
            for col in 0..=level {
                let u = if col == level { 1.0 } else { f64::from(col) * step };
                let pos = self.position(u, v);
                let tex = self.tex_coord(u, v);
                vertices.push(MeshVertex {
                    position: [pos.x as f32, pos.y as f32],
                    tex_coord: [tex.x as f32, tex.y as f32],
                });
            }
        }

        log::trace!("evaluated coons patch into {} vertices", vertices.len());

        MeshGrid { level, vertices }
    }
}

fn effective_level(level: u32) -> u32 {
    if level == 0 {
        log::warn!("coons patch level 0 is not meaningful, using 1");
        1
    } else if level > MAX_LEVEL {
        log::warn!("coons patch level {level} is too large, using {MAX_LEVEL}");
        MAX_LEVEL
    } else {
        level
    }
}

/// Interpolate four corners (clockwise from the top-left) at `(u, v)`.
fn bilinear(corners: [Point; 4], u: f64, v: f64) -> Point {
    let [top_left, top_right, bottom_right, bottom_left] = corners;
    let top = top_left.lerp(top_right, u);
    let bottom = bottom_left.lerp(bottom_right, u);
    top.lerp(bottom, v)
}
