// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions shared across different tests.
//!
//! This is a deliberately tiny reference raster: no anti-aliasing, a pixel is covered if its
//! center is inside the shape. That is all the properties below need.

#![allow(dead_code, reason = "not every test uses every helper")]

use std::path::PathBuf;

use image::{ImageFormat, RgbaImage};
use sheen_cpu::sheen_common::color::PremulRgba8;
use sheen_cpu::sheen_common::coons::MeshGrid;
use sheen_cpu::sheen_common::kurbo::{Affine, BezPath, Point, Rect, Shape};
use sheen_cpu::sheen_common::peniko::Color;
use sheen_cpu::sheen_common::util::to_premul_rgba8;
use sheen_cpu::{MeshCanvas, Shader};

pub(crate) const CLEAR: PremulRgba8 = PremulRgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// Set this to a directory to get a PNG of every rendered scene.
const DUMP_DIR_VAR: &str = "SHEEN_DUMP_DIR";

pub(crate) fn rgba(p: PremulRgba8) -> [u8; 4] {
    [p.r, p.g, p.b, p.a]
}

pub(crate) fn premul(color: Color) -> [u8; 4] {
    rgba(to_premul_rgba8(color))
}

/// A buffer of premultiplied pixels.
#[derive(Debug, Clone)]
pub(crate) struct Pixmap {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) pixels: Vec<PremulRgba8>,
}

impl Pixmap {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![CLEAR; usize::from(width) * usize::from(height)],
        }
    }

    pub(crate) fn pixel(&self, x: u16, y: u16) -> [u8; 4] {
        rgba(self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    fn set(&mut self, x: u16, y: u16, pixel: PremulRgba8) {
        let idx = usize::from(y) * usize::from(self.width) + usize::from(x);
        self.pixels[idx] = pixel;
    }

    /// Whether any pixel is not fully transparent.
    pub(crate) fn is_painted(&self, x: u16, y: u16) -> bool {
        self.pixel(x, y)[3] != 0
    }

    /// The pixel range `[x0, x1) × [y0, y1)` covered by `rect`, clipped to the pixmap.
    fn pixel_bounds(&self, rect: Rect) -> (u16, u16, u16, u16) {
        let clip = |v: f64, max: u16| v.clamp(0.0, f64::from(max)) as u16;
        (
            clip(rect.x0.floor(), self.width),
            clip(rect.y0.floor(), self.height),
            clip(rect.x1.ceil(), self.width),
            clip(rect.y1.ceil(), self.height),
        )
    }

    /// Shade the pixels of `rect` (in device space) with `shader` drawn under `ctm`.
    pub(crate) fn fill_rect_with_shader(&mut self, rect: Rect, shader: &dyn Shader, ctm: Affine) {
        let Some(mapper) = shader.mapper(ctm) else {
            return;
        };
        let (x0, y0, x1, y1) = self.pixel_bounds(rect);
        let mut row = vec![CLEAR; usize::from(x1 - x0)];

        for y in y0..y1 {
            shader.shade_row(&mapper, i32::from(x0), i32::from(y), &mut row);
            for (x, pixel) in (x0..x1).zip(&row) {
                self.set(x, y, *pixel);
            }
        }
    }

    /// Fill `path` (in device space) with the non-zero rule, sampling pixel centers.
    ///
    /// Covered pixels take the color of `paint`.
    pub(crate) fn fill_path(&mut self, path: &BezPath, paint: Paint<'_>) {
        let mapper = match paint {
            Paint::Shader(shader, ctm) => match shader.mapper(ctm) {
                Some(mapper) => Some(mapper),
                None => return,
            },
            Paint::Solid(_) | Paint::Clear => None,
        };

        let (x0, y0, x1, y1) = self.pixel_bounds(path.bounding_box());
        let mut px = [CLEAR];

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if path.winding(center) == 0 {
                    continue;
                }

                let pixel = match (paint, &mapper) {
                    (Paint::Shader(shader, _), Some(mapper)) => {
                        shader.shade_row(mapper, i32::from(x), i32::from(y), &mut px);
                        px[0]
                    }
                    (Paint::Solid(color), _) => to_premul_rgba8(color),
                    _ => CLEAR,
                };
                self.set(x, y, pixel);
            }
        }
    }

    /// Write the pixmap to `$SHEEN_DUMP_DIR/<name>.png`, if the variable is set.
    pub(crate) fn dump(&self, name: &str) -> anyhow::Result<()> {
        let Some(dir) = std::env::var_os(DUMP_DIR_VAR) else {
            return Ok(());
        };
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;

        // PNG wants unpremultiplied pixels.
        let data = self
            .pixels
            .iter()
            .flat_map(|p| {
                let unpremul = |c: u8| {
                    if p.a == 0 {
                        0
                    } else {
                        ((u16::from(c) * 255 + u16::from(p.a) / 2) / u16::from(p.a)) as u8
                    }
                };
                [unpremul(p.r), unpremul(p.g), unpremul(p.b), p.a]
            })
            .collect::<Vec<_>>();

        let image = RgbaImage::from_raw(u32::from(self.width), u32::from(self.height), data)
            .ok_or_else(|| anyhow::anyhow!("pixel buffer has the wrong size"))?;
        image.save_with_format(dir.join(format!("{name}.png")), ImageFormat::Png)?;

        Ok(())
    }
}

/// How [`Pixmap::fill_path`] colors covered pixels.
#[derive(Clone, Copy)]
pub(crate) enum Paint<'a> {
    Solid(Color),
    Shader(&'a dyn Shader, Affine),
    /// Erase the covered pixels.
    Clear,
}

/// A mesh canvas that records every mesh it is asked to draw, and rasterizes it onto a
/// pixmap with the paint looked up at the interpolated texture coordinates.
pub(crate) struct MeshRaster {
    pub(crate) pixmap: Pixmap,
    pub(crate) meshes: Vec<MeshGrid>,
}

impl MeshRaster {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            pixmap: Pixmap::new(width, height),
            meshes: Vec::new(),
        }
    }
}

impl MeshCanvas for MeshRaster {
    type Paint = dyn Shader;

    fn draw_mesh(&mut self, mesh: &MeshGrid, paint: &dyn Shader) {
        for [a, b, c] in mesh.triangles() {
            let (pa, pb, pc) = (a.point(), b.point(), c.point());
            let area = (pb - pa).cross(pc - pa);
            if area.abs() < 1e-12 {
                continue;
            }

            let bounds = Rect::from_points(pa, pb).union_pt(pc);
            let (x0, y0, x1, y1) = self.pixmap.pixel_bounds(bounds);

            for y in y0..y1 {
                for x in x0..x1 {
                    let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                    let wa = (pc - pb).cross(p - pb) / area;
                    let wb = (pa - pc).cross(p - pc) / area;
                    let wc = 1.0 - wa - wb;
                    if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                        continue;
                    }

                    let tex = (a.tex_point().to_vec2() * wa
                        + b.tex_point().to_vec2() * wb
                        + c.tex_point().to_vec2() * wc)
                        .to_point();
                    self.pixmap.set(x, y, to_premul_rgba8(paint.color_at(tex)));
                }
            }
        }

        self.meshes.push(mesh.clone());
    }
}

/// A small deterministic random number generator, so the scenes are reproducible.
pub(crate) struct Lcg(u64);

impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// A float in `[0, 1)`.
    pub(crate) fn next_f(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((self.0 >> 40) as f32) / ((1_u64 << 24) as f32)
    }
}

/// A circle as a path.
pub(crate) fn circle(center: Point, radius: f64) -> BezPath {
    sheen_cpu::sheen_common::kurbo::Circle::new(center, radius).to_path(0.1)
}
