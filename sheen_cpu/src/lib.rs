// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate implements a set of procedural shaders and geometry generators for software
//! rasterizers.
//!
//! A canvas that wants to draw with one of the shaders asks it for a
//! [`PositionMapper`](sheen_common::mapper::PositionMapper) once per draw call, and then
//! requests colors one row span at a time through [`Shader::shade_row`]. The shaders never
//! touch the destination themselves: coverage, clipping and blending stay with the canvas.
//!
//! The easiest way in is the [`Effects`] factory surface, implemented by [`CpuEffects`]:
//!
//! ```
//! use sheen_cpu::{CpuEffects, Effects, Shader};
//! use sheen_cpu::sheen_common::color::palette::css::{BLUE, RED};
//! use sheen_cpu::sheen_common::kurbo::Point;
//!
//! let effects = CpuEffects::default();
//! let sweep = effects
//!     .sweep_gradient(Point::new(50.0, 50.0), 0.0, &[RED, BLUE])
//!     .expect("two colors are enough for a sweep");
//! assert!(sweep.is_opaque());
//! ```
//!
//! Every factory method returns `None` instead of panicking when its arguments are not
//! usable, so a canvas can simply skip the draw.
//!
//! # Features
//!
//! - `multithreading`: adds [`shade_rows_parallel`], which shades blocks of rows with `rayon`.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod canvas;
mod effects;
mod shader;
pub mod shaders;

pub use canvas::{draw_quadratic_coons, MeshCanvas};
pub use effects::{CpuEffects, EffectSettings, Effects};
#[cfg(feature = "multithreading")]
pub use shader::shade_rows_parallel;
pub use shader::{shade_rows, Shader};
pub use sheen_common;
