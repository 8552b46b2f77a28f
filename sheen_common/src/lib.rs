// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate includes the geometry and color primitives used by the shaders in [Sheen CPU][sheen_cpu].
//!
//! # Usage
//!
//! Most users want [Sheen CPU][sheen_cpu], which builds its shaders and its factory surface on top of
//! this crate. The pieces in here are also usable on their own when a renderer only needs the
//! geometry generators, for example [`stroke`] to turn a polygon into a fillable outline, or
//! [`coons`] to tessellate a Coons patch into a textured vertex grid.
//!
//! # Contents
//!
//! - [`mapper`]: mapping device pixels into shader-local space.
//! - [`color_matrix`]: 4×5 color matrices operating on unpremultiplied colors.
//! - [`gradient`]: color ramps shared by the sweep and positioned linear gradients.
//! - [`stroke`]: polygon to stroke outline conversion with round joins and caps.
//! - [`coons`]: Coons patch evaluation into a [`MeshGrid`][coons::MeshGrid].
//! - [`error`]: the errors reported by the checked constructors.
//! - [`util`]: color helpers.
//!
//! All types are immutable after construction and can be shared freely between threads.
//!
//! [sheen_cpu]: https://docs.rs/sheen_cpu
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

pub mod color_matrix;
pub mod coons;
pub mod error;
pub mod gradient;
pub mod mapper;
pub mod stroke;
pub mod util;

pub use bytemuck;
pub use peniko;
pub use peniko::color;
pub use peniko::kurbo;
pub use smallvec;
