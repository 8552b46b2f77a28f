// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The procedural shaders.

mod color_matrix;
mod linear_pos;
mod solid;
mod sweep;
mod voronoi;

pub use color_matrix::ColorMatrixShader;
pub use linear_pos::LinearPosGradientShader;
pub use solid::SolidShader;
pub use sweep::SweepGradientShader;
pub use voronoi::{Seed, VoronoiShader};
