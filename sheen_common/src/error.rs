// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the checked constructors.
//!
//! The shading and geometry math itself never fails: degenerate input produces a
//! deterministic result instead. These errors only describe arguments that break a
//! constructor's documented preconditions.

use thiserror::Error;

/// Errors that can occur when building a shader from caller-supplied arrays.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// A Voronoi shader needs at least one seed.
    #[error("at least one seed is required")]
    TooFewSeeds,
    /// A gradient was given fewer colors than it needs.
    #[error("expected at least {required} colors, got {actual}")]
    TooFewColors {
        /// The minimum number of colors.
        required: usize,
        /// The number of colors that was passed.
        actual: usize,
    },
    /// Two parallel arrays have different lengths.
    #[error("{what} has {actual} entries but {expected} were expected")]
    LengthMismatch {
        /// Which array is the wrong length.
        what: &'static str,
        /// The length of the reference array.
        expected: usize,
        /// The length of the mismatched array.
        actual: usize,
    },
    /// Gradient stop offsets must start at 0, end at 1 and never decrease.
    #[error("stop offsets must be non-decreasing from 0.0 to 1.0")]
    InvalidStopOffsets,
    /// A coordinate, angle or color component is NaN or infinite.
    #[error("{0} is not finite")]
    NonFinite(&'static str),
}
