// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart pipeline errors.

use alloc::string::String;

use paneplot_transforms::TransformError;

use crate::axis::{XAxisKind, YAxisKind};

/// Errors raised while building a chart.
///
/// Degenerate value ranges are not errors; they are replaced by `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// Reshaping the records failed.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The data does not fit the requested chart (for example a diff area
    /// without exactly two series).
    #[error("malformed input: {0}")]
    InputShape(String),
    /// The requested axis kind combination has no measurement strategy.
    #[error("axis kind combination x={x:?}, y={y:?} is not implemented")]
    UnimplementedAxisKind {
        /// Requested X axis kind.
        x: XAxisKind,
        /// Requested Y axis kind.
        y: YAxisKind,
    },
    /// An internal geometric invariant did not hold.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

/// Shorthand for results of the chart pipeline.
pub type ChartResult<T> = Result<T, ChartError>;
