// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by the record transform.

use alloc::string::String;

use crate::tensor::CellIndex;

/// Errors raised while reshaping records into a tensor.
///
/// All of these are input errors: they are raised synchronously and retrying
/// with the same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The input is missing rows or columns, or a record cannot be placed.
    #[error("malformed input: {0}")]
    InputShape(String),
    /// The value-property sentinel is missing or assigned to several axes.
    #[error("ambiguous value-property assignment: {0}")]
    Assignment(String),
    /// Two records resolve to the same tensor cell.
    #[error("duplicate data at cell {cell} for value property `{property}`")]
    DuplicateData {
        /// The cell written twice.
        cell: CellIndex,
        /// The value property whose write collided.
        property: String,
    },
}
