// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dense five-axis value tensor.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::error::TransformError;

/// Indices of one tensor cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellIndex {
    /// Pane index.
    pub pane: usize,
    /// Tier index.
    pub tier: usize,
    /// Lane index.
    pub lane: usize,
    /// Series index.
    pub series: usize,
    /// Dimension-value index.
    pub dimension: usize,
}

impl CellIndex {
    /// Creates a cell index.
    pub fn new(pane: usize, tier: usize, lane: usize, series: usize, dimension: usize) -> Self {
        Self {
            pane,
            tier,
            lane,
            series,
            dimension,
        }
    }

    fn as_array(self) -> [usize; 5] {
        [self.pane, self.tier, self.lane, self.series, self.dimension]
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}][{}][{}][{}]",
            self.pane, self.tier, self.lane, self.series, self.dimension
        )
    }
}

/// A dense tensor indexed `[pane][tier][lane][series][dimension]`.
///
/// Every cell starts unwritten. A cell may be written once, with either a
/// number or an explicit absence; a second write is a
/// [`TransformError::DuplicateData`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValueTensor {
    shape: [usize; 5],
    cells: Vec<Option<f64>>,
    written: Vec<bool>,
}

impl ValueTensor {
    /// Creates an unwritten tensor with the given shape.
    pub fn new(shape: [usize; 5]) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            cells: vec![None; len],
            written: vec![false; len],
        }
    }

    /// Returns `[panes, tiers, lanes, series, dimensions]`.
    pub fn shape(&self) -> [usize; 5] {
        self.shape
    }

    fn offset(&self, cell: CellIndex) -> Option<usize> {
        let idx = cell.as_array();
        let mut offset = 0;
        for (i, n) in idx.iter().zip(self.shape.iter()) {
            if i >= n {
                return None;
            }
            offset = offset * n + i;
        }
        Some(offset)
    }

    /// Returns the value at `cell`, or `None` if absent or out of bounds.
    pub fn get(&self, cell: CellIndex) -> Option<f64> {
        self.offset(cell).and_then(|o| self.cells[o])
    }

    /// Returns whether `cell` has been written.
    pub fn is_written(&self, cell: CellIndex) -> bool {
        self.offset(cell).is_some_and(|o| self.written[o])
    }

    /// Writes `value` into `cell`.
    ///
    /// `property` names the value property being written and is only used for
    /// error reporting.
    pub fn set(
        &mut self,
        cell: CellIndex,
        value: Option<f64>,
        property: &str,
    ) -> Result<(), TransformError> {
        let Some(o) = self.offset(cell) else {
            return Err(TransformError::InputShape(alloc::format!(
                "cell {cell} is outside tensor shape {:?}",
                self.shape
            )));
        };
        if self.written[o] {
            return Err(TransformError::DuplicateData {
                cell,
                property: String::from(property),
            });
        }
        self.written[o] = true;
        self.cells[o] = value;
        Ok(())
    }

    /// Returns the values of one plot area as `[series][dimension]`.
    pub fn lane_values(&self, pane: usize, tier: usize, lane: usize) -> Vec<Vec<Option<f64>>> {
        let [_, _, _, series, dims] = self.shape;
        (0..series)
            .map(|s| {
                (0..dims)
                    .map(|d| self.get(CellIndex::new(pane, tier, lane, s, d)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn second_write_is_duplicate_even_when_first_was_absent() {
        let mut t = ValueTensor::new([1, 1, 1, 2, 2]);
        let cell = CellIndex::new(0, 0, 0, 1, 1);
        t.set(cell, None, "v").unwrap();
        assert!(t.is_written(cell));
        let err = t.set(cell, Some(1.0), "v").unwrap_err();
        assert!(matches!(err, TransformError::DuplicateData { .. }));
    }

    #[test]
    fn out_of_bounds_is_shape_error() {
        let mut t = ValueTensor::new([1, 1, 1, 1, 1]);
        let err = t
            .set(CellIndex::new(0, 0, 0, 0, 3), Some(1.0), "v")
            .unwrap_err();
        assert!(matches!(err, TransformError::InputShape(_)));
    }
}
