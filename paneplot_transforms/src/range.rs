// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value ranges per pane and tier.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::tensor::{CellIndex, ValueTensor};

/// A closed numeric interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl ValueRange {
    /// Creates a range; the bounds are swapped if given out of order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// A range covering a single value.
    pub fn point(v: f64) -> Self {
        Self { min: v, max: v }
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widens this range to contain `v`.
    #[must_use]
    pub fn including(self, v: f64) -> Self {
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }

    /// Returns the smallest range containing both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

fn widen(slot: &mut Option<ValueRange>, v: f64) {
    *slot = Some(match *slot {
        Some(r) => r.including(v),
        None => ValueRange::point(v),
    });
}

/// Ranges for one pane: the whole pane, and each tier separately.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaneRanges {
    /// Range across every tier of the pane, or `None` if the pane has no values.
    pub overall: Option<ValueRange>,
    /// Range per tier, indexed like the tier headers.
    pub tiers: Vec<Option<ValueRange>>,
}

/// Everything the Y-axis measurer needs from the data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct YScaleAxisData {
    /// Tier headers, in display order.
    pub tiers: Vec<String>,
    /// Ranges per pane, indexed like the pane headers.
    pub panes: Vec<PaneRanges>,
}

impl YScaleAxisData {
    /// Computes ranges from `tensor`.
    ///
    /// When `stacked`, values are summed across series per
    /// `(pane, tier, lane, dimension)` before taking the extremes, so the
    /// range covers the tallest stack. Otherwise every value counts on its own.
    pub fn compute(tensor: &ValueTensor, tiers: &[String], stacked: bool) -> Self {
        let [panes, tier_count, lanes, series, dims] = tensor.shape();
        let mut out = Vec::with_capacity(panes);
        for p in 0..panes {
            let mut ranges = PaneRanges {
                overall: None,
                tiers: vec![None; tier_count],
            };
            for t in 0..tier_count {
                for l in 0..lanes {
                    for d in 0..dims {
                        let values =
                            (0..series).filter_map(|s| tensor.get(CellIndex::new(p, t, l, s, d)));
                        if stacked {
                            let mut any = false;
                            let mut sum = 0.0;
                            for v in values {
                                any = true;
                                sum += v;
                            }
                            if any {
                                widen(&mut ranges.tiers[t], sum);
                            }
                        } else {
                            for v in values {
                                widen(&mut ranges.tiers[t], v);
                            }
                        }
                    }
                }
            }
            ranges.overall = ranges.tiers.iter().flatten().copied().reduce(ValueRange::union);
            out.push(ranges);
        }
        Self {
            tiers: tiers.to_vec(),
            panes: out,
        }
    }
}
