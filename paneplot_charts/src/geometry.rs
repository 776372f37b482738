// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry helpers shared by layout, axes and mapping.
//!
//! Points, rectangles, sizes and paddings are the `kurbo` value types
//! ([`kurbo::Point`], [`kurbo::Rect`], [`kurbo::Size`], [`kurbo::Insets`]).
//! This module adds the band arithmetic used to slice an extent into equal
//! parts.

use alloc::vec::Vec;

use kurbo::Rect;

/// Where ticks sit relative to category bands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TickPlacement {
    /// Ticks mark band centers; bands split the width purely by count.
    #[default]
    Centered,
    /// Ticks mark band edges; one grid-stroke width is reserved at every
    /// boundary, outer edges included.
    Edge,
}

/// Equal-width bands along one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bands {
    /// Coordinate of the leading edge.
    pub origin: f64,
    /// Width of one band.
    pub increment: f64,
    /// Number of bands.
    pub count: usize,
    /// Width reserved at every boundary ([`TickPlacement::Edge`] only).
    pub stroke: f64,
    /// Tick placement mode.
    pub placement: TickPlacement,
}

impl Bands {
    /// Divides `[origin, origin + extent]` into `count` bands.
    pub fn new(
        origin: f64,
        extent: f64,
        count: usize,
        placement: TickPlacement,
        stroke: f64,
    ) -> Self {
        let n = count.max(1) as f64;
        let (increment, stroke) = match placement {
            TickPlacement::Centered => (extent / n, 0.0),
            TickPlacement::Edge => (((extent - (n + 1.0) * stroke) / n).max(0.0), stroke),
        };
        Self {
            origin,
            increment,
            count,
            stroke,
            placement,
        }
    }

    /// Returns the start and end of band `i`.
    pub fn span(&self, i: usize) -> (f64, f64) {
        let start = self.origin + self.stroke + i as f64 * (self.increment + self.stroke);
        (start, start + self.increment)
    }

    /// Returns the center of band `i`.
    pub fn center(&self, i: usize) -> f64 {
        let (a, b) = self.span(i);
        0.5 * (a + b)
    }

    /// Returns the center of boundary `i` (`0..=count`).
    ///
    /// Boundary `0` is the leading edge and boundary `count` the trailing one.
    pub fn boundary(&self, i: usize) -> f64 {
        self.origin + i as f64 * (self.increment + self.stroke) + 0.5 * self.stroke
    }

    /// Returns the tick positions for this placement mode.
    pub fn ticks(&self) -> Vec<f64> {
        match self.placement {
            TickPlacement::Centered => (0..self.count).map(|i| self.center(i)).collect(),
            TickPlacement::Edge => (0..=self.count).map(|i| self.boundary(i)).collect(),
        }
    }
}

/// Splits `extent` starting at `origin` into `count` equal parts separated by
/// `gap`, returning `(start, end)` pairs.
pub fn split_with_gaps(origin: f64, extent: f64, count: usize, gap: f64) -> Vec<(f64, f64)> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let size = ((extent - (n - 1.0) * gap) / n).max(0.0);
    (0..count)
        .map(|i| {
            let start = origin + i as f64 * (size + gap);
            (start, start + size)
        })
        .collect()
}

/// Returns `rect` with its top moved down by `amount`, clamped to stay valid.
pub fn take_top(rect: &mut Rect, amount: f64) -> Rect {
    let y1 = (rect.y0 + amount.max(0.0)).min(rect.y1);
    let taken = Rect::new(rect.x0, rect.y0, rect.x1, y1);
    rect.y0 = y1;
    taken
}

/// Returns `rect` with its bottom moved up by `amount`, clamped to stay valid.
pub fn take_bottom(rect: &mut Rect, amount: f64) -> Rect {
    let y0 = (rect.y1 - amount.max(0.0)).max(rect.y0);
    let taken = Rect::new(rect.x0, y0, rect.x1, rect.y1);
    rect.y1 = y0;
    taken
}

/// Returns `rect` with its right edge moved left by `amount`.
pub fn take_right(rect: &mut Rect, amount: f64) -> Rect {
    let x0 = (rect.x1 - amount.max(0.0)).max(rect.x0);
    let taken = Rect::new(x0, rect.y0, rect.x1, rect.y1);
    rect.x1 = x0;
    taken
}
