// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Symbol shapes for data points and legend entries.

use kurbo::Rect;

/// A small set of symbol shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A circle.
    #[default]
    Circle,
    /// An axis-aligned square.
    Square,
}

impl Symbol {
    /// Returns the bounding box of this symbol centered at `(cx, cy)`.
    pub fn bounds(self, cx: f64, cy: f64, radius: f64) -> Rect {
        Rect::new(cx - radius, cy - radius, cx + radius, cy + radius)
    }
}
