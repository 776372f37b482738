// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping tensor values into plot-area pixels.

use kurbo::{Point, Rect};

use crate::geometry::Bands;
use crate::scale::{LinearScale, TickSet};

/// Maps `(dimension, value)` pairs into one plot area.
///
/// X comes from the dimension's band (the same bands the X axis was measured
/// with); Y interpolates linearly between the tier's first and last tick, with
/// y growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    bands: Bands,
    scale: LinearScale,
    rect: Rect,
}

impl CoordinateMapper {
    /// Creates a mapper for `rect`. `bands` may be relative to any origin;
    /// they are re-anchored at `rect.x0`.
    pub fn new(rect: Rect, bands: Bands, ticks: &TickSet) -> Self {
        Self {
            bands: Bands {
                origin: rect.x0,
                ..bands
            },
            scale: ticks.scale(rect.y1, rect.y0),
            rect,
        }
    }

    /// The plot rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The anchored bands.
    pub fn bands(&self) -> Bands {
        self.bands
    }

    /// The value scale.
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    /// Pixel x of a dimension's band center.
    pub fn x(&self, dimension: usize) -> f64 {
        self.bands.center(dimension)
    }

    /// Pixel y of a value.
    pub fn y(&self, value: f64) -> f64 {
        self.scale.map(value)
    }

    /// Maps a possibly absent value.
    pub fn point(&self, dimension: usize, value: Option<f64>) -> Option<Point> {
        value.map(|v| Point::new(self.x(dimension), self.y(v)))
    }

    /// Pixel y bars and zero-anchored areas grow from: zero, clamped into the
    /// plot rectangle.
    pub fn baseline(&self) -> f64 {
        self.y(0.0).clamp(self.rect.y0, self.rect.y1)
    }

    /// Pixel distance from `value` to the baseline; negative below it.
    pub fn bar_height(&self, value: f64) -> f64 {
        self.baseline() - self.y(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::geometry::TickPlacement;

    fn ticks(min: f64, max: f64) -> TickSet {
        TickSet {
            values: vec![min, max],
            labels: vec![alloc::format!("{min}"), alloc::format!("{max}")],
            step: max - min,
        }
    }

    #[test]
    fn maps_band_centers_and_values() {
        let rect = Rect::new(100.0, 0.0, 300.0, 100.0);
        let bands = Bands::new(0.0, 200.0, 4, TickPlacement::Centered, 0.0);
        let m = CoordinateMapper::new(rect, bands, &ticks(0.0, 50.0));
        assert_eq!(m.x(0), 125.0);
        assert_eq!(m.y(0.0), 100.0);
        assert_eq!(m.y(50.0), 0.0);
        assert_eq!(m.point(1, Some(25.0)), Some(Point::new(175.0, 50.0)));
        assert_eq!(m.point(1, None), None);
        assert_eq!(m.bar_height(25.0), 50.0);
    }

    #[test]
    fn baseline_follows_zero_when_in_range() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let bands = Bands::new(0.0, 100.0, 1, TickPlacement::Centered, 0.0);
        let m = CoordinateMapper::new(rect, bands, &ticks(-50.0, 50.0));
        assert_eq!(m.baseline(), 50.0);
        assert_eq!(m.bar_height(-25.0), -25.0);
        let m = CoordinateMapper::new(rect, bands, &ticks(10.0, 20.0));
        assert_eq!(m.baseline(), 100.0);
    }
}
