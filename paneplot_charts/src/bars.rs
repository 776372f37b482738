// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar and error-bar geometry.

use alloc::string::String;

use kurbo::{Point, Rect};
use paneplot_text::TextStyle;

use crate::coords::CoordinateMapper;
use crate::primitive::{ErrorBarPrimitive, StrokeStyle, TextAnchor, TextBaseline, TextItem};
use crate::style::{BarMode, BarStyle, LabelStyle};

/// Signed pixel height of the bars already stacked in one dimension band.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct StackState {
    height: f64,
}

impl StackState {
    /// Pixel y of the current stack end.
    pub(crate) fn end(&self, baseline: f64) -> f64 {
        baseline - self.height
    }
}

/// Places bars within one dimension band.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BarPlacer<'a> {
    mapper: &'a CoordinateMapper,
    style: &'a BarStyle,
    series_count: usize,
}

impl<'a> BarPlacer<'a> {
    pub(crate) fn new(mapper: &'a CoordinateMapper, style: &'a BarStyle, series_count: usize) -> Self {
        Self {
            mapper,
            style,
            series_count,
        }
    }

    /// Width of a full (stacked, imposed or uncertainty) bar.
    pub(crate) fn full_width(&self) -> f64 {
        self.mapper.bands().increment * self.style.width_ratio
    }

    /// Returns the rectangle for `value` of `series` at `dimension`.
    ///
    /// Stacked bars start where the previous bar in `stack` ended and extend
    /// by their own signed height, so a negative value walks the stack back
    /// toward the baseline. The stack end is always the pixel y of the
    /// running sum.
    pub(crate) fn rect(
        &self,
        series: usize,
        dimension: usize,
        value: f64,
        stack: &mut StackState,
    ) -> Rect {
        let cx = self.mapper.x(dimension);
        let w = self.full_width();
        let baseline = self.mapper.baseline();
        let h = self.mapper.bar_height(value);
        match self.style.mode {
            BarMode::Stacked => {
                let start = stack.end(baseline);
                stack.height += h;
                Rect::new(cx - 0.5 * w, start - h, cx + 0.5 * w, start).abs()
            }
            BarMode::Grouped => {
                let slot = w / self.series_count.max(1) as f64;
                let x0 = cx - 0.5 * w + series as f64 * slot;
                Rect::new(x0, baseline - h, x0 + slot, baseline).abs()
            }
            BarMode::Imposed | BarMode::Uncertainty => {
                Rect::new(cx - 0.5 * w, baseline - h, cx + 0.5 * w, baseline).abs()
            }
        }
    }

    /// Error bar spanning `a` and `b` at `dimension`, whichever is larger on
    /// top.
    pub(crate) fn error_bar(
        &self,
        dimension: usize,
        a: f64,
        b: f64,
        stroke: StrokeStyle,
    ) -> ErrorBarPrimitive {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        ErrorBarPrimitive {
            x: self.mapper.x(dimension),
            top: self.mapper.y(hi),
            bottom: self.mapper.y(lo),
            cap_width: self.full_width() * self.style.cap_ratio,
            stroke,
        }
    }
}

/// Places a label just outside the free end of `rect`.
pub(crate) fn bar_label(
    rect: Rect,
    negative: bool,
    text: String,
    style: &LabelStyle,
) -> TextItem {
    let x = rect.center().x;
    let (y, baseline) = if negative {
        (rect.y1 + style.offset, TextBaseline::Top)
    } else {
        (rect.y0 - style.offset, TextBaseline::Bottom)
    };
    TextItem::new(
        text,
        Point::new(x, y),
        TextStyle::new(style.font_size),
        style.color,
        TextAnchor::Middle,
        baseline,
    )
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::geometry::{Bands, TickPlacement};
    use crate::scale::TickSet;

    fn mapper() -> CoordinateMapper {
        let ticks = TickSet {
            values: vec![0.0, 100.0],
            labels: vec![String::from("0"), String::from("100")],
            step: 100.0,
        };
        CoordinateMapper::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            Bands::new(0.0, 200.0, 2, TickPlacement::Centered, 0.0),
            &ticks,
        )
    }

    #[test]
    fn stacked_bars_accumulate_from_the_baseline() {
        let m = mapper();
        let style = BarStyle::default();
        let placer = BarPlacer::new(&m, &style, 3);
        let mut stack = StackState::default();
        let a = placer.rect(0, 0, 20.0, &mut stack);
        let b = placer.rect(1, 0, 30.0, &mut stack);
        assert_eq!(a.y1, 100.0);
        assert_eq!(a.y0, 80.0);
        assert_eq!(b.y1, 80.0);
        assert_eq!(b.y0, 50.0);
        assert_eq!(stack.end(100.0), 50.0);
        assert!((a.width() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn stacked_negative_values_walk_back_toward_the_baseline() {
        let m = mapper();
        let style = BarStyle::default();
        let placer = BarPlacer::new(&m, &style, 2);
        let mut stack = StackState::default();
        let a = placer.rect(0, 0, 60.0, &mut stack);
        let b = placer.rect(1, 0, -45.0, &mut stack);
        assert_eq!((a.y0, a.y1), (40.0, 100.0));
        assert_eq!((b.y0, b.y1), (40.0, 85.0));
        assert_eq!(stack.end(m.baseline()), m.y(15.0));
    }

    #[test]
    fn grouped_bars_split_the_band() {
        let m = mapper();
        let style = BarStyle::default().with_mode(BarMode::Grouped);
        let placer = BarPlacer::new(&m, &style, 2);
        let mut stack = StackState::default();
        let a = placer.rect(0, 1, 40.0, &mut stack);
        let b = placer.rect(1, 1, 60.0, &mut stack);
        assert!((a.x1 - b.x0).abs() < 1e-9);
        assert!((a.width() - 35.0).abs() < 1e-9);
        assert_eq!(b.y0, 40.0);
        assert_eq!(stack, StackState::default());
    }

    #[test]
    fn error_bar_orders_bounds() {
        let m = mapper();
        let style = BarStyle::default().with_mode(BarMode::Uncertainty);
        let placer = BarPlacer::new(&m, &style, 3);
        let e = placer.error_bar(0, 60.0, 40.0, StrokeStyle::default());
        assert_eq!(e.top, 40.0);
        assert_eq!(e.bottom, 60.0);
        assert_eq!(e.x, 50.0);
    }
}
