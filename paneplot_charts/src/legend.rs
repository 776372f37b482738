// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series legend.
//!
//! Entries are a symbol followed by the series header. Horizontal legends
//! (top and bottom) flow entries into rows that fit the available width;
//! vertical legends (right) stack one entry per row.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use paneplot_text::{TextMeasurer, TextStyle};
use peniko::Color;

use crate::primitive::{
    LegendEntry, LegendPrimitive, LegendSymbol, Primitive, PrimitiveKind, TextAnchor,
    TextBaseline, TextItem,
};
use crate::style::{ChartStyle, LegendPosition};
use crate::z_order;

/// A legend entry before placement.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Series header.
    pub label: String,
    /// Series color.
    pub color: Color,
    /// Marker kind.
    pub symbol: LegendSymbol,
}

/// The marker that best represents the visible content kinds: points win over
/// lines, and bars or areas fall back to a swatch.
pub fn legend_symbol(style: &ChartStyle) -> LegendSymbol {
    if !style.points.visibility.is_never() {
        LegendSymbol::Point(style.points.symbol)
    } else if !style.lines.visibility.is_never() {
        LegendSymbol::Line
    } else {
        LegendSymbol::Swatch
    }
}

/// Builds one item per series, or none when the legend is hidden or there is
/// only one series.
pub fn legend_items(series: &[String], style: &ChartStyle) -> Vec<LegendItem> {
    if series.len() < 2 || style.surrounds.legend == LegendPosition::Hidden {
        return Vec::new();
    }
    let symbol = legend_symbol(style);
    series
        .iter()
        .enumerate()
        .map(|(i, label)| LegendItem {
            label: label.clone(),
            color: style.series_color(i),
            symbol,
        })
        .collect()
}

/// Measured legend: overall size plus each entry's offset from the legend's
/// top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LegendBlock {
    pub(crate) size: Size,
    offsets: Vec<Point>,
    swatch: f64,
    spacing: f64,
    row_height: f64,
    font: TextStyle,
}

impl LegendBlock {
    pub(crate) fn measure(
        items: &[LegendItem],
        vertical: bool,
        max_width: f64,
        font_size: f64,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let font = TextStyle::new(font_size);
        let row_height = measurer.measure("Mg", &font).line_height();
        let swatch = 0.8 * row_height;
        let spacing = 0.5 * font_size;
        let gap = font_size;

        let mut offsets = Vec::with_capacity(items.len());
        let (mut x, mut y) = (0.0_f64, 0.0_f64);
        let mut width = 0.0_f64;
        for item in items {
            let w = swatch + spacing + measurer.measure(&item.label, &font).advance_width;
            if vertical {
                if !offsets.is_empty() {
                    y += row_height + spacing;
                }
                offsets.push(Point::new(0.0, y));
                width = width.max(w);
            } else {
                if x > 0.0 && x + w > max_width {
                    x = 0.0;
                    y += row_height + spacing;
                }
                offsets.push(Point::new(x, y));
                width = width.max(x + w);
                x += w + gap;
            }
        }
        let height = if items.is_empty() { 0.0 } else { y + row_height };
        Self {
            size: Size::new(width, height),
            offsets,
            swatch,
            spacing,
            row_height,
            font,
        }
    }

    /// Places the legend at `origin` and builds its primitive.
    pub(crate) fn primitive(&self, items: &[LegendItem], origin: Point, text_color: Color) -> Primitive {
        let entries = items
            .iter()
            .zip(&self.offsets)
            .map(|(item, offset)| {
                let top = origin.y + offset.y;
                let x = origin.x + offset.x;
                let inset = 0.5 * (self.row_height - self.swatch);
                LegendEntry {
                    swatch: Rect::new(x, top + inset, x + self.swatch, top + inset + self.swatch),
                    symbol: item.symbol,
                    color: item.color,
                    label: TextItem::new(
                        item.label.clone(),
                        Point::new(x + self.swatch + self.spacing, top + 0.5 * self.row_height),
                        self.font.clone(),
                        text_color,
                        TextAnchor::Start,
                        TextBaseline::Middle,
                    ),
                }
            })
            .collect();
        Primitive::new(
            "legend",
            z_order::LEGEND,
            Rect::from_origin_size(origin, self.size),
            PrimitiveKind::Legend(LegendPrimitive { entries }),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use paneplot_text::HeuristicTextMeasurer;

    use super::*;
    use crate::style::{LineStyle, PointStyle, SurroundsStyle, Visibility};
    use crate::symbol::Symbol;

    fn series(n: usize) -> Vec<String> {
        (0..n).map(|i| alloc::format!("s{i}")).collect()
    }

    #[test]
    fn symbol_prefers_points_then_lines() {
        let style = ChartStyle::default();
        assert_eq!(legend_symbol(&style), LegendSymbol::Swatch);
        let style = style.with_lines(LineStyle::default().with_visibility(Visibility::Always));
        assert_eq!(legend_symbol(&style), LegendSymbol::Line);
        let style = style.with_points(
            PointStyle::default()
                .with_visibility(Visibility::Always)
                .with_symbol(Symbol::Square),
        );
        assert_eq!(legend_symbol(&style), LegendSymbol::Point(Symbol::Square));
    }

    #[test]
    fn single_series_or_hidden_has_no_items() {
        let style = ChartStyle::default();
        assert!(legend_items(&series(1), &style).is_empty());
        assert_eq!(legend_items(&series(3), &style).len(), 3);
        let hidden = style.with_surrounds(SurroundsStyle::default().with_legend(LegendPosition::Hidden));
        assert!(legend_items(&series(3), &hidden).is_empty());
    }

    #[test]
    fn horizontal_legend_flows_into_rows() {
        let items = legend_items(&series(6), &ChartStyle::default());
        let wide = LegendBlock::measure(&items, false, 1000.0, 10.0, &HeuristicTextMeasurer);
        let narrow = LegendBlock::measure(&items, false, 60.0, 10.0, &HeuristicTextMeasurer);
        assert!(narrow.size.height > wide.size.height);
        assert!(narrow.size.width <= 60.0);
        let vertical = LegendBlock::measure(&items, true, 1000.0, 10.0, &HeuristicTextMeasurer);
        assert!(vertical.offsets.iter().all(|o| o.x == 0.0));
        let p = vertical.primitive(&items, Point::new(5.0, 5.0), peniko::color::palette::css::BLACK);
        let PrimitiveKind::Legend(legend) = p.kind else {
            panic!("expected a legend");
        };
        assert_eq!(legend.entries.len(), 6);
    }
}
