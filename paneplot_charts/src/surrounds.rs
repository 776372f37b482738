// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Blocks around the pane grid: caption, subcaption, footnote and legend.
//!
//! Each block is wrapped to the figure width, placed against one edge of the
//! remaining space and followed by a gap. What is left is the content
//! rectangle handed to pane layout.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use paneplot_text::{TextMeasurer, TextStyle};
use peniko::Color;

use crate::geometry::{take_bottom, take_right, take_top};
use crate::legend::{LegendBlock, legend_items};
use crate::primitive::{CaptionPrimitive, Primitive, PrimitiveKind, TextAnchor, TextBaseline, TextItem};
use crate::style::{ChartStyle, LegendPosition};
use crate::z_order;

/// Measured surrounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Surrounds {
    /// Space left for the pane grid.
    pub content: Rect,
    /// Caption, footnote and legend primitives.
    pub primitives: Vec<Primitive>,
}

fn text_block(
    key: &str,
    text: &str,
    style: TextStyle,
    color: Color,
    rect: Rect,
    measurer: &dyn TextMeasurer,
) -> (f64, impl FnOnce(f64) -> Primitive) {
    let block = measurer.measure_block(text, &style, rect.width());
    let height = block.height;
    let key = String::from(key);
    let x = rect.x0;
    let build = move |top: f64| {
        let lines: Vec<TextItem> = block
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                TextItem::new(
                    line.clone(),
                    Point::new(x, top + i as f64 * block.line_height),
                    style.clone(),
                    color,
                    TextAnchor::Start,
                    TextBaseline::Top,
                )
            })
            .collect();
        Primitive::new(
            key,
            z_order::CAPTIONS,
            Rect::new(x, top, x + block.width, top + block.height),
            PrimitiveKind::Caption(CaptionPrimitive { lines }),
        )
    };
    (height, build)
}

/// Measures the surrounds of a `figure`-sized chart with the given series.
pub fn measure_surrounds(
    figure: Rect,
    series: &[String],
    style: &ChartStyle,
    measurer: &dyn TextMeasurer,
) -> Surrounds {
    let s = &style.surrounds;
    let margin = style.layout.margin;
    let (x0, y0) = (figure.x0 + margin, figure.y0 + margin);
    let mut rest = Rect::new(x0, y0, (figure.x1 - margin).max(x0), (figure.y1 - margin).max(y0));
    let mut primitives = Vec::new();
    let color = style.text_color;

    let top_blocks = [
        ("caption", s.caption.as_deref(), TextStyle::new(s.caption_font_size).bold()),
        ("subcaption", s.subcaption.as_deref(), TextStyle::new(s.subcaption_font_size)),
    ];
    for (key, text, text_style) in top_blocks {
        let Some(text) = text else { continue };
        let (h, build) = text_block(key, text, text_style, color, rest, measurer);
        let taken = take_top(&mut rest, h + s.gap);
        primitives.push(build(taken.y0));
    }
    if let Some(text) = s.footnote.as_deref() {
        let ts = TextStyle::new(s.footnote_font_size).italic();
        let (h, build) = text_block("footnote", text, ts, color, rest, measurer);
        let taken = take_bottom(&mut rest, h + s.gap);
        primitives.push(build(taken.y1 - h));
    }

    let items = legend_items(series, style);
    if !items.is_empty() {
        let vertical = s.legend == LegendPosition::Right;
        let block = LegendBlock::measure(&items, vertical, rest.width(), s.legend_font_size, measurer);
        let origin = match s.legend {
            LegendPosition::Top => {
                let taken = take_top(&mut rest, block.size.height + s.gap);
                Point::new(taken.x0, taken.y0)
            }
            LegendPosition::Right => {
                let taken = take_right(&mut rest, block.size.width + s.gap);
                Point::new(taken.x1 - block.size.width, taken.y0)
            }
            LegendPosition::Bottom | LegendPosition::Hidden => {
                let taken = take_bottom(&mut rest, block.size.height + s.gap);
                Point::new(taken.x0, taken.y1 - block.size.height)
            }
        };
        primitives.push(block.primitive(&items, origin, color));
    }

    tracing::debug!(
        blocks = primitives.len(),
        width = rest.width(),
        height = rest.height(),
        "measured surrounds"
    );
    Surrounds {
        content: rest,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use paneplot_text::{FontStyle, HeuristicTextMeasurer};

    use super::*;
    use crate::style::SurroundsStyle;

    fn series() -> Vec<String> {
        vec![String::from("North"), String::from("South")]
    }

    #[test]
    fn empty_surrounds_keep_the_margin() {
        let style = ChartStyle::default();
        let figure = Rect::new(0.0, 0.0, 400.0, 300.0);
        let s = measure_surrounds(figure, &series()[..1], &style, &HeuristicTextMeasurer);
        assert!(s.primitives.is_empty());
        assert_eq!(s.content, Rect::new(12.0, 12.0, 388.0, 288.0));
    }

    #[test]
    fn blocks_shrink_content() {
        let style = ChartStyle::default().with_surrounds(
            SurroundsStyle::default()
                .with_caption("Sales by region")
                .with_subcaption("Monthly")
                .with_footnote("Source: ledger"),
        );
        let figure = Rect::new(0.0, 0.0, 400.0, 300.0);
        let s = measure_surrounds(figure, &series(), &style, &HeuristicTextMeasurer);
        let keys: Vec<_> = s.primitives.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["caption", "subcaption", "footnote", "legend"]);
        for p in &s.primitives {
            assert_eq!(p.bounds.intersect(s.content).area(), 0.0);
        }
        assert!(s.content.y0 > 12.0);
        assert!(s.content.y1 < 288.0);
    }

    #[test]
    fn footnote_is_set_in_italics() {
        let style = ChartStyle::default()
            .with_surrounds(SurroundsStyle::default().with_footnote("Source: ledger"));
        let figure = Rect::new(0.0, 0.0, 400.0, 300.0);
        let s = measure_surrounds(figure, &series()[..1], &style, &HeuristicTextMeasurer);
        let PrimitiveKind::Caption(block) = &s.primitives[0].kind else {
            panic!("expected a caption block");
        };
        assert!(block.lines.iter().all(|l| l.style.font_style == FontStyle::Italic));
    }

    #[test]
    fn right_legend_takes_width() {
        let style = ChartStyle::default()
            .with_surrounds(SurroundsStyle::default().with_legend(LegendPosition::Right));
        let figure = Rect::new(0.0, 0.0, 400.0, 300.0);
        let s = measure_surrounds(figure, &series(), &style, &HeuristicTextMeasurer);
        assert!(s.content.x1 < 388.0);
        assert_eq!(s.content.y1, 288.0);
        assert!(s.primitives[0].bounds.x0 >= s.content.x1);
    }
}
