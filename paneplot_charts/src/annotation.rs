// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Free-form annotations: boxes and arrows in figure coordinates.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use paneplot_text::{TextMeasurer, TextStyle};
use peniko::Color;
use peniko::color::palette::css;

use crate::primitive::{
    ArrowPrimitive, BoxPrimitive, Primitive, PrimitiveKind, StrokeStyle, TextAnchor,
    TextBaseline, TextItem,
};
use crate::z_order;

/// A non-data shape drawn over the chart.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// A rectangle with optional centered text.
    Box {
        /// Rectangle.
        rect: Rect,
        /// Optional text.
        text: Option<String>,
        /// Optional fill.
        fill: Option<Color>,
        /// Outline.
        stroke: StrokeStyle,
        /// Font size for `text`.
        font_size: f64,
    },
    /// An arrow from `from` to `to`.
    Arrow {
        /// Tail.
        from: Point,
        /// Head.
        to: Point,
        /// Stroke.
        stroke: StrokeStyle,
        /// Head stroke length.
        head_size: f64,
    },
}

impl Annotation {
    /// A stroked box with text.
    pub fn boxed(rect: Rect, text: impl Into<String>) -> Self {
        Self::Box {
            rect,
            text: Some(text.into()),
            fill: Some(css::WHITE),
            stroke: StrokeStyle::default(),
            font_size: 11.0,
        }
    }

    /// A black arrow.
    pub fn arrow(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Self::Arrow {
            from: from.into(),
            to: to.into(),
            stroke: StrokeStyle::default(),
            head_size: 8.0,
        }
    }

    /// Builds the primitive for this annotation. Box text is wrapped to the
    /// box width and centered in it.
    pub(crate) fn primitive(
        &self,
        index: usize,
        text_color: Color,
        measurer: &dyn TextMeasurer,
    ) -> Primitive {
        let key = format!("annotation/{index}");
        match self {
            Self::Box {
                rect,
                text,
                fill,
                stroke,
                font_size,
            } => Primitive::new(
                key,
                z_order::ANNOTATIONS,
                *rect,
                PrimitiveKind::Box(BoxPrimitive {
                    rect: *rect,
                    fill: *fill,
                    stroke: Some(*stroke),
                    lines: text.as_deref().map_or_else(Vec::new, |t| {
                        centered_lines(t, *rect, TextStyle::new(*font_size), text_color, measurer)
                    }),
                }),
            ),
            Self::Arrow {
                from,
                to,
                stroke,
                head_size,
            } => {
                let arrow = ArrowPrimitive {
                    from: *from,
                    to: *to,
                    head_size: *head_size,
                    stroke: *stroke,
                };
                let pad = 0.5 * head_size;
                let bounds = Rect::from_points(*from, *to).inflate(pad, pad);
                Primitive::new(key, z_order::ANNOTATIONS, bounds, PrimitiveKind::Arrow(arrow))
            }
        }
    }
}

fn centered_lines(
    text: &str,
    rect: Rect,
    style: TextStyle,
    color: Color,
    measurer: &dyn TextMeasurer,
) -> Vec<TextItem> {
    let block = measurer.measure_block(text, &style, rect.width());
    let center = rect.center();
    let top = center.y - 0.5 * block.height;
    block
        .lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            TextItem::new(
                line,
                Point::new(center.x, top + i as f64 * block.line_height),
                style.clone(),
                color,
                TextAnchor::Middle,
                TextBaseline::Top,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use paneplot_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn box_text_is_wrapped_and_centered_at_build_time() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let p = Annotation::boxed(rect, "note").primitive(0, css::BLACK, &HeuristicTextMeasurer);
        assert_eq!(p.key, "annotation/0");
        let PrimitiveKind::Box(b) = p.kind else {
            panic!("expected a box");
        };
        assert_eq!(b.lines.len(), 1);
        assert_eq!(b.lines[0].position.x, 100.0);
        // One 11px line: 0.8 + 0.2 em.
        assert!((b.lines[0].position.y - 44.5).abs() < 1e-9);
    }

    #[test]
    fn long_box_text_wraps_to_the_box_width() {
        let rect = Rect::new(0.0, 0.0, 60.0, 80.0);
        let p = Annotation::boxed(rect, "ahead of plan this month")
            .primitive(1, css::BLACK, &HeuristicTextMeasurer);
        let PrimitiveKind::Box(b) = p.kind else {
            panic!("expected a box");
        };
        assert!(b.lines.len() > 1);
        let first = b.lines[0].position.y;
        let last = b.lines[b.lines.len() - 1].position.y;
        // The block is centered: its top and bottom are equally far from y = 40.
        assert!((first + last + 11.0 - 80.0).abs() < 1e-9);
        assert!(b.lines.windows(2).all(|w| w[0].position.y < w[1].position.y));
    }
}
