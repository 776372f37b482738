// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting primitives onto a drawing surface.

use kurbo::{Point, Rect};
use paneplot_text::TextMeasurer;
use peniko::Color;

use crate::primitive::{LegendSymbol, Primitive, PrimitiveKind, StrokeStyle, TextItem};
use crate::symbol::Symbol;

/// The drawing backend a [`PrimitiveRenderer`] paints onto.
///
/// Text measurement comes from the [`TextMeasurer`] supertrait so layout and
/// painting agree on text extents.
pub trait DrawingSurface: TextMeasurer {
    /// Strokes an open polyline.
    fn draw_line(&mut self, points: &[Point], stroke: &StrokeStyle);
    /// Fills and/or strokes a rectangle.
    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<&StrokeStyle>);
    /// Fills a point symbol.
    fn draw_point(&mut self, center: Point, symbol: Symbol, radius: f64, fill: Color);
    /// Fills a closed polygon.
    fn draw_area(&mut self, polygon: &[Point], fill: Color);
    /// Draws one line of text.
    fn draw_text(&mut self, text: &TextItem);
}

/// A stateless interpreter from primitives to draw calls.
///
/// Primitives are painted in slice order; callers sort them first (see
/// [`crate::sort_by_z`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct PrimitiveRenderer;

impl PrimitiveRenderer {
    /// Paints every primitive in `primitives` onto `surface`.
    pub fn render<S: DrawingSurface + ?Sized>(&self, primitives: &[Primitive], surface: &mut S) {
        for p in primitives {
            self.render_one(p, surface);
        }
    }

    fn render_one<S: DrawingSurface + ?Sized>(&self, primitive: &Primitive, surface: &mut S) {
        match &primitive.kind {
            PrimitiveKind::Bar(bar) => {
                surface.draw_rect(bar.rect, Some(bar.fill), None);
                if let Some(label) = &bar.label {
                    surface.draw_text(label);
                }
            }
            PrimitiveKind::LineSeries(line) => {
                for run in line.runs() {
                    surface.draw_line(&run, &line.stroke);
                }
                for (_, label) in &line.labels {
                    surface.draw_text(label);
                }
            }
            PrimitiveKind::AreaSeries(area) => surface.draw_area(&area.polygon, area.fill),
            PrimitiveKind::DataPoint(point) => {
                surface.draw_point(point.center, point.symbol, point.radius, point.fill);
                if let Some(label) = &point.label {
                    surface.draw_text(label);
                }
            }
            PrimitiveKind::ErrorBar(err) => {
                for seg in err.segments() {
                    surface.draw_line(&[seg.p0, seg.p1], &err.stroke);
                }
            }
            PrimitiveKind::Grid(grid) => {
                for l in &grid.lines {
                    surface.draw_line(&[l.p0, l.p1], &grid.stroke);
                }
            }
            PrimitiveKind::Axis(axis) => {
                for l in &axis.rules {
                    surface.draw_line(&[l.p0, l.p1], &axis.stroke);
                }
                for label in &axis.labels {
                    surface.draw_text(label);
                }
            }
            PrimitiveKind::Legend(legend) => {
                for entry in &legend.entries {
                    let c = entry.swatch.center();
                    match entry.symbol {
                        LegendSymbol::Swatch => surface.draw_rect(entry.swatch, Some(entry.color), None),
                        LegendSymbol::Point(symbol) => {
                            let r = 0.5 * entry.swatch.width().min(entry.swatch.height());
                            surface.draw_point(c, symbol, r, entry.color);
                        }
                        LegendSymbol::Line => {
                            let stroke = StrokeStyle::solid(entry.color, 2.0);
                            surface.draw_line(
                                &[Point::new(entry.swatch.x0, c.y), Point::new(entry.swatch.x1, c.y)],
                                &stroke,
                            );
                        }
                    }
                    surface.draw_text(&entry.label);
                }
            }
            PrimitiveKind::Caption(caption) => {
                for line in &caption.lines {
                    surface.draw_text(line);
                }
            }
            PrimitiveKind::Label(text) => surface.draw_text(text),
            PrimitiveKind::Box(b) => {
                surface.draw_rect(b.rect, b.fill, b.stroke.as_ref());
                for line in &b.lines {
                    surface.draw_text(line);
                }
            }
            PrimitiveKind::Arrow(arrow) => {
                surface.draw_line(&[arrow.from, arrow.to], &arrow.stroke);
                for stroke in arrow.head() {
                    surface.draw_line(&stroke, &arrow.stroke);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use paneplot_text::{HeuristicTextMeasurer, TextMetrics, TextStyle};
    use peniko::color::palette::css;

    use super::*;
    use crate::primitive::{
        BarPrimitive, BoxPrimitive, LineSeriesPrimitive, TextAnchor, TextBaseline,
    };

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        texts: Vec<TextItem>,
    }

    impl TextMeasurer for Recorder {
        fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
            HeuristicTextMeasurer.measure(text, style)
        }
    }

    impl DrawingSurface for Recorder {
        fn draw_line(&mut self, points: &[Point], _: &StrokeStyle) {
            self.calls.push(alloc::format!("line{}", points.len()));
        }
        fn draw_rect(&mut self, _: Rect, _: Option<Color>, _: Option<&StrokeStyle>) {
            self.calls.push(String::from("rect"));
        }
        fn draw_point(&mut self, _: Point, _: Symbol, _: f64, _: Color) {
            self.calls.push(String::from("point"));
        }
        fn draw_area(&mut self, _: &[Point], _: Color) {
            self.calls.push(String::from("area"));
        }
        fn draw_text(&mut self, text: &TextItem) {
            self.calls.push(String::from("text"));
            self.texts.push(text.clone());
        }
    }

    #[test]
    fn renders_in_slice_order() {
        let bar = Primitive::new(
            "bar",
            0,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            PrimitiveKind::Bar(BarPrimitive {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                fill: css::RED,
                label: None,
            }),
        );
        let line = Primitive::new(
            "line",
            10,
            Rect::ZERO,
            PrimitiveKind::LineSeries(LineSeriesPrimitive {
                vertices: vec![
                    Some(Point::ZERO),
                    Some(Point::new(1.0, 1.0)),
                    Some(Point::new(2.0, 0.0)),
                ],
                join_gaps: false,
                stroke: StrokeStyle::default(),
                labels: Vec::new(),
            }),
        );
        let mut surface = Recorder::default();
        PrimitiveRenderer.render(&[bar, line], &mut surface);
        assert_eq!(surface.calls, ["rect", "line3"]);
    }

    #[test]
    fn box_draws_outline_before_its_lines() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let line = TextItem::new(
            "note",
            Point::new(100.0, 45.0),
            TextStyle::new(10.0),
            css::BLACK,
            TextAnchor::Middle,
            TextBaseline::Top,
        );
        let b = Primitive::new(
            "box",
            90,
            rect,
            PrimitiveKind::Box(BoxPrimitive {
                rect,
                fill: None,
                stroke: Some(StrokeStyle::default()),
                lines: vec![line.clone()],
            }),
        );
        let mut surface = Recorder::default();
        PrimitiveRenderer.render(&[b], &mut surface);
        assert_eq!(surface.calls, ["rect", "text"]);
        assert_eq!(surface.texts, [line]);
    }
}
