// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG drawing surface for `paneplot_charts_demo`.

use std::fmt::Write as _;

use kurbo::{Point, Rect, Size};
use paneplot_charts::{DrawingSurface, StrokeStyle, Symbol, TextAnchor, TextBaseline, TextItem};
use paneplot_text::{FontStyle, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
use peniko::Color;

/// Accumulates SVG elements in draw order.
#[derive(Debug)]
pub(crate) struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    pub(crate) fn finish(self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.size.width,
            h = self.size.height,
        );
        let _ = writeln!(
            out,
            r##"<rect width="{}" height="{}" fill="#ffffff"/>"##,
            self.size.width, self.size.height
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl TextMeasurer for SvgSurface {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        HeuristicTextMeasurer.measure(text, style)
    }
}

impl DrawingSurface for SvgSurface {
    fn draw_line(&mut self, points: &[Point], stroke: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        self.body.push_str(r#"<polyline points=""#);
        write_points(&mut self.body, points);
        self.body.push_str(r#"" fill="none""#);
        write_stroke(&mut self.body, stroke);
        self.body.push_str("/>\n");
    }

    fn draw_rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<&StrokeStyle>) {
        let r = rect.abs();
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        );
        match fill {
            Some(c) => write_paint_attr(&mut self.body, "fill", c),
            None => self.body.push_str(r#" fill="none""#),
        }
        if let Some(s) = stroke {
            write_stroke(&mut self.body, s);
        }
        self.body.push_str("/>\n");
    }

    fn draw_point(&mut self, center: Point, symbol: Symbol, radius: f64, fill: Color) {
        match symbol {
            Symbol::Circle => {
                let _ = write!(
                    self.body,
                    r#"<circle cx="{}" cy="{}" r="{radius}""#,
                    center.x, center.y
                );
            }
            Symbol::Square => {
                let b = symbol.bounds(center.x, center.y, radius);
                let _ = write!(
                    self.body,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    b.x0,
                    b.y0,
                    b.width(),
                    b.height()
                );
            }
        }
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    fn draw_area(&mut self, polygon: &[Point], fill: Color) {
        if polygon.len() < 3 {
            return;
        }
        self.body.push_str(r#"<polygon points=""#);
        write_points(&mut self.body, polygon);
        self.body.push('"');
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    fn draw_text(&mut self, t: &TextItem) {
        let baseline = match t.baseline {
            TextBaseline::Top => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "text-after-edge",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" dominant-baseline="{}""#,
            t.position.x,
            t.position.y,
            escape_xml(t.style.font_family.as_css_family()),
            t.style.font_size,
            baseline
        );
        if t.style.font_weight.0 != 400 {
            let _ = write!(self.body, r#" font-weight="{}""#, t.style.font_weight.0);
        }
        match t.style.font_style {
            FontStyle::Normal => {}
            FontStyle::Italic => self.body.push_str(r#" font-style="italic""#),
            FontStyle::Oblique => self.body.push_str(r#" font-style="oblique""#),
        }
        if t.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {} {})""#,
                t.rotation, t.position.x, t.position.y
            );
        }
        self.body.push_str(match t.anchor {
            TextAnchor::Start => r#" text-anchor="start""#,
            TextAnchor::Middle => r#" text-anchor="middle""#,
            TextAnchor::End => r#" text-anchor="end""#,
        });
        write_paint_attr(&mut self.body, "fill", t.color);
        self.body.push('>');
        self.body.push_str(&escape_xml(&t.text));
        self.body.push_str("</text>\n");
    }
}

fn write_points(out: &mut String, points: &[Point]) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    write_paint_attr(out, "stroke", stroke.color);
    let _ = write!(out, r#" stroke-width="{}""#, stroke.width);
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
