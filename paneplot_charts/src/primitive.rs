// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready drawing primitives.
//!
//! Every primitive is fully measured: a renderer only needs to issue draw
//! calls. Primitives are regenerated on every pass and carry no identity
//! beyond their string key.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use paneplot_text::TextStyle;
use peniko::Color;
use peniko::color::palette::css;

use crate::symbol::Symbol;

/// A stroke color and width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor point.
    #[default]
    Start,
    /// Text is centered on the anchor point.
    Middle,
    /// Text ends at the anchor point.
    End,
}

/// Vertical text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor point is the top of the line box.
    Top,
    /// The anchor point is the middle of the line box.
    #[default]
    Middle,
    /// The anchor point is the bottom of the line box.
    Bottom,
}

/// A single positioned line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    /// The text.
    pub text: String,
    /// Anchor point.
    pub position: Point,
    /// Font settings.
    pub style: TextStyle,
    /// Fill color.
    pub color: Color,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `position` (clockwise, screen space).
    pub rotation: f64,
}

impl TextItem {
    /// Creates an unrotated text item.
    pub fn new(
        text: impl Into<String>,
        position: Point,
        style: TextStyle,
        color: Color,
        anchor: TextAnchor,
        baseline: TextBaseline,
    ) -> Self {
        Self {
            text: text.into(),
            position,
            style,
            color,
            anchor,
            baseline,
            rotation: 0.0,
        }
    }

    /// Sets the rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Returns the unrotated box of this text given its measured size.
    pub fn bounds(&self, width: f64, height: f64) -> Rect {
        let Point { x, y } = self.position;
        let (x0, x1) = match self.anchor {
            TextAnchor::Start => (x, x + width),
            TextAnchor::Middle => (x - 0.5 * width, x + 0.5 * width),
            TextAnchor::End => (x - width, x),
        };
        let (y0, y1) = match self.baseline {
            TextBaseline::Top => (y, y + height),
            TextBaseline::Middle => (y - 0.5 * height, y + 0.5 * height),
            TextBaseline::Bottom => (y - height, y),
        };
        Rect::new(x0, y0, x1, y1)
    }
}

/// A single bar.
#[derive(Clone, Debug, PartialEq)]
pub struct BarPrimitive {
    /// Bar rectangle.
    pub rect: Rect,
    /// Fill color.
    pub fill: Color,
    /// Data label owned by this bar.
    pub label: Option<TextItem>,
}

/// One series drawn as a polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeriesPrimitive {
    /// One vertex per dimension value; `None` where the value is absent.
    pub vertices: Vec<Option<Point>>,
    /// Whether absent vertices are skipped rather than breaking the path.
    pub join_gaps: bool,
    /// Stroke style.
    pub stroke: StrokeStyle,
    /// Data labels, keyed by vertex index.
    pub labels: Vec<(usize, TextItem)>,
}

impl LineSeriesPrimitive {
    /// Returns the connected runs to draw.
    ///
    /// Runs of a single vertex are dropped.
    pub fn runs(&self) -> Vec<Vec<Point>> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for v in &self.vertices {
            match v {
                Some(p) => current.push(*p),
                None if self.join_gaps => {}
                None => {
                    if current.len() > 1 {
                        out.push(core::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            out.push(current);
        }
        out
    }
}

/// Which of two series leads within a diff-area polygon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeriesOrder {
    /// The first series is above the second.
    Over,
    /// The first series is below the second.
    Under,
    /// Both series are equal.
    Equal,
}

impl SeriesOrder {
    /// Compares two values.
    pub fn of(first: f64, second: f64) -> Self {
        if first > second {
            Self::Over
        } else if first < second {
            Self::Under
        } else {
            Self::Equal
        }
    }
}

/// A filled polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaPrimitive {
    /// Closed polygon (the closing edge is implicit).
    pub polygon: Vec<Point>,
    /// Fill color, opacity included.
    pub fill: Color,
    /// For diff areas, which series leads in this polygon.
    pub order: Option<SeriesOrder>,
}

/// A data point marker.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPointPrimitive {
    /// Center.
    pub center: Point,
    /// Marker shape.
    pub symbol: Symbol,
    /// Marker radius.
    pub radius: f64,
    /// Fill color.
    pub fill: Color,
    /// Data label owned by this point.
    pub label: Option<TextItem>,
}

/// A vertical error bar with caps.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorBarPrimitive {
    /// Horizontal center.
    pub x: f64,
    /// Pixel y of the upper bound.
    pub top: f64,
    /// Pixel y of the lower bound.
    pub bottom: f64,
    /// Total width of each cap.
    pub cap_width: f64,
    /// Stroke style.
    pub stroke: StrokeStyle,
}

impl ErrorBarPrimitive {
    /// Returns the stem and both caps.
    pub fn segments(&self) -> [Line; 3] {
        let h = 0.5 * self.cap_width;
        [
            Line::new((self.x, self.top), (self.x, self.bottom)),
            Line::new((self.x - h, self.top), (self.x + h, self.top)),
            Line::new((self.x - h, self.bottom), (self.x + h, self.bottom)),
        ]
    }
}

/// Straight guide lines sharing one stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPrimitive {
    /// Line segments.
    pub lines: Vec<Line>,
    /// Stroke style.
    pub stroke: StrokeStyle,
}

/// An axis: rule, ticks and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisPrimitive {
    /// Domain rule and tick marks.
    pub rules: Vec<Line>,
    /// Stroke style for rules.
    pub stroke: StrokeStyle,
    /// Tick labels, header and title text.
    pub labels: Vec<TextItem>,
}

/// Marker drawn next to a legend label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LegendSymbol {
    /// Filled square swatch.
    Swatch,
    /// A point symbol.
    Point(Symbol),
    /// A short line segment.
    Line,
}

/// A positioned legend entry.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    /// Box reserved for the symbol.
    pub swatch: Rect,
    /// Symbol kind.
    pub symbol: LegendSymbol,
    /// Series color.
    pub color: Color,
    /// Label.
    pub label: TextItem,
}

/// The series legend.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendPrimitive {
    /// Entries in series order.
    pub entries: Vec<LegendEntry>,
}

/// A multi-line text block (caption, subcaption, footnote).
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionPrimitive {
    /// One item per wrapped line.
    pub lines: Vec<TextItem>,
}

/// A free-form rectangle, optionally with centered text.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxPrimitive {
    /// Rectangle.
    pub rect: Rect,
    /// Optional fill.
    pub fill: Option<Color>,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
    /// Caption lines, already wrapped and centered in `rect`.
    pub lines: Vec<TextItem>,
}

/// A free-form arrow.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowPrimitive {
    /// Tail.
    pub from: Point,
    /// Head.
    pub to: Point,
    /// Length of the head strokes.
    pub head_size: f64,
    /// Stroke style.
    pub stroke: StrokeStyle,
}

impl ArrowPrimitive {
    /// Returns the two head strokes, each as a `[start, tip]` pair.
    pub fn head(&self) -> [[Point; 2]; 2] {
        let d = self.to - self.from;
        let len = d.hypot();
        if len == 0.0 {
            return [[self.to, self.to], [self.to, self.to]];
        }
        let u = d / len;
        let n = kurbo::Vec2::new(-u.y, u.x);
        let back = self.to - u * self.head_size;
        let half = 0.5 * self.head_size;
        [[back + n * half, self.to], [back - n * half, self.to]]
    }
}

/// Kind-specific payload of a [`Primitive`].
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveKind {
    /// A bar.
    Bar(BarPrimitive),
    /// A line series.
    LineSeries(LineSeriesPrimitive),
    /// A filled area.
    AreaSeries(AreaPrimitive),
    /// A data point.
    DataPoint(DataPointPrimitive),
    /// An error bar.
    ErrorBar(ErrorBarPrimitive),
    /// Grid lines.
    Grid(GridPrimitive),
    /// An axis.
    Axis(AxisPrimitive),
    /// The legend.
    Legend(LegendPrimitive),
    /// A caption block.
    Caption(CaptionPrimitive),
    /// A standalone label (pane and lane headers).
    Label(TextItem),
    /// An annotation box.
    Box(BoxPrimitive),
    /// An annotation arrow.
    Arrow(ArrowPrimitive),
}

/// A render-ready drawable.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    /// Stable, human-readable key (for example `p0/t0/l0/bar/s1/d3`).
    pub key: String,
    /// Paint order; lower values are painted first.
    pub z_index: i32,
    /// Bounding rectangle.
    pub bounds: Rect,
    /// Geometry and style.
    pub kind: PrimitiveKind,
}

impl Primitive {
    /// Creates a primitive.
    pub fn new(key: impl Into<String>, z_index: i32, bounds: Rect, kind: PrimitiveKind) -> Self {
        Self {
            key: key.into(),
            z_index,
            bounds,
            kind,
        }
    }
}

/// Sorts primitives by paint order, keeping generation order among equals.
pub fn sort_by_z(primitives: &mut [Primitive]) {
    primitives.sort_by_key(|p| p.z_index);
}

/// Returns the bounding box of `points`, or `None` if empty.
pub(crate) fn points_bounds<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Rect> {
    points.into_iter().fold(None, |acc: Option<Rect>, p| {
        Some(match acc {
            Some(r) => r.union_pt(*p),
            None => Rect::from_points(*p, *p),
        })
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn line_runs_split_on_gaps() {
        let p = |x: f64| Some(Point::new(x, 0.0));
        let mut line = LineSeriesPrimitive {
            vertices: vec![p(0.0), p(1.0), None, p(3.0), None, p(5.0), p(6.0)],
            join_gaps: false,
            stroke: StrokeStyle::default(),
            labels: Vec::new(),
        };
        let runs = line.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1], [Point::new(5.0, 0.0), Point::new(6.0, 0.0)]);

        line.join_gaps = true;
        assert_eq!(line.runs().len(), 1);
        assert_eq!(line.runs()[0].len(), 5);
    }

    #[test]
    fn sort_is_stable_within_z() {
        let mk = |key: &str, z| {
            Primitive::new(
                key,
                z,
                Rect::ZERO,
                PrimitiveKind::Grid(GridPrimitive {
                    lines: Vec::new(),
                    stroke: StrokeStyle::default(),
                }),
            )
        };
        let mut prims = vec![mk("a", 10), mk("b", 0), mk("c", 10), mk("d", 0)];
        sort_by_z(&mut prims);
        let keys: Vec<_> = prims.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, ["b", "d", "a", "c"]);
    }

    #[test]
    fn text_bounds_follow_anchor() {
        let t = TextItem::new(
            "x",
            Point::new(10.0, 10.0),
            TextStyle::default(),
            css::BLACK,
            TextAnchor::Middle,
            TextBaseline::Bottom,
        );
        assert_eq!(t.bounds(4.0, 2.0), Rect::new(8.0, 8.0, 12.0, 10.0));
    }

    #[test]
    fn arrow_head_ends_at_tip() {
        let a = ArrowPrimitive {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 0.0),
            head_size: 4.0,
            stroke: StrokeStyle::default(),
        };
        let [left, right] = a.head();
        assert_eq!(left[1], a.to);
        assert_eq!(right[0], Point::new(6.0, -2.0));
    }
}
