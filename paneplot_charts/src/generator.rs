// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive generation.
//!
//! Every plot area is walked in dimension-then-series order. For each cell
//! the content kinds (bars, lines, areas, points) and the data label are
//! resolved once through the style's [`Visibility`](crate::Visibility)
//! values; a cell's label belongs to exactly one content kind, with points
//! taking precedence over bars and bars over lines. Lines and areas are
//! accumulated per series and flushed after the loop.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Line, Point, Rect};
use paneplot_text::TextStyle;
use paneplot_transforms::{CellIndex, Headers};

use crate::areas::{AreaRunBuilder, DiffAreaBuilder, DiffSample, area_primitive, cumulative};
use crate::axis::{x_axis_primitive, y_axis_primitive, y_title_item};
use crate::bars::{BarPlacer, StackState, bar_label};
use crate::coords::CoordinateMapper;
use crate::error::{ChartError, ChartResult};
use crate::format::PatternCache;
use crate::layout::{MeasuredPane, PaneLayout, PlotArea};
use crate::lines::LineBuilder;
use crate::points::point_primitive;
use crate::primitive::{
    BarPrimitive, GridPrimitive, Primitive, PrimitiveKind, SeriesOrder, StrokeStyle, TextAnchor,
    TextBaseline, TextItem,
};
use crate::style::{AreaAnchor, BarMode, ChartStyle, ValueInfo};
use crate::z_order;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Content {
    Bar,
    Line,
    Area,
    Point,
    Label,
}

/// Turns a laid-out figure into primitives.
///
/// Visibility callbacks run at most once per content kind and cell, and
/// label patterns are compiled once, for the lifetime of the generator.
#[derive(Debug)]
pub struct PrimitiveGenerator<'a> {
    headers: &'a Headers,
    style: &'a ChartStyle,
    visible: HashMap<(Content, CellIndex), bool>,
    patterns: PatternCache,
}

impl<'a> PrimitiveGenerator<'a> {
    /// Creates a generator for one pass.
    pub fn new(headers: &'a Headers, style: &'a ChartStyle) -> Self {
        Self {
            headers,
            style,
            visible: HashMap::new(),
            patterns: PatternCache::new(),
        }
    }

    fn info(&self, cell: CellIndex, value: f64) -> ValueInfo<'a> {
        let h = self.headers;
        let name = |list: &'a [String], i: usize| list.get(i).map_or("", String::as_str);
        ValueInfo {
            cell,
            pane: name(&h.panes, cell.pane),
            tier: name(&h.tiers, cell.tier),
            lane: name(&h.lanes, cell.lane),
            series: name(&h.series, cell.series),
            dimension: name(&h.dimensions, cell.dimension),
            value,
        }
    }

    /// Whether `content` is drawn for `cell`. Absent values are never drawn.
    fn is_visible(&mut self, content: Content, cell: CellIndex, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return false;
        };
        if let Some(v) = self.visible.get(&(content, cell)) {
            return *v;
        }
        let style = self.style;
        let visibility = match content {
            Content::Bar => &style.bars.visibility,
            Content::Line => &style.lines.visibility,
            Content::Area => &style.areas.visibility,
            Content::Point => &style.points.visibility,
            Content::Label => &style.labels.visibility,
        };
        let v = visibility.resolve(&self.info(cell, value));
        self.visible.insert((content, cell), v);
        v
    }

    fn label_text(&mut self, cell: CellIndex, value: f64) -> String {
        let labels = &self.style.labels;
        match &labels.formatter {
            Some(f) => f(&self.info(cell, value)),
            None => self.patterns.format(&labels.pattern, value),
        }
    }

    /// Generates every guide and content primitive for `layout`.
    pub fn generate(&mut self, layout: &PaneLayout) -> ChartResult<Vec<Primitive>> {
        let mut out = Vec::new();
        for pane in &layout.panes {
            self.pane_guides(pane, &mut out);
            for area in &pane.plot_areas {
                self.plot_area(pane, area, &mut out)?;
            }
        }
        tracing::debug!(primitives = out.len(), "generated primitives");
        Ok(out)
    }

    fn header_label(&self, key: String, text: &str, rect: Rect) -> Primitive {
        let item = TextItem::new(
            text,
            rect.center(),
            TextStyle::new(self.style.layout.header_font_size).bold(),
            self.style.text_color,
            TextAnchor::Middle,
            TextBaseline::Middle,
        );
        Primitive::new(key, z_order::HEADERS, rect, PrimitiveKind::Label(item))
    }

    /// Headers and axes of one pane.
    fn pane_guides(&self, pane: &MeasuredPane, out: &mut Vec<Primitive>) {
        let p = pane.index;
        let style = self.style;
        let color = style.text_color;

        if let (Some(rect), Some(text)) = (pane.header, self.headers.panes.get(p)) {
            out.push(self.header_label(format!("p{p}/header"), text, rect));
        }
        for (l, rect) in pane.lane_header_rects.iter().enumerate() {
            if let Some(text) = self.headers.lanes.get(l) {
                out.push(self.header_label(format!("p{p}/l{l}/header"), text, *rect));
            }
        }
        if let Some(title) = y_title_item(&pane.y_axis, pane.y_axis_column, &style.y_axis, color) {
            out.push(Primitive::new(
                format!("p{p}/y-title"),
                z_order::AXES,
                pane.y_axis_column,
                PrimitiveKind::Label(title),
            ));
        }
        for (t, rect) in pane.y_axis_rects.iter().enumerate() {
            let Some(ticks) = pane.y_axis.tiers.get(t) else {
                continue;
            };
            let scale = ticks.scale(rect.y1, rect.y0);
            let axis = y_axis_primitive(
                &pane.y_axis,
                t,
                *rect,
                &scale,
                self.headers.tiers.get(t).map(String::as_str),
                &style.y_axis,
                color,
            );
            out.push(Primitive::new(
                format!("p{p}/t{t}/y-axis"),
                z_order::AXES,
                *rect,
                PrimitiveKind::Axis(axis),
            ));
        }
        for (l, rect) in pane.x_axis_rects.iter().enumerate() {
            let axis = x_axis_primitive(&pane.x_axis, *rect, &style.x_axis, color);
            out.push(Primitive::new(
                format!("p{p}/l{l}/x-axis"),
                z_order::AXES,
                *rect,
                PrimitiveKind::Axis(axis),
            ));
        }
    }

    /// Grid lines and data content of one plot area.
    fn plot_area(
        &mut self,
        pane: &MeasuredPane,
        area: &PlotArea,
        out: &mut Vec<Primitive>,
    ) -> ChartResult<()> {
        let style = self.style;
        let (p, t, l) = (pane.index, area.tier, area.lane);
        let prefix = format!("p{p}/t{t}/l{l}");
        let Some(ticks) = pane.y_axis.tiers.get(t) else {
            return Err(ChartError::InternalInvariant(format!(
                "pane {p} has no ticks for tier {t}"
            )));
        };
        let mapper = CoordinateMapper::new(area.rect, pane.x_axis.bands(), ticks);
        let rect = area.rect;
        let grid_stroke = StrokeStyle::solid(style.grid_color, style.layout.grid_stroke_width);

        if style.y_axis.grid {
            let ys = area.attach_grid_lines(ticks.values.iter().map(|v| mapper.y(*v)).collect());
            let lines = ys
                .iter()
                .map(|y| Line::new((rect.x0, *y), (rect.x1, *y)))
                .collect();
            out.push(Primitive::new(
                format!("{prefix}/grid"),
                z_order::GRID_LINES,
                rect,
                PrimitiveKind::Grid(GridPrimitive {
                    lines,
                    stroke: grid_stroke,
                }),
            ));
        }
        if style.x_axis.grid {
            let bands = mapper.bands();
            let lines = (1..bands.count)
                .map(|i| bands.boundary(i))
                .map(|x| Line::new((x, rect.y0), (x, rect.y1)))
                .collect();
            out.push(Primitive::new(
                format!("{prefix}/x-grid"),
                z_order::GRID_LINES,
                rect,
                PrimitiveKind::Grid(GridPrimitive {
                    lines,
                    stroke: grid_stroke,
                }),
            ));
        }

        self.content(&prefix, CellIndex::new(p, t, l, 0, 0), area, &mapper, out)
    }

    fn content(
        &mut self,
        prefix: &str,
        origin: CellIndex,
        area: &PlotArea,
        mapper: &CoordinateMapper,
        out: &mut Vec<Primitive>,
    ) -> ChartResult<()> {
        let style = self.style;
        let bars = &style.bars;
        let areas = &style.areas;
        let series_count = area.values.len();
        let dims = area.values.first().map_or(0, Vec::len);
        let bars_on = !bars.visibility.is_never();
        let areas_on = !areas.visibility.is_never();

        if bars_on && bars.mode == BarMode::Uncertainty && series_count < 3 {
            return Err(ChartError::InputShape(format!(
                "uncertainty bars need at least 3 series, found {series_count}"
            )));
        }
        if areas_on && areas.diff && series_count != 2 {
            return Err(ChartError::InputShape(format!(
                "diff areas need exactly 2 series, found {series_count}"
            )));
        }

        let cell = |s: usize, d: usize| CellIndex {
            series: s,
            dimension: d,
            ..origin
        };
        let placer = BarPlacer::new(mapper, bars, series_count);
        let mut lines = vec![LineBuilder::default(); series_count];
        let area_values = if areas.stacked {
            cumulative(&area.values)
        } else {
            area.values.clone()
        };
        let mut runs = vec![AreaRunBuilder::default(); series_count];
        let mut diff = DiffAreaBuilder::default();

        for d in 0..dims {
            let mut stack = StackState::default();
            let top_of_stack = if bars.mode == BarMode::Stacked {
                (0..series_count)
                    .rev()
                    .find(|&s| self.is_visible(Content::Bar, cell(s, d), area.values[s][d]))
            } else {
                None
            };

            for s in 0..series_count {
                let c = cell(s, d);
                let value = area.values[s][d];
                let bar_on = (bars.mode != BarMode::Uncertainty || s == 0)
                    && self.is_visible(Content::Bar, c, value);
                let line_on = self.is_visible(Content::Line, c, value);
                let point_on = self.is_visible(Content::Point, c, value);
                let label_on = self.is_visible(Content::Label, c, value);
                let owner = if !label_on {
                    None
                } else if point_on {
                    Some(Content::Point)
                } else if bar_on {
                    Some(Content::Bar)
                } else if line_on {
                    Some(Content::Line)
                } else {
                    None
                };

                if let (true, Some(v)) = (bar_on, value) {
                    let r = placer.rect(s, d, v, &mut stack);
                    let label = match (owner, bars.mode) {
                        (Some(Content::Bar), BarMode::Stacked) if top_of_stack == Some(s) => {
                            let total = self.stack_total(&area.values, series_count, d, &cell);
                            let text = self.label_text(c, total);
                            Some(bar_label(r, v < 0.0, text, &style.labels))
                        }
                        (Some(Content::Bar), BarMode::Stacked) => None,
                        (Some(Content::Bar), _) => {
                            let text = self.label_text(c, v);
                            Some(bar_label(r, v < 0.0, text, &style.labels))
                        }
                        _ => None,
                    };
                    out.push(Primitive::new(
                        format!("{prefix}/bar/s{s}/d{d}"),
                        z_order::SERIES_BARS,
                        r,
                        PrimitiveKind::Bar(BarPrimitive {
                            rect: r,
                            fill: style.series_color(s),
                            label,
                        }),
                    ));
                }

                lines[s].push(if line_on { mapper.point(d, value) } else { None });
                if let (Some(Content::Line), Some(v)) = (owner, value) {
                    let text = self.label_text(c, v);
                    lines[s].label_last(text, &style.labels);
                }

                if let (true, Some(center)) = (point_on, mapper.point(d, value)) {
                    let label = match (owner, value) {
                        (Some(Content::Point), Some(v)) => {
                            Some((self.label_text(c, v), &style.labels))
                        }
                        _ => None,
                    };
                    out.push(point_primitive(
                        format!("{prefix}/point/s{s}/d{d}"),
                        center,
                        &style.points,
                        style.series_color(s),
                        label,
                    ));
                }

                if areas_on && !areas.diff {
                    let primary = if self.is_visible(Content::Area, c, value) {
                        mapper.point(d, area_values[s][d])
                    } else {
                        None
                    };
                    let baseline = Point::new(mapper.x(d), mapper.baseline());
                    let mirror = match areas.anchor {
                        AreaAnchor::PreviousSeries if s > 0 => {
                            mapper.point(d, area_values[s - 1][d])
                        }
                        _ => Some(baseline),
                    };
                    match (primary, mirror) {
                        (Some(a), Some(b)) => runs[s].push(a, b),
                        (None, _) if areas.join_gaps => {}
                        _ => runs[s].close(),
                    }
                }
            }

            if bars_on && bars.mode == BarMode::Uncertainty {
                let estimate = area.values[0][d];
                let hidden =
                    estimate.is_some() && !self.is_visible(Content::Bar, cell(0, d), estimate);
                if let (false, Some(a), Some(b)) = (hidden, area.values[1][d], area.values[2][d]) {
                    let stroke = StrokeStyle::solid(style.text_color, bars.error_stroke_width);
                    let e = placer.error_bar(d, a, b, stroke);
                    let h = 0.5 * e.cap_width;
                    let bounds = Rect::new(e.x - h, e.top, e.x + h, e.bottom);
                    out.push(Primitive::new(
                        format!("{prefix}/error/d{d}"),
                        z_order::SERIES_ERROR_BARS,
                        bounds,
                        PrimitiveKind::ErrorBar(e),
                    ));
                }
            }

            if areas_on && areas.diff {
                let (c0, c1) = (cell(0, d), cell(1, d));
                let (a, b) = (area.values[0][d], area.values[1][d]);
                let sample = match (a, b) {
                    (Some(va), Some(vb))
                        if self.is_visible(Content::Area, c0, a)
                            && self.is_visible(Content::Area, c1, b) =>
                    {
                        Some(DiffSample {
                            first: Point::new(mapper.x(d), mapper.y(va)),
                            second: Point::new(mapper.x(d), mapper.y(vb)),
                            order: SeriesOrder::of(va, vb),
                        })
                    }
                    _ => None,
                };
                match sample {
                    Some(sample) => diff.push(sample)?,
                    None => diff.gap(areas.join_gaps),
                }
            }
        }

        for (s, builder) in lines.into_iter().enumerate() {
            let stroke = StrokeStyle::solid(style.series_color(s), style.lines.width);
            if let Some(p) = builder.finish(format!("{prefix}/line/s{s}"), stroke, style.lines.join_gaps)
            {
                out.push(p);
            }
        }
        for (s, builder) in runs.into_iter().enumerate() {
            let fill = style.series_color(s).with_alpha(areas.opacity);
            for (k, polygon) in builder.finish().into_iter().enumerate() {
                out.extend(area_primitive(format!("{prefix}/area/s{s}/r{k}"), polygon, fill, None));
            }
        }
        for (k, (polygon, order)) in diff.finish().into_iter().enumerate() {
            let color = match order {
                SeriesOrder::Under => areas.under_color,
                _ => areas.over_color,
            };
            out.extend(area_primitive(
                format!("{prefix}/diff/r{k}"),
                polygon,
                color.with_alpha(areas.opacity),
                Some(order),
            ));
        }
        Ok(())
    }

    /// Sum of the visible stacked bar values at dimension `d`.
    fn stack_total(
        &mut self,
        values: &[Vec<Option<f64>>],
        series_count: usize,
        d: usize,
        cell: &impl Fn(usize, usize) -> CellIndex,
    ) -> f64 {
        (0..series_count)
            .filter_map(|s| {
                let v = values[s][d];
                self.is_visible(Content::Bar, cell(s, d), v)
                    .then_some(v)
                    .flatten()
            })
            .sum()
    }
}
