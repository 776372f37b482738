// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pane grid and plot-area layout.
//!
//! Panes sit in a uniform grid. Inside each pane, space is taken in a fixed
//! order: pane header, Y axis column, lane header strip, X axis strip, and
//! finally the tier × lane plot areas. The nesting is the same for every axis
//! kind combination.

use alloc::vec::Vec;
use core::cell::OnceCell;

use kurbo::Rect;
use paneplot_text::{TextMeasurer, TextStyle};
use paneplot_transforms::{Headers, ValueTensor, YScaleAxisData};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::{XAxisMeasure, YAxisMeasure, measure_y_axis, x_axis_strategy};
use crate::error::ChartResult;
use crate::geometry::{Bands, split_with_gaps, take_bottom, take_top};
use crate::style::ChartStyle;

/// One tier × lane plot rectangle and its slice of the tensor.
#[derive(Debug)]
pub struct PlotArea {
    /// Tier index.
    pub tier: usize,
    /// Lane index.
    pub lane: usize,
    /// Plot rectangle in figure coordinates.
    pub rect: Rect,
    /// Values indexed `[series][dimension]`.
    pub values: Vec<Vec<Option<f64>>>,
    grid_lines: OnceCell<Vec<f64>>,
}

impl PlotArea {
    /// Pixel y of every horizontal grid line, once generation attached them.
    pub fn grid_lines(&self) -> Option<&[f64]> {
        self.grid_lines.get().map(Vec::as_slice)
    }

    /// Attaches grid-line positions. Later calls are ignored.
    pub(crate) fn attach_grid_lines(&self, ys: Vec<f64>) -> &[f64] {
        self.grid_lines.get_or_init(|| ys)
    }
}

/// A pane with every axis measured and every plot area placed.
#[derive(Debug)]
pub struct MeasuredPane {
    /// Pane index.
    pub index: usize,
    /// Grid cell.
    pub outer: Rect,
    /// Space below the pane header.
    pub content: Rect,
    /// Pane header strip (several panes only).
    pub header: Option<Rect>,
    /// Measured Y axis.
    pub y_axis: YAxisMeasure,
    /// Measured X axis (identical for every lane).
    pub x_axis: XAxisMeasure,
    /// Y axis column spanning every tier.
    pub y_axis_column: Rect,
    /// Y axis column clipped to each tier's plot rows.
    pub y_axis_rects: Vec<Rect>,
    /// X axis strip under each lane.
    pub x_axis_rects: Vec<Rect>,
    /// Lane header strip per lane (several lanes only).
    pub lane_header_rects: Vec<Rect>,
    /// Plot areas in tier-major order.
    pub plot_areas: Vec<PlotArea>,
}

impl MeasuredPane {
    /// Returns the plot area for `(tier, lane)`.
    pub fn plot_area(&self, tier: usize, lane: usize) -> Option<&PlotArea> {
        self.plot_areas
            .iter()
            .find(|a| a.tier == tier && a.lane == lane)
    }
}

/// The laid-out pane grid.
#[derive(Debug)]
pub struct PaneLayout {
    /// Grid columns.
    pub columns: usize,
    /// Grid rows.
    pub rows: usize,
    /// Measured panes in pane order.
    pub panes: Vec<MeasuredPane>,
}

/// Returns `(columns, rows)` for `panes` panes.
pub fn pane_grid(panes: usize, columns: Option<usize>) -> (usize, usize) {
    let n = panes.max(1);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "square root of a pane count"
    )]
    let default = (n as f64).sqrt().ceil() as usize;
    let columns = columns.unwrap_or(default).clamp(1, n);
    (columns, n.div_ceil(columns))
}

/// Height of a pane or lane header strip.
pub(crate) fn header_height(style: &ChartStyle, measurer: &dyn TextMeasurer) -> f64 {
    let text = TextStyle::new(style.layout.header_font_size).bold();
    measurer.measure("Mg", &text).line_height() + 2.0 * style.layout.header_padding
}

/// Lays out every pane inside `content`.
pub fn layout_panes(
    content: Rect,
    headers: &Headers,
    tensor: &ValueTensor,
    ranges: &YScaleAxisData,
    style: &ChartStyle,
    measurer: &dyn TextMeasurer,
) -> ChartResult<PaneLayout> {
    let strategy = x_axis_strategy(style.x_axis.kind, style.y_axis.kind)?;
    let pane_count = headers.panes.len();
    let (columns, rows) = pane_grid(pane_count, style.layout.pane_columns);
    tracing::debug!(panes = pane_count, columns, rows, "pane grid");

    let gap = style.layout.pane_gap;
    let xs = split_with_gaps(content.x0, content.width(), columns, gap);
    let ys = split_with_gaps(content.y0, content.height(), rows, gap);
    let header_h = header_height(style, measurer);

    let mut panes = Vec::with_capacity(pane_count);
    for p in 0..pane_count {
        let (x0, x1) = xs[p % columns];
        let (y0, y1) = ys[p / columns];
        let outer = Rect::new(x0, y0, x1, y1);
        let mut inner = outer;
        let header = (pane_count > 1).then(|| take_top(&mut inner, header_h));
        let pane_content = inner;

        let tier_count = headers.tiers.len();
        let lane_count = headers.lanes.len();
        let y_axis = measure_y_axis(
            &ranges.panes[p],
            &headers.tiers,
            &style.y_axis,
            measurer,
        );
        let mut plot = Rect::new(
            (inner.x0 + y_axis.width).min(inner.x1),
            inner.y0,
            inner.x1,
            inner.y1,
        );
        let lane_strip = (lane_count > 1).then(|| take_top(&mut plot, header_h));
        let lanes = split_with_gaps(plot.x0, plot.width(), lane_count, style.layout.lane_gap);
        let lane_width = lanes.first().map_or(0.0, |(a, b)| b - a);
        let bands = Bands::new(
            0.0,
            lane_width,
            headers.dimensions.len(),
            style.x_axis.placement,
            style.layout.grid_stroke_width,
        );
        let x_axis = strategy.measure(&headers.dimensions, bands, &style.x_axis, measurer)?;
        let x_strip = take_bottom(&mut plot, x_axis.height());

        let y_axis_column = Rect::new(inner.x0, plot.y0, plot.x0, plot.y1);
        let pad = style.layout.tier_padding;
        let tiers: Vec<(f64, f64)> =
            split_with_gaps(plot.y0, plot.height(), tier_count, style.layout.tier_gap)
                .into_iter()
                .map(|(a, b)| {
                    let inset = pad.min(0.5 * (b - a));
                    (a + inset, b - inset)
                })
                .collect();

        let y_axis_rects = tiers
            .iter()
            .map(|(a, b)| Rect::new(y_axis_column.x0, *a, y_axis_column.x1, *b))
            .collect();
        let x_axis_rects = lanes
            .iter()
            .map(|(a, b)| Rect::new(*a, x_strip.y0, *b, x_strip.y1))
            .collect();
        let lane_header_rects = lane_strip
            .map(|strip| {
                lanes
                    .iter()
                    .map(|(a, b)| Rect::new(*a, strip.y0, *b, strip.y1))
                    .collect()
            })
            .unwrap_or_default();

        let mut plot_areas = Vec::with_capacity(tier_count * lane_count);
        for (t, (ty0, ty1)) in tiers.iter().enumerate() {
            for (l, (lx0, lx1)) in lanes.iter().enumerate() {
                plot_areas.push(PlotArea {
                    tier: t,
                    lane: l,
                    rect: Rect::new(*lx0, *ty0, *lx1, *ty1),
                    values: tensor.lane_values(p, t, l),
                    grid_lines: OnceCell::new(),
                });
            }
        }

        panes.push(MeasuredPane {
            index: p,
            outer,
            content: pane_content,
            header,
            y_axis,
            x_axis,
            y_axis_column,
            y_axis_rects,
            x_axis_rects,
            lane_header_rects,
            plot_areas,
        });
    }

    Ok(PaneLayout {
        columns,
        rows,
        panes,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use paneplot_text::HeuristicTextMeasurer;
    use paneplot_transforms::{Record, TransformSpec};

    use super::*;
    use crate::axis::{XAxisKind, YAxisKind};
    use crate::error::ChartError;
    use crate::style::{XAxisStyle, YAxisStyle};

    fn records() -> Vec<Record> {
        let mut out = Vec::new();
        for (region, lane) in [("N", "a"), ("S", "b")] {
            for (period, sales) in [("Q1", 10.0), ("Q2", 12.0), ("Q3", 8.0)] {
                out.push(
                    Record::new()
                        .with("region", region)
                        .with("lane", lane)
                        .with("period", period)
                        .with("sales", sales),
                );
            }
        }
        out
    }

    fn layout(style: &ChartStyle) -> ChartResult<PaneLayout> {
        let out = TransformSpec::new(["sales"])
            .with_lane("lane")
            .with_series("region")
            .with_dimension("period")
            .run(&records())
            .unwrap();
        let ranges = out.y_scale_axis_data(false);
        layout_panes(
            Rect::new(0.0, 0.0, 600.0, 400.0),
            &out.headers,
            &out.tensor,
            &ranges,
            style,
            &HeuristicTextMeasurer,
        )
    }

    #[test]
    fn grid_defaults_to_square() {
        assert_eq!(pane_grid(1, None), (1, 1));
        assert_eq!(pane_grid(3, None), (2, 2));
        assert_eq!(pane_grid(5, None), (3, 2));
        assert_eq!(pane_grid(5, Some(1)), (1, 5));
        assert_eq!(pane_grid(2, Some(10)), (2, 1));
    }

    #[test]
    fn plot_areas_cover_every_tier_and_lane() {
        let l = layout(&ChartStyle::default()).unwrap();
        assert_eq!(l.panes.len(), 1);
        let pane = &l.panes[0];
        assert!(pane.header.is_none());
        assert_eq!(pane.plot_areas.len(), 2);
        assert_eq!(pane.lane_header_rects.len(), 2);
        let a = pane.plot_area(0, 0).unwrap();
        let b = pane.plot_area(0, 1).unwrap();
        assert!((a.rect.width() - b.rect.width()).abs() < 1e-9);
        assert!(a.rect.x1 < b.rect.x0);
        assert!(a.rect.x0 >= pane.y_axis_column.x1);
        assert!(a.rect.y1 <= pane.x_axis_rects[0].y0);
        // Series headers are global; lane "a" only has values for "N".
        assert_eq!(a.values.len(), 2);
        assert_eq!(a.values[0], vec![Some(10.0), Some(12.0), Some(8.0)]);
        assert_eq!(a.values[1], vec![None, None, None]);
    }

    #[test]
    fn grid_lines_attach_once() {
        let l = layout(&ChartStyle::default()).unwrap();
        let area = &l.panes[0].plot_areas[0];
        assert!(area.grid_lines().is_none());
        area.attach_grid_lines(vec![1.0, 2.0]);
        area.attach_grid_lines(vec![3.0]);
        assert_eq!(area.grid_lines(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn scale_x_axis_is_unimplemented() {
        let style = ChartStyle::default().with_x_axis(XAxisStyle::default().with_kind(XAxisKind::Scale));
        assert!(matches!(
            layout(&style),
            Err(ChartError::UnimplementedAxisKind { .. })
        ));
        let style =
            ChartStyle::default().with_y_axis(YAxisStyle::default().with_kind(YAxisKind::Period));
        assert!(layout(&style).is_err());
    }

    #[test]
    fn unparseable_periods_are_input_errors() {
        let style =
            ChartStyle::default().with_x_axis(XAxisStyle::default().with_kind(XAxisKind::Period));
        assert!(matches!(layout(&style), Err(ChartError::InputShape(_))));
    }
}
