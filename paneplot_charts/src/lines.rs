// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line series accumulation.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;
use paneplot_text::TextStyle;

use crate::primitive::{
    LineSeriesPrimitive, Primitive, PrimitiveKind, StrokeStyle, TextAnchor, TextBaseline,
    TextItem, points_bounds,
};
use crate::style::LabelStyle;
use crate::z_order;

/// Collects one series' vertices across the dimension loop.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineBuilder {
    vertices: Vec<Option<Point>>,
    labels: Vec<(usize, TextItem)>,
}

impl LineBuilder {
    /// Appends the next vertex; `None` for absent or hidden values.
    pub(crate) fn push(&mut self, vertex: Option<Point>) {
        self.vertices.push(vertex);
    }

    /// Labels the most recently pushed vertex.
    pub(crate) fn label_last(&mut self, text: String, style: &LabelStyle) {
        let Some((index, Some(p))) = self.vertices.iter().copied().enumerate().last() else {
            return;
        };
        let item = TextItem::new(
            text,
            Point::new(p.x, p.y - style.offset),
            TextStyle::new(style.font_size),
            style.color,
            TextAnchor::Middle,
            TextBaseline::Bottom,
        );
        self.labels.push((index, item));
    }

    /// Emits the series, or `None` when no vertex is present.
    pub(crate) fn finish(self, key: String, stroke: StrokeStyle, join_gaps: bool) -> Option<Primitive> {
        let bounds = points_bounds(self.vertices.iter().flatten())?;
        let pad = 0.5 * stroke.width;
        Some(Primitive::new(
            key,
            z_order::SERIES_LINES,
            bounds.inflate(pad, pad),
            PrimitiveKind::LineSeries(LineSeriesPrimitive {
                vertices: self.vertices,
                join_gaps,
                stroke,
                labels: self.labels,
            }),
        ))
    }
}
