// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data point markers.

use alloc::string::String;

use kurbo::Point;
use paneplot_text::TextStyle;
use peniko::Color;

use crate::primitive::{
    DataPointPrimitive, Primitive, PrimitiveKind, TextAnchor, TextBaseline, TextItem,
};
use crate::style::{LabelStyle, PointStyle};
use crate::z_order;

/// Builds a marker at `center`, with an optional label above it.
pub(crate) fn point_primitive(
    key: String,
    center: Point,
    style: &PointStyle,
    fill: Color,
    label: Option<(String, &LabelStyle)>,
) -> Primitive {
    let label = label.map(|(text, ls)| {
        TextItem::new(
            text,
            Point::new(center.x, center.y - style.radius - ls.offset),
            TextStyle::new(ls.font_size),
            ls.color,
            TextAnchor::Middle,
            TextBaseline::Bottom,
        )
    });
    Primitive::new(
        key,
        z_order::SERIES_POINTS,
        style.symbol.bounds(center.x, center.y, style.radius),
        PrimitiveKind::DataPoint(DataPointPrimitive {
            center,
            symbol: style.symbol,
            radius: style.radius,
            fill,
            label,
        }),
    )
}
