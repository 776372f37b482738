// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis measurement and axis primitives.
//!
//! Axes are measured before any plot area is placed: the Y axis width depends
//! only on the value ranges, and the X axis height depends on the lane width
//! left over once the Y axis is reserved. Each supported X axis kind has an
//! [`XAxisStrategy`]; the only supported Y axis kind is a numeric scale.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use paneplot_text::{TextBlock, TextMeasurer, TextStyle};
use paneplot_transforms::{PaneRanges, ValueRange};
use peniko::Color;

use crate::error::{ChartError, ChartResult};
use crate::format::{NumberPattern, format_tick_with_step};
use crate::geometry::Bands;
use crate::period::{PeriodAxisMeasure, PeriodScheme, measure_period_axis};
use crate::primitive::{AxisPrimitive, StrokeStyle, TextAnchor, TextBaseline, TextItem};
use crate::scale::{LinearScale, TickSet, generate_ticks};
use crate::style::{TierScale, XAxisStyle, YAxisStyle};

/// How the X (dimension) axis is measured and drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum XAxisKind {
    /// Free text labels, wrapped to the band width.
    #[default]
    Text,
    /// Calendar periods (months, quarters, years).
    Period,
    /// A numeric scale. Not supported on X.
    Scale,
}

/// How the Y (value) axis is measured and drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum YAxisKind {
    /// A numeric scale with generated ticks.
    #[default]
    Scale,
    /// Text labels. Not supported on Y.
    Text,
    /// Calendar periods. Not supported on Y.
    Period,
}

/// Measured text axis.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAxisMeasure {
    /// Band geometry, relative to the lane's left edge.
    pub bands: Bands,
    /// Wrapped label per band.
    pub labels: Vec<TextBlock>,
    /// Offset from the axis top to the first label line.
    pub label_offset: f64,
    /// Total axis height.
    pub height: f64,
}

/// A measured X axis.
#[derive(Clone, Debug, PartialEq)]
pub enum XAxisMeasure {
    /// Text labels.
    Text(TextAxisMeasure),
    /// Calendar periods.
    Period(PeriodAxisMeasure),
}

impl XAxisMeasure {
    /// Total axis height.
    pub fn height(&self) -> f64 {
        match self {
            Self::Text(m) => m.height,
            Self::Period(m) => m.height,
        }
    }

    /// Band geometry, relative to the lane's left edge.
    pub fn bands(&self) -> Bands {
        match self {
            Self::Text(m) => m.bands,
            Self::Period(m) => m.bands,
        }
    }
}

/// Measures an X axis for one lane width.
pub trait XAxisStrategy {
    /// Measures the axis for `dimensions` laid out over `bands`.
    fn measure(
        &self,
        dimensions: &[String],
        bands: Bands,
        style: &XAxisStyle,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<XAxisMeasure>;
}

/// Wrapped text labels under every band.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextXAxis;

impl XAxisStrategy for TextXAxis {
    fn measure(
        &self,
        dimensions: &[String],
        bands: Bands,
        style: &XAxisStyle,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<XAxisMeasure> {
        let text_style = TextStyle::new(style.font_size);
        let pad = style.label_padding;
        let max_width = (bands.increment - 2.0 * pad).max(1.0);
        let labels: Vec<TextBlock> = dimensions
            .iter()
            .map(|d| measurer.measure_block(d, &text_style, max_width))
            .collect();
        let tallest = labels.iter().map(|b| b.height).fold(0.0_f64, f64::max);
        let label_offset = style.tick_size + pad;
        Ok(XAxisMeasure::Text(TextAxisMeasure {
            bands,
            labels,
            label_offset,
            height: label_offset + tallest + pad,
        }))
    }
}

/// Calendar-aware labels with year rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeriodXAxis;

impl XAxisStrategy for PeriodXAxis {
    fn measure(
        &self,
        dimensions: &[String],
        bands: Bands,
        style: &XAxisStyle,
        measurer: &dyn TextMeasurer,
    ) -> ChartResult<XAxisMeasure> {
        measure_period_axis(dimensions, bands, style, measurer).map(XAxisMeasure::Period)
    }
}

/// Returns the X axis strategy for an axis kind combination.
pub fn x_axis_strategy(x: XAxisKind, y: YAxisKind) -> ChartResult<&'static dyn XAxisStrategy> {
    match (x, y) {
        (XAxisKind::Text, YAxisKind::Scale) => Ok(&TextXAxis),
        (XAxisKind::Period, YAxisKind::Scale) => Ok(&PeriodXAxis),
        _ => Err(ChartError::UnimplementedAxisKind { x, y }),
    }
}

/// A measured value axis for one pane.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxisMeasure {
    /// Total axis width.
    pub width: f64,
    /// Ticks per tier.
    pub tiers: Vec<TickSet>,
    /// Width of the rotated title column.
    pub title_width: f64,
    /// Width of the rotated tier-header column.
    pub header_width: f64,
}

/// Returns the range a tier is scaled to before ticks are generated.
fn tier_range(ranges: &PaneRanges, tier: usize, style: &YAxisStyle) -> ValueRange {
    let range = match style.scale {
        TierScale::Shared => ranges.overall,
        TierScale::Independent => ranges.tiers.get(tier).copied().flatten(),
    }
    .unwrap_or(ValueRange::new(0.0, 1.0));
    if style.include_zero {
        range.including(0.0)
    } else {
        range
    }
}

/// Measures the Y axis of one pane.
pub fn measure_y_axis(
    ranges: &PaneRanges,
    tier_headers: &[String],
    style: &YAxisStyle,
    measurer: &dyn TextMeasurer,
) -> YAxisMeasure {
    let pattern = style.pattern.as_deref().map(NumberPattern::parse);
    let format = |value: f64, step: f64| match &pattern {
        Some(p) => p.format(value),
        None => format_tick_with_step(value, step),
    };
    let tiers: Vec<TickSet> = (0..tier_headers.len().max(1))
        .map(|t| {
            generate_ticks(
                tier_range(ranges, t, style),
                style.tick_count,
                style.tick_mode,
                &format,
            )
        })
        .collect();

    let label_style = TextStyle::new(style.font_size);
    let widest = tiers
        .iter()
        .flat_map(|t| t.labels.iter())
        .map(|l| measurer.measure(l, &label_style).advance_width)
        .fold(0.0_f64, f64::max);

    let title_style = TextStyle::new(style.title_font_size);
    let rotated_column =
        measurer.measure("Mg", &title_style).line_height() + style.label_padding;
    let header_width = if tier_headers.len() > 1 {
        rotated_column
    } else {
        0.0
    };
    let title_width = if style.title.is_some() {
        rotated_column
    } else {
        0.0
    };
    YAxisMeasure {
        width: widest + style.tick_size + style.label_padding + header_width + title_width,
        tiers,
        title_width,
        header_width,
    }
}

/// Builds the axis for one tier. `rect` spans the axis column horizontally
/// and the tier's plot area vertically; `scale` maps values into it.
pub(crate) fn y_axis_primitive(
    measure: &YAxisMeasure,
    tier: usize,
    rect: Rect,
    scale: &LinearScale,
    header: Option<&str>,
    style: &YAxisStyle,
    color: Color,
) -> AxisPrimitive {
    let mut rules = Vec::new();
    let mut labels = Vec::new();
    rules.push(Line::new((rect.x1, rect.y0), (rect.x1, rect.y1)));

    let label_style = TextStyle::new(style.font_size);
    if let Some(ticks) = measure.tiers.get(tier) {
        let x = rect.x1 - style.tick_size;
        for (value, text) in ticks.values.iter().zip(&ticks.labels) {
            let y = scale.map(*value);
            rules.push(Line::new((x, y), (rect.x1, y)));
            labels.push(TextItem::new(
                text.clone(),
                Point::new(x - style.label_padding, y),
                label_style.clone(),
                color,
                TextAnchor::End,
                TextBaseline::Middle,
            ));
        }
    }

    if let Some(header) = header.filter(|_| measure.header_width > 0.0) {
        let x = rect.x0 + measure.title_width + 0.5 * measure.header_width;
        labels.push(
            TextItem::new(
                header,
                Point::new(x, rect.center().y),
                TextStyle::new(style.title_font_size),
                color,
                TextAnchor::Middle,
                TextBaseline::Middle,
            )
            .with_rotation(-90.0),
        );
    }

    AxisPrimitive {
        rules,
        stroke: StrokeStyle::solid(color, 1.0),
        labels,
    }
}

/// The rotated pane title, centered on `rect` (the pane's full axis column).
pub(crate) fn y_title_item(
    measure: &YAxisMeasure,
    rect: Rect,
    style: &YAxisStyle,
    color: Color,
) -> Option<TextItem> {
    let title = style.title.as_ref()?;
    Some(
        TextItem::new(
            title.clone(),
            Point::new(rect.x0 + 0.5 * measure.title_width, rect.center().y),
            TextStyle::new(style.title_font_size),
            color,
            TextAnchor::Middle,
            TextBaseline::Middle,
        )
        .with_rotation(-90.0),
    )
}

/// Builds the X axis below one lane. `rect` spans the lane horizontally and
/// starts at the plot bottom.
pub(crate) fn x_axis_primitive(
    measure: &XAxisMeasure,
    rect: Rect,
    style: &XAxisStyle,
    color: Color,
) -> AxisPrimitive {
    let bands = Bands {
        origin: rect.x0,
        ..measure.bands()
    };
    let top = rect.y0;
    let mut rules = Vec::new();
    let mut labels = Vec::new();
    rules.push(Line::new((rect.x0, top), (rect.x1, top)));
    for x in bands.ticks() {
        rules.push(Line::new((x, top), (x, top + style.tick_size)));
    }

    let label_style = TextStyle::new(style.font_size);
    match measure {
        XAxisMeasure::Text(m) => {
            for (i, block) in m.labels.iter().enumerate() {
                let x = bands.center(i);
                for (k, line) in block.lines.iter().enumerate() {
                    labels.push(TextItem::new(
                        line.clone(),
                        Point::new(x, top + m.label_offset + k as f64 * block.line_height),
                        label_style.clone(),
                        color,
                        TextAnchor::Middle,
                        TextBaseline::Top,
                    ));
                }
            }
        }
        XAxisMeasure::Period(m) => {
            for i in m.year_boundaries() {
                let x = bands.boundary(i);
                rules.push(Line::new((x, top), (x, top + style.large_tick_size)));
            }
            for (i, label) in m.band_labels.iter().enumerate() {
                if let Some(text) = label {
                    labels.push(TextItem::new(
                        text.clone(),
                        Point::new(bands.center(i), top + m.label_offset),
                        label_style.clone(),
                        color,
                        TextAnchor::Middle,
                        TextBaseline::Top,
                    ));
                }
            }
            if let Some(offset) = m.year_offset {
                let year_style = TextStyle::new(style.year_font_size);
                for run in &m.years {
                    let Some(text) = &run.label else { continue };
                    let (x, anchor) = match m.scheme {
                        PeriodScheme::SideDockedYears { .. } => (
                            bands.boundary(run.first) + style.label_padding,
                            TextAnchor::Start,
                        ),
                        _ => (
                            0.5 * (bands.span(run.first).0 + bands.span(run.last).1),
                            TextAnchor::Middle,
                        ),
                    };
                    labels.push(TextItem::new(
                        text.clone(),
                        Point::new(x, top + offset),
                        year_style.clone(),
                        color,
                        anchor,
                        TextBaseline::Top,
                    ));
                }
            }
        }
    }

    AxisPrimitive {
        rules,
        stroke: StrokeStyle::solid(color, 1.0),
        labels,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use paneplot_text::HeuristicTextMeasurer;
    use peniko::color::palette::css;

    use super::*;
    use crate::geometry::TickPlacement;

    fn ranges(min: f64, max: f64) -> PaneRanges {
        PaneRanges {
            overall: Some(ValueRange::new(min, max)),
            tiers: vec![Some(ValueRange::new(min, max / 2.0)), Some(ValueRange::new(min, max))],
        }
    }

    #[test]
    fn unsupported_kinds_are_rejected() {
        assert!(x_axis_strategy(XAxisKind::Text, YAxisKind::Scale).is_ok());
        assert!(x_axis_strategy(XAxisKind::Period, YAxisKind::Scale).is_ok());
        assert_eq!(
            x_axis_strategy(XAxisKind::Scale, YAxisKind::Scale).err(),
            Some(ChartError::UnimplementedAxisKind {
                x: XAxisKind::Scale,
                y: YAxisKind::Scale
            })
        );
        assert!(x_axis_strategy(XAxisKind::Text, YAxisKind::Text).is_err());
    }

    #[test]
    fn text_labels_wrap_to_band_width() {
        let bands = Bands::new(0.0, 100.0, 2, TickPlacement::Centered, 0.0);
        let dims = vec![String::from("a long dimension name"), String::from("b")];
        let XAxisMeasure::Text(m) = TextXAxis
            .measure(&dims, bands, &XAxisStyle::default(), &HeuristicTextMeasurer)
            .unwrap()
        else {
            panic!("expected a text axis");
        };
        assert!(m.labels[0].lines.len() > 1);
        assert_eq!(m.labels[1].lines.len(), 1);
        assert!(m.height > m.labels[0].height);
    }

    #[test]
    fn shared_tiers_use_the_pane_range() {
        let tiers = vec![String::from("a"), String::from("b")];
        let m = measure_y_axis(
            &ranges(0.0, 100.0),
            &tiers,
            &YAxisStyle::default(),
            &HeuristicTextMeasurer,
        );
        assert_eq!(m.tiers[0], m.tiers[1]);
        assert!(m.header_width > 0.0);
        assert_eq!(m.title_width, 0.0);

        let style = YAxisStyle::default().with_scale(TierScale::Independent);
        let m = measure_y_axis(&ranges(0.0, 100.0), &tiers, &style, &HeuristicTextMeasurer);
        assert!(m.tiers[0].max() < m.tiers[1].max());
    }

    #[test]
    fn missing_range_falls_back_to_unit() {
        let empty = PaneRanges {
            overall: None,
            tiers: vec![None],
        };
        let tiers = vec![String::from("default")];
        let m = measure_y_axis(&empty, &tiers, &YAxisStyle::default(), &HeuristicTextMeasurer);
        assert_eq!(m.tiers[0].min(), 0.0);
        assert_eq!(m.tiers[0].max(), 1.0);
    }

    #[test]
    fn include_zero_widens_range() {
        let tiers = vec![String::from("default")];
        let r = PaneRanges {
            overall: Some(ValueRange::new(50.0, 100.0)),
            tiers: vec![Some(ValueRange::new(50.0, 100.0))],
        };
        let m = measure_y_axis(&r, &tiers, &YAxisStyle::default(), &HeuristicTextMeasurer);
        assert_eq!(m.tiers[0].min(), 0.0);
        let style = YAxisStyle::default().with_include_zero(false);
        let m = measure_y_axis(&r, &tiers, &style, &HeuristicTextMeasurer);
        assert!(m.tiers[0].min() > 0.0);
    }

    #[test]
    fn y_axis_ticks_map_into_rect() {
        let tiers = vec![String::from("default")];
        let m = measure_y_axis(
            &ranges(0.0, 100.0),
            &tiers,
            &YAxisStyle::default(),
            &HeuristicTextMeasurer,
        );
        let rect = Rect::new(0.0, 10.0, m.width, 210.0);
        let ticks = &m.tiers[0];
        let scale = ticks.scale(rect.y1, rect.y0);
        let axis = y_axis_primitive(&m, 0, rect, &scale, None, &YAxisStyle::default(), css::BLACK);
        assert_eq!(axis.labels.len(), ticks.len());
        assert_eq!(axis.labels[0].position.y, 210.0);
        assert_eq!(axis.labels.last().unwrap().position.y, 10.0);
    }
}
