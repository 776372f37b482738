// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The end-to-end pipeline.
//!
//! A [`ChartSpec`] bundles the data transform, the style and the figure size.
//! [`ChartSpec::build`] runs every stage in order:
//!
//! 1. reshape records into headers and a value tensor,
//! 2. compute per-pane and per-tier value ranges (stacked when the style
//!    stacks bars or areas),
//! 3. measure the surrounds and keep the remaining content rectangle,
//! 4. lay out panes, measuring axes along the way,
//! 5. generate primitives, add annotations with their text wrapped, and sort
//!    everything by paint order.
//!
//! The pass holds no state between calls; building twice yields equal
//! figures.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use paneplot_text::TextMeasurer;
use paneplot_transforms::{Headers, Record, TransformSpec};

use crate::error::ChartResult;
use crate::generator::PrimitiveGenerator;
use crate::layout::{PaneLayout, layout_panes};
use crate::primitive::{Primitive, sort_by_z};
use crate::render::{DrawingSurface, PrimitiveRenderer};
use crate::style::ChartStyle;
use crate::surrounds::measure_surrounds;

/// Everything needed to turn records into a figure.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    /// How records map onto panes, tiers, lanes, series and dimensions.
    pub transform: TransformSpec,
    /// Styling.
    pub style: ChartStyle,
    /// Figure size.
    pub size: Size,
}

impl ChartSpec {
    /// Creates a spec with the default style.
    pub fn new(transform: TransformSpec, size: impl Into<Size>) -> Self {
        Self {
            transform,
            style: ChartStyle::default(),
            size: size.into(),
        }
    }

    /// Sets the style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Runs the pipeline.
    pub fn build(&self, records: &[Record], measurer: &dyn TextMeasurer) -> ChartResult<Figure> {
        let output = self.transform.run(records)?;
        let ranges = output.y_scale_axis_data(self.style.is_stacked());
        let figure = Rect::from_origin_size((0.0, 0.0), self.size);
        let surrounds = measure_surrounds(figure, &output.headers.series, &self.style, measurer);
        let layout = layout_panes(
            surrounds.content,
            &output.headers,
            &output.tensor,
            &ranges,
            &self.style,
            measurer,
        )?;
        let mut primitives = surrounds.primitives;
        primitives.extend(PrimitiveGenerator::new(&output.headers, &self.style).generate(&layout)?);
        primitives.extend(
            self.style
                .annotations
                .iter()
                .enumerate()
                .map(|(i, a)| a.primitive(i, self.style.text_color, measurer)),
        );
        sort_by_z(&mut primitives);
        Ok(Figure {
            size: self.size,
            headers: output.headers,
            layout,
            primitives,
        })
    }
}

/// A built figure: render-ready primitives plus the layout they came from.
#[derive(Debug)]
pub struct Figure {
    /// Figure size.
    pub size: Size,
    /// Headers in display order.
    pub headers: Headers,
    /// Pane layout.
    pub layout: PaneLayout,
    /// Primitives sorted by paint order.
    pub primitives: Vec<Primitive>,
}

impl Figure {
    /// Paints the figure onto `surface`.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        PrimitiveRenderer.render(&self.primitives, surface);
    }

    /// Returns the primitive with `key`, if any.
    pub fn primitive(&self, key: &str) -> Option<&Primitive> {
        self.primitives.iter().find(|p| p.key == key)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use paneplot_text::HeuristicTextMeasurer;
    use paneplot_transforms::{Discriminator, HeaderOrder, TransformError};

    use super::*;
    use crate::axis::XAxisKind;
    use crate::error::ChartError;
    use crate::primitive::{PrimitiveKind, SeriesOrder};
    use crate::style::{
        AreaStyle, BarMode, BarStyle, LabelStyle, LineStyle, PointStyle, SurroundsStyle,
        Visibility, XAxisStyle,
    };

    fn sales() -> Vec<Record> {
        [
            ("2023-01", "N", 10.0),
            ("2023-01", "S", 15.0),
            ("2023-02", "N", 7.0),
            ("2023-02", "S", 9.0),
        ]
        .into_iter()
        .map(|(period, region, sales)| {
            Record::new()
                .with("period", period)
                .with("region", region)
                .with("sales", sales)
        })
        .collect()
    }

    fn spec() -> ChartSpec {
        ChartSpec::new(
            TransformSpec::new(["sales"])
                .with_series("region")
                .with_dimension("period"),
            (480.0, 320.0),
        )
    }

    fn bars(figure: &Figure) -> Vec<&Primitive> {
        figure
            .primitives
            .iter()
            .filter(|p| matches!(p.kind, PrimitiveKind::Bar(_)))
            .collect()
    }

    #[test]
    fn stacked_bars_sum_to_the_stack_height() {
        let figure = spec().build(&sales(), &HeuristicTextMeasurer).unwrap();
        assert_eq!(figure.headers.series, ["N", "S"]);
        assert_eq!(bars(&figure).len(), 4);

        let area = &figure.layout.panes[0].plot_areas[0];
        let ticks = &figure.layout.panes[0].y_axis.tiers[0];
        let scale = ticks.scale(area.rect.y1, area.rect.y0);
        let PrimitiveKind::Bar(top) = &figure.primitive("p0/t0/l0/bar/s1/d0").unwrap().kind else {
            panic!("expected a bar");
        };
        assert!((top.rect.y0 - scale.map(25.0)).abs() < 1e-9);
        assert!((top.rect.y1 - scale.map(10.0)).abs() < 1e-9);
    }

    #[test]
    fn pipeline_is_idempotent() {
        let spec = spec().with_style(
            ChartStyle::default()
                .with_lines(LineStyle::default().with_visibility(Visibility::Always))
                .with_labels(LabelStyle::default().with_visibility(Visibility::Always))
                .with_surrounds(SurroundsStyle::default().with_caption("Sales")),
        );
        let a = spec.build(&sales(), &HeuristicTextMeasurer).unwrap();
        let b = spec.build(&sales(), &HeuristicTextMeasurer).unwrap();
        assert_eq!(a.primitives, b.primitives);
    }

    #[test]
    fn primitives_are_sorted_by_z() {
        let figure = spec().build(&sales(), &HeuristicTextMeasurer).unwrap();
        assert!(
            figure
                .primitives
                .windows(2)
                .all(|w| w[0].z_index <= w[1].z_index)
        );
        assert!(figure.primitive("legend").is_some());
        assert!(figure.primitive("p0/t0/l0/grid").is_some());
        let area = &figure.layout.panes[0].plot_areas[0];
        let ticks = figure.layout.panes[0].y_axis.tiers[0].len();
        assert_eq!(area.grid_lines().map(<[f64]>::len), Some(ticks));
    }

    #[test]
    fn stacked_labels_only_on_top() {
        let spec = spec().with_style(
            ChartStyle::default().with_labels(LabelStyle::default().with_visibility(Visibility::Always)),
        );
        let figure = spec.build(&sales(), &HeuristicTextMeasurer).unwrap();
        let labelled: Vec<_> = bars(&figure)
            .into_iter()
            .filter_map(|p| match &p.kind {
                PrimitiveKind::Bar(b) => b.label.as_ref().map(|l| (p.key.as_str(), l.text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(labelled, [("p0/t0/l0/bar/s1/d0", "25"), ("p0/t0/l0/bar/s1/d1", "16")]);
    }

    #[test]
    fn points_take_the_label_from_bars() {
        let spec = spec().with_style(
            ChartStyle::default()
                .with_bars(BarStyle::default().with_mode(BarMode::Grouped))
                .with_points(PointStyle::default().with_visibility(Visibility::Always))
                .with_labels(LabelStyle::default().with_visibility(Visibility::Always)),
        );
        let figure = spec.build(&sales(), &HeuristicTextMeasurer).unwrap();
        for p in &figure.primitives {
            match &p.kind {
                PrimitiveKind::Bar(b) => assert!(b.label.is_none()),
                PrimitiveKind::DataPoint(d) => assert!(d.label.is_some()),
                _ => {}
            }
        }
    }

    #[test]
    fn diff_area_needs_two_series() {
        let style = ChartStyle::default()
            .with_bars(BarStyle::default().with_visibility(Visibility::Never))
            .with_areas(AreaStyle::default().with_visibility(Visibility::Always).with_diff(true));
        let figure = spec().with_style(style.clone()).build(&sales(), &HeuristicTextMeasurer).unwrap();
        let orders: Vec<_> = figure
            .primitives
            .iter()
            .filter_map(|p| match &p.kind {
                PrimitiveKind::AreaSeries(a) => a.order,
                _ => None,
            })
            .collect();
        assert_eq!(orders, [SeriesOrder::Under]);

        let mut records = sales();
        records.push(
            Record::new()
                .with("period", "2023-01")
                .with("region", "W")
                .with("sales", 3.0),
        );
        let err = spec().with_style(style).build(&records, &HeuristicTextMeasurer).unwrap_err();
        assert!(matches!(err, ChartError::InputShape(_)));
    }

    #[test]
    fn uncertainty_needs_three_series() {
        let style = ChartStyle::default()
            .with_bars(BarStyle::default().with_mode(BarMode::Uncertainty));
        let err = spec().with_style(style).build(&sales(), &HeuristicTextMeasurer).unwrap_err();
        assert!(matches!(err, ChartError::InputShape(_)));
    }

    fn estimates(rows: &[(&str, Option<f64>, f64, f64)]) -> Vec<Record> {
        rows.iter()
            .map(|&(team, estimate, low, high)| {
                let record = Record::new().with("team", team).with("low", low).with("high", high);
                match estimate {
                    Some(v) => record.with("estimate", v),
                    None => record,
                }
            })
            .collect()
    }

    fn uncertainty_spec(bars: BarStyle) -> ChartSpec {
        ChartSpec::new(
            TransformSpec::new(["estimate", "low", "high"])
                .with_series(Discriminator::ValueProperties)
                .with_dimension("team")
                .with_order(HeaderOrder::FirstSeen),
            (480.0, 320.0),
        )
        .with_style(ChartStyle::default().with_bars(bars.with_mode(BarMode::Uncertainty)))
    }

    #[test]
    fn error_bar_drawn_without_a_point_estimate() {
        let records = estimates(&[("a", Some(12.0), 10.0, 13.0), ("b", None, 6.0, 9.5)]);
        let figure = uncertainty_spec(BarStyle::default())
            .build(&records, &HeuristicTextMeasurer)
            .unwrap();
        assert!(figure.primitive("p0/t0/l0/error/d0").is_some());
        let PrimitiveKind::ErrorBar(e) = &figure.primitive("p0/t0/l0/error/d1").unwrap().kind
        else {
            panic!("expected an error bar");
        };
        assert!(e.top < e.bottom);
        assert!(figure.primitive("p0/t0/l0/bar/s0/d1").is_none());
    }

    #[test]
    fn hidden_estimate_hides_its_error_bar() {
        let records = estimates(&[("a", Some(12.0), 10.0, 13.0), ("b", Some(40.0), 38.0, 43.0)]);
        let bars = BarStyle::default().with_visibility(Visibility::when(|i| i.value < 30.0));
        let figure = uncertainty_spec(bars).build(&records, &HeuristicTextMeasurer).unwrap();
        assert!(figure.primitive("p0/t0/l0/error/d0").is_some());
        assert!(figure.primitive("p0/t0/l0/error/d1").is_none());
    }

    #[test]
    fn transform_errors_pass_through() {
        let mut records = sales();
        records.push(sales()[0].clone());
        let err = spec().build(&records, &HeuristicTextMeasurer).unwrap_err();
        assert!(matches!(err, ChartError::Transform(TransformError::DuplicateData { .. })));
    }

    #[test]
    fn period_axis_renders_year_row() {
        let style = ChartStyle::default()
            .with_x_axis(XAxisStyle::default().with_kind(XAxisKind::Period));
        let figure = spec().with_style(style).build(&sales(), &HeuristicTextMeasurer).unwrap();
        let PrimitiveKind::Axis(axis) = &figure.primitive("p0/l0/x-axis").unwrap().kind else {
            panic!("expected an axis");
        };
        let texts: Vec<String> = axis.labels.iter().map(|l| l.text.clone()).collect();
        assert!(texts.contains(&String::from("2023")));
        assert!(texts.contains(&String::from("January")) || texts.contains(&String::from("Jan")));
    }
}
