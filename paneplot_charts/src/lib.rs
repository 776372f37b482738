// Copyright 2025 the Paneplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pane chart layout and primitive generation.
//!
//! This crate turns the output of `paneplot_transforms` into a list of
//! render-ready [`Primitive`]s:
//! - **Panes** form a grid; each pane holds **tiers** stacked vertically (each
//!   with its own y-axis) and **lanes** side by side (each with its own
//!   x-axis).
//! - Every tier/lane intersection is a plot area drawing bars, lines, areas,
//!   points and data labels for the series across the dimensions.
//! - Captions, footnotes, the legend and annotations surround the grid.
//!
//! Text is measured through [`paneplot_text::TextMeasurer`]; painting goes
//! through a [`DrawingSurface`] supplied by the caller. Nothing here touches a
//! real rendering backend.
//!
//! ```
//! use paneplot_charts::{ChartSpec, ChartStyle};
//! use paneplot_text::HeuristicTextMeasurer;
//! use paneplot_transforms::{Record, TransformSpec};
//!
//! let records = [
//!     Record::new().with("month", "2023-01").with("region", "N").with("sales", 10.0),
//!     Record::new().with("month", "2023-01").with("region", "S").with("sales", 15.0),
//! ];
//! let spec = ChartSpec::new(
//!     TransformSpec::new(["sales"]).with_series("region").with_dimension("month"),
//!     (480.0, 320.0),
//! )
//! .with_style(ChartStyle::default());
//! let figure = spec.build(&records, &HeuristicTextMeasurer).unwrap();
//! assert!(figure.primitive("p0/t0/l0/bar/s1/d0").is_some());
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod annotation;
mod areas;
mod axis;
mod bars;
mod chart_spec;
mod coords;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod generator;
mod geometry;
mod layout;
mod legend;
mod lines;
mod period;
mod points;
mod primitive;
mod render;
mod scale;
mod style;
mod surrounds;
mod symbol;
pub mod z_order;

pub use annotation::Annotation;
pub use axis::{
    PeriodXAxis, TextAxisMeasure, TextXAxis, XAxisKind, XAxisMeasure, XAxisStrategy, YAxisKind,
    YAxisMeasure, measure_y_axis, x_axis_strategy,
};
pub use chart_spec::{ChartSpec, Figure};
pub use coords::CoordinateMapper;
pub use error::{ChartError, ChartResult};
pub use format::{NumberPattern, PatternCache, decimals_for_step, format_tick_with_step};
pub use generator::PrimitiveGenerator;
pub use geometry::{Bands, TickPlacement, split_with_gaps, take_bottom, take_right, take_top};
pub use layout::{MeasuredPane, PaneLayout, PlotArea, layout_panes, pane_grid};
pub use legend::{LegendItem, legend_items, legend_symbol};
pub use period::{
    InlineLabels, Period, PeriodAxisMeasure, PeriodGranularity, PeriodScheme, YearRun,
    choose_scheme, classify, measure_period_axis, parse_period, period_label,
};
pub use primitive::{
    AreaPrimitive, ArrowPrimitive, AxisPrimitive, BarPrimitive, BoxPrimitive, CaptionPrimitive,
    DataPointPrimitive, ErrorBarPrimitive, GridPrimitive, LegendEntry, LegendPrimitive,
    LegendSymbol, LineSeriesPrimitive, Primitive, PrimitiveKind, SeriesOrder, StrokeStyle,
    TextAnchor, TextBaseline, TextItem, sort_by_z,
};
pub use render::{DrawingSurface, PrimitiveRenderer};
pub use scale::{
    LinearScale, TickMode, TickSet, generate_ticks, nice_step, sanitize_range,
};
pub use style::{
    AreaAnchor, AreaStyle, BarMode, BarStyle, ChartStyle, LabelStyle, LayoutStyle, LegendPosition,
    LineStyle, PointStyle, SurroundsStyle, TierScale, ValueFormatter, ValueInfo, ValuePredicate,
    Visibility, XAxisStyle, YAxisStyle,
};
pub use surrounds::{Surrounds, measure_surrounds};
pub use symbol::Symbol;
